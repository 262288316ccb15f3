//! CLI argument definitions for the `gitfame` command.
//!
//! Every option except `--repository`, `--config` and `--verbose` can also
//! be set in a `.gitfame.toml` file; flags given here take precedence.
use std::path::PathBuf;

use clap::Parser;

use crate::fame::rank::OrderBy;
use crate::fame::report::Format;

#[derive(Parser, Debug)]
#[command(name = "gitfame", version, about = "Per-author code ownership statistics")]
#[command(long_about = "\
Compute per-author code ownership statistics for a git repository.

For every contributor, gitfame reports how many lines of the analysed
revision are attributed to them by `git blame`, how many distinct commits
those lines come from, and in how many files they own at least one line.
Empty files are attributed to the commit that last touched them.

Authors are sorted by the --order-by field (descending), then by the other
two fields, then by name (case-insensitive).

Examples:
  gitfame                                   # current repository, HEAD
  gitfame --repository ../proj --revision v1.2.0
  gitfame --order-by commits --format csv
  gitfame --languages rust,go --exclude 'vendor/*'
  gitfame --use-committer --format json-lines")]
pub struct Cli {
    /// Path to the git repository (default: current directory)
    #[arg(long, default_value = ".")]
    pub repository: PathBuf,

    /// Commit, tag or branch to analyse (default: HEAD)
    #[arg(long)]
    pub revision: Option<String>,

    /// Sort by: lines, commits or files (default: lines)
    #[arg(long, value_enum)]
    pub order_by: Option<OrderBy>,

    /// Attribute lines to the committer instead of the author
    #[arg(long)]
    pub use_committer: bool,

    /// Output format (default: tabular)
    #[arg(long, value_enum)]
    pub format: Option<Format>,

    /// Only analyse files with these extensions (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub extensions: Option<Vec<String>>,

    /// Only analyse files of these languages (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub languages: Option<Vec<String>>,

    /// Skip files matching these glob patterns (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub exclude: Option<Vec<String>>,

    /// Only analyse files matching these glob patterns (comma separated)
    #[arg(long, value_delimiter = ',')]
    pub restrict_to: Option<Vec<String>>,

    /// Number of files blamed in parallel (default: number of CPUs)
    #[arg(short, long)]
    pub jobs: Option<usize>,

    /// Config file (default: <repository>/.gitfame.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let cli = Cli::try_parse_from(["gitfame"]).unwrap();
        assert_eq!(cli.repository, PathBuf::from("."));
        assert!(cli.order_by.is_none());
        assert!(cli.extensions.is_none());
        assert!(!cli.use_committer);
    }

    #[test]
    fn comma_separated_lists() {
        let cli = Cli::try_parse_from(["gitfame", "--exclude", "a/*,*.md", "--extensions", "go"])
            .unwrap();
        assert_eq!(
            cli.exclude.unwrap(),
            vec!["a/*".to_string(), "*.md".to_string()]
        );
        assert_eq!(cli.extensions.unwrap(), vec!["go".to_string()]);
    }

    #[test]
    fn enum_values() {
        let cli = Cli::try_parse_from([
            "gitfame",
            "--order-by",
            "files",
            "--format",
            "json-lines",
        ])
        .unwrap();
        assert_eq!(cli.order_by, Some(OrderBy::Files));
        assert_eq!(cli.format, Some(Format::JsonLines));
    }

    #[test]
    fn unknown_order_by_is_rejected() {
        assert!(Cli::try_parse_from(["gitfame", "--order-by", "age"]).is_err());
    }

    #[test]
    fn unknown_format_is_rejected() {
        assert!(Cli::try_parse_from(["gitfame", "--format", "xml"]).is_err());
    }
}
