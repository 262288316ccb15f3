use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::debug;

use crate::cli::Cli;
use crate::error::{Error, Result};
use crate::fame::rank::OrderBy;
use crate::fame::report::Format;
use crate::git::Identity;

pub const CONFIG_FILE: &str = ".gitfame.toml";

/// Optional settings read from a TOML file. Keys mirror the long CLI flags.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields, rename_all = "kebab-case")]
pub struct FileConfig {
    pub revision: Option<String>,
    pub order_by: Option<OrderBy>,
    pub use_committer: Option<bool>,
    pub format: Option<Format>,
    pub extensions: Option<Vec<String>>,
    pub languages: Option<Vec<String>>,
    pub exclude: Option<Vec<String>>,
    pub restrict_to: Option<Vec<String>>,
    pub jobs: Option<usize>,
}

impl FileConfig {
    pub fn parse(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::parse(&text)
    }
}

/// Fully resolved settings for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub repository: PathBuf,
    pub revision: String,
    pub order_by: OrderBy,
    pub identity: Identity,
    pub format: Format,
    pub extensions: Vec<String>,
    pub languages: Vec<String>,
    pub exclude: Vec<String>,
    pub restrict_to: Vec<String>,
    pub jobs: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            repository: PathBuf::from("."),
            revision: "HEAD".to_string(),
            order_by: OrderBy::default(),
            identity: Identity::default(),
            format: Format::default(),
            extensions: Vec::new(),
            languages: Vec::new(),
            exclude: Vec::new(),
            restrict_to: Vec::new(),
            jobs: std::thread::available_parallelism().map_or(1, |n| n.get()),
        }
    }
}

impl Settings {
    /// Load the config file named by `--config`, or `.gitfame.toml` in the
    /// repository directory if there is one, and layer the CLI on top.
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let file = match &cli.config {
            Some(path) => FileConfig::load(path)?,
            None => {
                let candidate = cli.repository.join(CONFIG_FILE);
                if candidate.is_file() {
                    debug!(path = %candidate.display(), "using config file");
                    FileConfig::load(&candidate)?
                } else {
                    FileConfig::default()
                }
            }
        };
        Self::resolve(cli, file)
    }

    /// Defaults, then `file`, then explicit CLI flags. Lists replace.
    pub fn resolve(cli: &Cli, file: FileConfig) -> Result<Self> {
        let defaults = Settings::default();
        let use_committer = cli.use_committer || file.use_committer.unwrap_or(false);

        let settings = Settings {
            repository: cli.repository.clone(),
            revision: cli
                .revision
                .clone()
                .or(file.revision)
                .unwrap_or(defaults.revision),
            order_by: cli.order_by.or(file.order_by).unwrap_or(defaults.order_by),
            identity: if use_committer {
                Identity::Committer
            } else {
                Identity::Author
            },
            format: cli.format.or(file.format).unwrap_or(defaults.format),
            extensions: cli.extensions.clone().or(file.extensions).unwrap_or_default(),
            languages: cli.languages.clone().or(file.languages).unwrap_or_default(),
            exclude: cli.exclude.clone().or(file.exclude).unwrap_or_default(),
            restrict_to: cli.restrict_to.clone().or(file.restrict_to).unwrap_or_default(),
            jobs: cli.jobs.or(file.jobs).unwrap_or(defaults.jobs),
        };

        if settings.revision.trim().is_empty() {
            return Err(Error::Config("revision must not be empty".to_string()));
        }
        if settings.jobs == 0 {
            return Err(Error::Config("jobs must be at least 1".to_string()));
        }
        Ok(settings)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
