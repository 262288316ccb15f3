use std::path::PathBuf;

use thiserror::Error;

/// Every failure aborts the whole run: a partial ownership report would
/// misrepresent who owns the code.
#[derive(Debug, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("invalid config file: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("invalid glob pattern: {0}")]
    Pattern(#[from] globset::Error),

    #[error("unknown language: {0}")]
    UnknownLanguage(String),

    #[error("git: {0}")]
    Git(#[from] git2::Error),

    #[error("`{command}` failed: {stderr}")]
    Tool { command: String, stderr: String },

    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("cannot start blame workers: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),

    #[error("malformed blame record in {} at line {line}: {reason}", .path.display())]
    MalformedRecord {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("unexpected `git log` output for {}: {output:?}", .path.display())]
    MalformedLog { path: PathBuf, output: String },

    #[error("commit {commit} resolves to both {first:?} and {second:?}")]
    ConflictingIdentity {
        commit: String,
        first: String,
        second: String,
    },

    #[error("commit {0} owns lines but its identity was never reported")]
    UnresolvedCommit(String),
}

pub type Result<T> = std::result::Result<T, Error>;
