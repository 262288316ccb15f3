use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::process::Command;

use git2::{ObjectType, Repository, TreeWalkMode, TreeWalkResult};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::fame::parser::{AuthorName, CommitId};

/// Which signature of a commit a line is attributed to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Identity {
    #[default]
    Author,
    Committer,
}

impl Identity {
    /// Porcelain metadata line carrying this identity's name.
    pub fn prefix(self) -> &'static str {
        match self {
            Identity::Author => "author ",
            Identity::Committer => "committer ",
        }
    }

    fn log_format(self) -> &'static str {
        match self {
            Identity::Author => "--pretty=format:%H %an",
            Identity::Committer => "--pretty=format:%H %cn",
        }
    }
}

/// Line-history queries for one revision. Shared by the blame workers.
pub trait History: Sync {
    /// `git blame --porcelain` output for `path`, one entry per line.
    /// Empty when the tool reports nothing (e.g. an empty file).
    fn blame(&self, path: &Path) -> Result<Vec<String>>;

    /// The commit that last touched `path` and its identity.
    fn last_commit(&self, path: &Path, identity: Identity) -> Result<(CommitId, AuthorName)>;
}

pub struct GitRepo {
    repo: Repository,
    root: PathBuf,
}

impl GitRepo {
    pub fn open(path: &Path) -> Result<Self> {
        let repo = Repository::discover(path)?;
        let root = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();
        Ok(Self { repo, root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Every blob in the tree of `revision`, recursively, in tree order.
    pub fn list_files(&self, revision: &str) -> Result<Vec<PathBuf>> {
        let tree = self.repo.revparse_single(revision)?.peel_to_tree()?;

        let mut files = Vec::new();
        tree.walk(TreeWalkMode::PreOrder, |dir, entry| {
            if entry.kind() != Some(ObjectType::Blob) {
                return TreeWalkResult::Ok;
            }
            match entry.name() {
                Some(name) => files.push(PathBuf::from(format!("{dir}{name}"))),
                None => warn!(dir, "skipping entry with a non UTF-8 name"),
            }
            TreeWalkResult::Ok
        })?;

        debug!(revision, files = files.len(), "listed tree");
        Ok(files)
    }

    /// A `History` backed by the `git` executable for `revision`.
    pub fn history(&self, revision: &str) -> GitCli {
        GitCli {
            root: self.root.clone(),
            revision: revision.to_string(),
        }
    }
}

/// Runs `git blame` / `git log` as subprocesses inside the repository.
pub struct GitCli {
    root: PathBuf,
    revision: String,
}

impl GitCli {
    fn run(&self, args: &[&OsStr]) -> Result<String> {
        let output = Command::new("git")
            .args(args)
            .current_dir(&self.root)
            .output()?;

        if output.status.success() {
            Ok(String::from_utf8_lossy(&output.stdout).into_owned())
        } else {
            let args: Vec<_> = args.iter().map(|a| a.to_string_lossy()).collect();
            let command = format!("git {}", args.join(" "));
            Err(Error::Tool {
                command,
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

impl History for GitCli {
    fn blame(&self, path: &Path) -> Result<Vec<String>> {
        let out = self.run(&[
            OsStr::new("blame"),
            OsStr::new("--porcelain"),
            OsStr::new(&self.revision),
            OsStr::new("--"),
            path.as_os_str(),
        ])?;
        Ok(out.lines().map(str::to_string).collect())
    }

    fn last_commit(&self, path: &Path, identity: Identity) -> Result<(CommitId, AuthorName)> {
        let out = self.run(&[
            OsStr::new("log"),
            OsStr::new("-1"),
            OsStr::new(identity.log_format()),
            OsStr::new(&self.revision),
            OsStr::new("--"),
            path.as_os_str(),
        ])?;
        parse_log_line(path, &out)
    }
}

/// Split the first `<hash> <name>` line of `git log` output.
pub fn parse_log_line(path: &Path, output: &str) -> Result<(CommitId, AuthorName)> {
    output
        .lines()
        .next()
        .and_then(|line| line.split_once(' '))
        .filter(|(hash, _)| !hash.is_empty())
        .map(|(hash, name)| (hash.to_string(), name.to_string()))
        .ok_or_else(|| Error::MalformedLog {
            path: path.to_path_buf(),
            output: output.to_string(),
        })
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
