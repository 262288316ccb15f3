use std::collections::{HashMap, HashSet};
use std::path::PathBuf;

use super::parser::{AuthorName, CommitId, FileBlame};
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Statistics {
    pub lines: usize,
    pub commits: usize,
    pub files: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedAuthor {
    pub name: AuthorName,
    pub stats: Statistics,
}

/// Repository-wide figures for the report footer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub files: usize,
    pub lines: usize,
    pub commits: usize,
}

/// Run-scoped merge of per-file blame results.
///
/// Identity resolution is global: a commit described in one file may show
/// up bare in another. Commits seen before their identity is known wait in
/// `pending` together with the files they touched, so the final tables do
/// not depend on merge order.
#[derive(Debug, Default)]
pub struct Aggregator {
    author_commits: HashMap<AuthorName, HashSet<CommitId>>,
    commit_lines: HashMap<CommitId, usize>,
    author_files: HashMap<AuthorName, HashSet<PathBuf>>,
    identities: HashMap<CommitId, AuthorName>,
    pending: HashMap<CommitId, HashSet<PathBuf>>,
    files: usize,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one file into the tables. Either every table is updated or,
    /// on a conflicting identity, none is.
    pub fn merge(&mut self, file: FileBlame) -> Result<()> {
        for (commit, name) in &file.identities {
            if let Some(known) = self.identities.get(commit)
                && known != name
            {
                return Err(Error::ConflictingIdentity {
                    commit: commit.clone(),
                    first: known.clone(),
                    second: name.clone(),
                });
            }
        }

        for (commit, name) in file.identities {
            if self.identities.contains_key(&commit) {
                continue;
            }
            if let Some(paths) = self.pending.remove(&commit) {
                self.author_commits
                    .entry(name.clone())
                    .or_default()
                    .insert(commit.clone());
                self.author_files
                    .entry(name.clone())
                    .or_default()
                    .extend(paths);
            }
            self.identities.insert(commit, name);
        }

        for (commit, lines) in file.lines {
            *self.commit_lines.entry(commit.clone()).or_insert(0) += lines;
            match self.identities.get(&commit) {
                Some(name) => {
                    self.author_files
                        .entry(name.clone())
                        .or_default()
                        .insert(file.path.clone());
                    self.author_commits
                        .entry(name.clone())
                        .or_default()
                        .insert(commit);
                }
                None => {
                    self.pending
                        .entry(commit)
                        .or_default()
                        .insert(file.path.clone());
                }
            }
        }

        self.files += 1;
        Ok(())
    }

    /// Fails if some commit owns lines but no merged file ever named its
    /// author.
    pub fn ensure_resolved(&self) -> Result<()> {
        match self.pending.keys().min() {
            Some(commit) => Err(Error::UnresolvedCommit(commit.clone())),
            None => Ok(()),
        }
    }

    /// Per-author statistics, in no particular order.
    pub fn reduce(&self) -> Vec<RankedAuthor> {
        self.author_commits
            .iter()
            .map(|(name, commits)| RankedAuthor {
                name: name.clone(),
                stats: Statistics {
                    lines: commits
                        .iter()
                        .map(|c| self.commit_lines.get(c).copied().unwrap_or(0))
                        .sum(),
                    commits: commits.len(),
                    files: self.author_files.get(name).map_or(0, HashSet::len),
                },
            })
            .collect()
    }

    pub fn totals(&self) -> Totals {
        Totals {
            files: self.files,
            lines: self.commit_lines.values().sum(),
            commits: self.commit_lines.len(),
        }
    }
}

#[cfg(test)]
#[path = "aggregator_test.rs"]
mod tests;
