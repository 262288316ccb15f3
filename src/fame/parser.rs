use std::collections::HashMap;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};
use crate::git::{History, Identity};

pub type CommitId = String;
pub type AuthorName = String;

/// Ownership facts for one file, as decoded from its blame stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileBlame {
    pub path: PathBuf,
    /// Commits whose identity block appeared in this file's stream.
    pub identities: HashMap<CommitId, AuthorName>,
    /// Lines owned by each commit in this file, summed over all its runs.
    pub lines: HashMap<CommitId, usize>,
}

impl FileBlame {
    pub fn total_lines(&self) -> usize {
        self.lines.values().sum()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    /// Next line is a `<commit> <orig> <final> [<count>]` header.
    ExpectHeader,
    /// Inside the metadata block of a run-opening header, waiting for the
    /// identity line.
    ExpectMetadata,
    /// Identity found (or not expected); skip until the tab-prefixed line.
    ExpectContent,
}

/// Line-at-a-time decoder for `git blame --porcelain` output.
///
/// `remaining` counts the lines still owed by the currently open run. It
/// survives across chunks: only a header seen with `remaining == 0` opens a
/// new run and must carry a run length.
pub struct RecordParser<'a> {
    path: &'a Path,
    prefix: &'static str,
    state: State,
    remaining: usize,
    commit: Option<CommitId>,
    line_no: usize,
    identities: HashMap<CommitId, AuthorName>,
    lines: HashMap<CommitId, usize>,
}

impl<'a> RecordParser<'a> {
    pub fn new(path: &'a Path, identity: Identity) -> Self {
        Self {
            path,
            prefix: identity.prefix(),
            state: State::ExpectHeader,
            remaining: 0,
            commit: None,
            line_no: 0,
            identities: HashMap::new(),
            lines: HashMap::new(),
        }
    }

    pub fn feed(&mut self, line: &str) -> Result<()> {
        self.line_no += 1;
        match self.state {
            State::ExpectHeader => self.header(line),
            State::ExpectMetadata => {
                if line.starts_with('\t') {
                    self.state = State::ExpectHeader;
                } else if let Some(name) = line.strip_prefix(self.prefix) {
                    self.resolve(name)?;
                    self.state = State::ExpectContent;
                }
                Ok(())
            }
            State::ExpectContent => {
                if line.starts_with('\t') {
                    self.state = State::ExpectHeader;
                }
                Ok(())
            }
        }
    }

    pub fn finish(self) -> Result<FileBlame> {
        if self.state != State::ExpectHeader || self.remaining != 0 {
            return Err(Error::MalformedRecord {
                path: self.path.to_path_buf(),
                line: self.line_no,
                reason: format!(
                    "stream ended inside a run ({} line(s) still expected)",
                    self.remaining + usize::from(self.state != State::ExpectHeader)
                ),
            });
        }
        Ok(FileBlame {
            path: self.path.to_path_buf(),
            identities: self.identities,
            lines: self.lines,
        })
    }

    fn header(&mut self, line: &str) -> Result<()> {
        let fields: Vec<&str> = line.split(' ').collect();
        if fields.len() < 3 || fields[0].is_empty() || line.starts_with('\t') {
            return Err(
                self.malformed("expected `<commit> <orig-line> <final-line> [<count>]`")
            );
        }
        let commit = fields[0];

        if self.remaining == 0 {
            let run = fields
                .get(3)
                .ok_or_else(|| self.malformed("run-opening header without a line count"))?
                .parse::<usize>()
                .map_err(|e| self.malformed(&format!("bad line count: {e}")))?;
            if run == 0 {
                return Err(self.malformed("line count must be positive"));
            }
            self.remaining = run;
            *self.lines.entry(commit.to_string()).or_insert(0) += run;
            self.commit = Some(commit.to_string());
            self.state = State::ExpectMetadata;
        } else {
            if self.commit.as_deref() != Some(commit) {
                return Err(self.malformed(&format!(
                    "run of {} interrupted by {commit}",
                    self.commit.as_deref().unwrap_or("?")
                )));
            }
            self.state = State::ExpectContent;
        }

        self.remaining -= 1;
        Ok(())
    }

    fn resolve(&mut self, name: &str) -> Result<()> {
        let Some(commit) = self.commit.clone() else {
            return Err(self.malformed("identity line before any header"));
        };
        match self.identities.get(&commit) {
            Some(first) if first != name => Err(Error::ConflictingIdentity {
                commit,
                first: first.clone(),
                second: name.to_string(),
            }),
            Some(_) => Ok(()),
            None => {
                self.identities.insert(commit, name.to_string());
                Ok(())
            }
        }
    }

    fn malformed(&self, reason: &str) -> Error {
        Error::MalformedRecord {
            path: self.path.to_path_buf(),
            line: self.line_no,
            reason: reason.to_string(),
        }
    }
}

/// Decode a complete blame stream for one file.
pub fn parse_blame<S: AsRef<str>>(
    path: &Path,
    stream: &[S],
    identity: Identity,
) -> Result<FileBlame> {
    let mut parser = RecordParser::new(path, identity);
    for line in stream {
        parser.feed(line.as_ref())?;
    }
    parser.finish()
}

/// A file without blame output (e.g. an empty file) is attributed to the
/// commit that last touched it, with zero lines.
pub fn last_touch(path: &Path, commit: CommitId, name: AuthorName) -> FileBlame {
    FileBlame {
        path: path.to_path_buf(),
        lines: HashMap::from([(commit.clone(), 0)]),
        identities: HashMap::from([(commit, name)]),
    }
}

/// Blame one file through `history`, falling back to the last-touch
/// lookup when the stream is empty.
pub fn blame_file(history: &dyn History, path: &Path, identity: Identity) -> Result<FileBlame> {
    let stream = history.blame(path)?;
    if stream.is_empty() {
        let (commit, name) = history.last_commit(path, identity)?;
        debug!(path = %path.display(), %commit, "empty blame, using last commit");
        return Ok(last_touch(path, commit, name));
    }

    let blame = parse_blame(path, &stream, identity)?;
    debug!(
        path = %path.display(),
        lines = blame.total_lines(),
        commits = blame.lines.len(),
        "parsed blame"
    );
    Ok(blame)
}

#[cfg(test)]
#[path = "parser_test.rs"]
mod tests;
