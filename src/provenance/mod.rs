//! Last-modified times for note line ranges, from version-control blame.
//!
//! [`History`] is the narrow view of a repository the resolver needs;
//! [`GitHistory`] implements it on top of `git2`.

mod git;
mod resolver;

pub use git::GitHistory;
pub use resolver::{FileProvenance, last_update, max_in_range};

use chrono::{DateTime, Utc};
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Identifies a commit in the history store.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommitRef(String);

impl CommitRef {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommitRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Attribution of one line of a file to the time it was last changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlameLine {
    /// 1-based line number in the blamed revision.
    pub line: usize,
    pub timestamp: DateTime<Utc>,
}

/// Read access to file history.
///
/// Paths are relative to the notes root. Implementations are not required to
/// be re-entrant; callers sharing one across threads must serialize access.
pub trait History {
    /// The most recent commit that changed `path`.
    fn most_recent_commit_touching(&self, path: &Path) -> Result<CommitRef, ProvenanceError>;

    /// Per-line attribution of `path` as of `commit`, ordered by line.
    fn blame(&self, commit: &CommitRef, path: &Path) -> Result<Vec<BlameLine>, ProvenanceError>;
}

/// Failure to resolve a last-modified time. Never fatal to extraction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProvenanceError {
    #[error("cannot open repository at {path}: {message}")]
    Repository { path: PathBuf, message: String },

    #[error("no commit touches {path}")]
    NoHistory { path: PathBuf },

    #[error("cannot read history of {path}: {message}")]
    History { path: PathBuf, message: String },

    #[error("cannot blame {path} at {commit}: {message}")]
    Blame {
        path: PathBuf,
        commit: CommitRef,
        message: String,
    },

    #[error("commit time out of range: {seconds}")]
    InvalidTimestamp { seconds: i64 },

    #[error("invalid line range {start}..={end}: blame has {lines} line(s)")]
    LineRangeOutOfBounds {
        start: usize,
        end: usize,
        lines: usize,
    },
}
