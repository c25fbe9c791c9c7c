//! Reduces per-line blame to one last-modified instant per line range.

use super::{BlameLine, History, ProvenanceError};
use chrono::{DateTime, Utc};
use std::cell::OnceCell;
use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

/// Latest modification among `lines` (1-based, inclusive) of `path`.
///
/// Blames the file as of the most recent commit touching it and takes the
/// maximum line timestamp, not the commit's own time, so content carried in
/// from older edits keeps its real age.
///
/// # Errors
///
/// Returns `ProvenanceError` if the path has no history, blame fails, or the
/// range does not fit in the blamed file.
pub fn last_update<H: History + ?Sized>(
    history: &H,
    path: &Path,
    lines: RangeInclusive<usize>,
) -> Result<DateTime<Utc>, ProvenanceError> {
    let commit = history.most_recent_commit_touching(path)?;
    let blame = history.blame(&commit, path)?;
    max_in_range(&blame, lines)
}

/// Maximum timestamp over `lines` (1-based, inclusive) of a blame.
///
/// # Errors
///
/// Returns `ProvenanceError::LineRangeOutOfBounds` if the range is empty,
/// starts at 0, or ends past the last blamed line.
pub fn max_in_range(
    blame: &[BlameLine],
    lines: RangeInclusive<usize>,
) -> Result<DateTime<Utc>, ProvenanceError> {
    let (start, end) = (*lines.start(), *lines.end());
    let out_of_bounds = ProvenanceError::LineRangeOutOfBounds {
        start,
        end,
        lines: blame.len(),
    };

    if start == 0 || end < start || end > blame.len() {
        return Err(out_of_bounds);
    }

    blame[start - 1..end]
        .iter()
        .map(|line| line.timestamp)
        .max()
        .ok_or(out_of_bounds)
}

/// Provenance for the notes of one file.
///
/// The file is blamed once, on the first request; every later range is
/// answered from that result. A failed blame is returned for every request.
pub struct FileProvenance<'h> {
    history: &'h dyn History,
    path: PathBuf,
    blame: OnceCell<Result<Vec<BlameLine>, ProvenanceError>>,
}

impl<'h> FileProvenance<'h> {
    pub fn new(history: &'h dyn History, path: impl Into<PathBuf>) -> Self {
        Self {
            history,
            path: path.into(),
            blame: OnceCell::new(),
        }
    }

    /// Latest modification among `lines` of this file.
    pub fn last_update(
        &self,
        lines: RangeInclusive<usize>,
    ) -> Result<DateTime<Utc>, ProvenanceError> {
        let blame = self.blame.get_or_init(|| {
            let commit = self.history.most_recent_commit_touching(&self.path)?;
            self.history.blame(&commit, &self.path)
        });

        match blame {
            Ok(blame) => max_in_range(blame, lines),
            Err(e) => Err(e.clone()),
        }
    }
}
