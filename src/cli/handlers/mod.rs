//! Command handlers for the CLI.

mod completions;
mod info;
mod list;
mod show;

use anyhow::{Context, Result, bail};
use regex::Regex;
use std::path::{Path, PathBuf};

use crate::cli::FilterArgs;
use crate::domain::{Note, TagFilter, split_tag_list};
use crate::infra::{Extractor, scan_notes_directory};
use crate::provenance::GitHistory;

// Re-export public items
pub use completions::handle_completions;
pub use info::handle_info;
pub use list::handle_list;
pub use show::handle_show;

// ===========================================
// Shared Utilities
// ===========================================

/// Notes read from the notes root, plus the number of files that failed.
pub(crate) struct LoadedNotes {
    pub notes: Vec<Note>,
    pub failed: usize,
}

impl LoadedNotes {
    /// Fails if any file could not be read. Called after output is printed.
    pub(crate) fn finish(&self) -> Result<()> {
        if self.failed > 0 {
            bail!("{} file(s) could not be read", self.failed);
        }
        Ok(())
    }
}

/// Reads every note under `root` (or under `paths` within it).
///
/// Last-update times come from the git repository containing `root`; when
/// there is none the notes are still returned, undated. Files that fail to
/// parse are logged and counted, and the remaining files are still read.
pub(crate) fn load_notes(root: &Path, paths: &[PathBuf]) -> Result<LoadedNotes> {
    for path in paths {
        if !root.join(path).exists() {
            bail!("path not found under {}: {}", root.display(), path.display());
        }
    }

    let files = scan_notes_directory(root, paths)
        .with_context(|| format!("failed to scan notes root: {}", root.display()))?;

    let history = match GitHistory::discover(root) {
        Ok(history) => Some(history),
        Err(e) => {
            tracing::warn!(error = %e, "last update times unavailable");
            None
        }
    };
    let extractor = match &history {
        Some(history) => Extractor::with_history(history),
        None => Extractor::new(),
    };

    let extraction = extractor.extract_all(root, &files);
    for failure in &extraction.failures {
        tracing::error!(path = %failure.path().display(), error = %failure, "skipping file");
    }
    tracing::info!(
        files = files.len(),
        notes = extraction.notes.len(),
        failed = extraction.failures.len(),
        "loaded notes"
    );

    Ok(LoadedNotes {
        notes: extraction.notes,
        failed: extraction.failures.len(),
    })
}

/// Compiled id, title and tag filters from the command line.
#[derive(Debug, Default)]
pub(crate) struct NoteFilter {
    id: Option<Regex>,
    title: Option<Regex>,
    tags: TagFilter,
}

impl NoteFilter {
    pub(crate) fn from_args(args: &FilterArgs) -> Result<Self> {
        let id = compile(args.xid.as_deref()).context("invalid --xid regex")?;
        let title = compile(args.xtitle.as_deref()).context("invalid --xtitle regex")?;
        let tags = TagFilter::new()
            .all(split_all(&args.tags))
            .any(split_all(&args.any_tags))
            .none(split_all(&args.none_tags));

        Ok(Self { id, title, tags })
    }

    pub(crate) fn matches(&self, note: &Note) -> bool {
        self.tags.matches(note.tags())
            && self.id.as_ref().is_none_or(|re| re.is_match(note.id()))
            && self.title.as_ref().is_none_or(|re| re.is_match(note.title()))
    }
}

fn compile(pattern: Option<&str>) -> Result<Option<Regex>, regex::Error> {
    pattern.map(Regex::new).transpose()
}

fn split_all(values: &[String]) -> Vec<String> {
    values.iter().flat_map(|v| split_tag_list(v)).collect()
}

/// Truncates a string to a maximum display width, adding ellipsis if needed.
pub(crate) fn truncate_str(s: &str, max_width: usize) -> String {
    if s.chars().count() <= max_width {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_width.saturating_sub(1)).collect();
        format!("{}…", truncated)
    }
}
