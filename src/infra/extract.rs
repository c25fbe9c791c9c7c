//! Turns note files into [`Note`]s with extents and last-update times.

use std::ops::RangeInclusive;
use std::path::{Path, PathBuf};

use crate::domain::{FileStats, Note, SourceFile, StartPosition, infer_extents};
use crate::infra::fs::{ExtractError, Format, read_source};
use crate::infra::{MarkdownOutcome, ParseError, parse_markdown_note, parse_yaml_notes};
use crate::provenance::{FileProvenance, History};

const BOM: char = '\u{FEFF}';

/// Notes from many files, with the files that could not be read.
#[derive(Debug, Default)]
pub struct Extraction {
    pub notes: Vec<Note>,
    pub failures: Vec<ExtractError>,
}

/// Extracts notes from files, attaching provenance when a history is given.
///
/// Without a history every note's `last_update` is `None`.
#[derive(Clone, Copy, Default)]
pub struct Extractor<'h> {
    history: Option<&'h dyn History>,
}

impl<'h> Extractor<'h> {
    pub fn new() -> Self {
        Self { history: None }
    }

    pub fn with_history(history: &'h dyn History) -> Self {
        Self {
            history: Some(history),
        }
    }

    /// Extracts the notes of `relative`, a path under `root`.
    ///
    /// # Errors
    ///
    /// Returns `ExtractError` if the extension is not a note format, the file
    /// cannot be read, or its structure does not parse.
    pub fn extract_file(&self, root: &Path, relative: &Path) -> Result<Vec<Note>, ExtractError> {
        let source = SourceFile::new(root, relative);
        let format = Format::from_path(relative).ok_or_else(|| ExtractError::UnsupportedFormat {
            path: source.absolute().to_path_buf(),
        })?;

        let content = read_source(source.absolute())?;
        self.extract_content(source, format, &content)
    }

    /// Extracts every file in `files`, continuing past files that fail.
    pub fn extract_all(&self, root: &Path, files: &[PathBuf]) -> Extraction {
        let mut extraction = Extraction::default();
        for relative in files {
            match self.extract_file(root, relative) {
                Ok(notes) => {
                    tracing::debug!(path = %relative.display(), notes = notes.len(), "extracted");
                    extraction.notes.extend(notes);
                }
                Err(e) => extraction.failures.push(e),
            }
        }
        extraction
    }

    /// Extracts notes from already-read file content.
    ///
    /// # Errors
    ///
    /// Returns `ExtractError::Parse` if the content does not parse as `format`.
    pub fn extract_content(
        &self,
        source: SourceFile,
        format: Format,
        content: &str,
    ) -> Result<Vec<Note>, ExtractError> {
        let parse_err = |source_err: ParseError| ExtractError::Parse {
            path: source.absolute().to_path_buf(),
            source: source_err,
        };
        // Measured over the raw bytes; parsers see the text after any byte order mark
        let stats = FileStats::measure(content.as_bytes());
        let (bom, text) = match content.strip_prefix(BOM) {
            Some(rest) => (BOM.len_utf8(), rest),
            None => (0, content),
        };
        let provenance = self
            .history
            .map(|history| FileProvenance::new(history, source.relative()));

        match format {
            Format::Yaml => {
                let parsed = parse_yaml_notes(text).map_err(parse_err)?;
                let starts: Vec<_> = parsed
                    .iter()
                    .map(|note| StartPosition {
                        offset: note.start.offset + bom,
                        ..note.start
                    })
                    .collect();
                let extents = infer_extents(&starts, stats);

                let notes = parsed
                    .into_iter()
                    .zip(extents)
                    .map(|(note, extent)| {
                        let range = extent.start_line..=extent.end_line;
                        let last_update = resolve(provenance.as_ref(), source.relative(), range);
                        Note::from_yaml(note.meta, source.clone(), note.start.line, extent, last_update)
                    })
                    .collect();
                Ok(notes)
            }
            Format::Markdown => match parse_markdown_note(text).map_err(parse_err)? {
                MarkdownOutcome::NotANote => {
                    tracing::trace!(path = %source.relative().display(), "no front matter");
                    Ok(Vec::new())
                }
                MarkdownOutcome::Note { meta, body } => {
                    let last_update = resolve(provenance.as_ref(), source.relative(), 1..=stats.lines);
                    Ok(vec![Note::from_markdown(meta, body, source, last_update)])
                }
            },
        }
    }
}

/// Looks up the last update of `lines`, logging and dropping any failure.
fn resolve(
    provenance: Option<&FileProvenance<'_>>,
    path: &Path,
    lines: RangeInclusive<usize>,
) -> Option<chrono::DateTime<chrono::Utc>> {
    let provenance = provenance?;
    let (start, end) = (*lines.start(), *lines.end());
    match provenance.last_update(lines) {
        Ok(timestamp) => Some(timestamp),
        Err(e) => {
            tracing::warn!(path = %path.display(), start, end, error = %e, "no last update");
            None
        }
    }
}
