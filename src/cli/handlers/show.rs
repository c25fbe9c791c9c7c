//! Show command handler.

use anyhow::{Context, Result, bail};
use std::io::{self, Write};
use std::path::Path;

use super::load_notes;
use crate::cli::ShowArgs;
use crate::domain::{Note, Origin};
use crate::infra::read_source;

pub fn handle_show(args: &ShowArgs, root: &Path) -> Result<()> {
    let loaded = load_notes(root, &[])?;
    let matching: Vec<&Note> = loaded.notes.iter().filter(|n| n.id() == args.id).collect();

    if matching.is_empty() {
        loaded.finish()?;
        bail!("note not found: '{}'", args.id);
    }
    if matching.len() > 1 {
        tracing::info!(id = %args.id, count = matching.len(), "id is not unique");
    }

    let mut stdout = io::stdout().lock();
    for note in matching {
        let source = note_source(note)?;
        stdout.write_all(source.as_bytes())?;
        if !source.ends_with('\n') {
            writeln!(stdout)?;
        }
    }

    loaded.finish()
}

/// The text of `note` as written in its file.
///
/// A Markdown note is its whole file. A YAML note runs from its mapping's
/// first line to the end of its extent, so leading `notes:` and comments owned
/// by the first note are left out.
pub(crate) fn note_source(note: &Note) -> Result<String> {
    let path = note.source().absolute();
    let content =
        read_source(path).with_context(|| format!("failed to read note: {}", path.display()))?;

    match note.origin() {
        Origin::Markdown => Ok(content),
        Origin::Yaml { line, extent } => {
            let leading = line.saturating_sub(extent.start_line);
            Ok(content
                .split_inclusive('\n')
                .skip(line.saturating_sub(1))
                .take(extent.line_count().saturating_sub(leading))
                .collect())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::Extractor;
    use pretty_assertions::assert_eq;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn yaml_note_source_is_its_own_lines() {
        let dir = TempDir::new().unwrap();
        let content = "# my notes\nnotes:\n  - id: a\n    title: A\n  - id: b\n    title: B\n";
        fs::write(dir.path().join("n.yaml"), content).unwrap();

        let notes = Extractor::new()
            .extract_file(dir.path(), Path::new("n.yaml"))
            .unwrap();

        assert_eq!(note_source(&notes[0]).unwrap(), "  - id: a\n    title: A\n");
        assert_eq!(note_source(&notes[1]).unwrap(), "  - id: b\n    title: B\n");
    }

    #[test]
    fn markdown_note_source_is_whole_file() {
        let dir = TempDir::new().unwrap();
        let content = "---\nid: m\n---\n# Body\n";
        fs::write(dir.path().join("m.md"), content).unwrap();

        let notes = Extractor::new()
            .extract_file(dir.path(), Path::new("m.md"))
            .unwrap();

        assert_eq!(note_source(&notes[0]).unwrap(), content);
    }
}
