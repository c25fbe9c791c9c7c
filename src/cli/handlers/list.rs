//! List command handler.

use anyhow::{Result, anyhow};
use std::fmt::Write as _;
use std::path::Path;

use super::{NoteFilter, load_notes, truncate_str};
use crate::cli::ListArgs;
use crate::cli::config::TableWidths;
use crate::cli::date_filter::DateFilter;
use crate::cli::output::{NoteListing, Output, OutputFormat};
use crate::domain::Note;

pub fn handle_list(args: &ListArgs, root: &Path, widths: TableWidths) -> Result<()> {
    let filter = NoteFilter::from_args(&args.filter)?;
    let dates = DateFilter::parse(args.since.as_deref(), args.until.as_deref())
        .map_err(|e| anyhow!("invalid date filter: {}", e))?;
    if !dates.is_empty() {
        tracing::debug!(since = ?dates.since(), until = ?dates.until(), "date filter");
    }
    let widths = TableWidths {
        id_width: args.id_width.unwrap_or(widths.id_width),
        title_width: args.title_width.unwrap_or(widths.title_width),
        tags_width: args.tags_width.unwrap_or(widths.tags_width),
    };

    let loaded = load_notes(root, &args.filter.paths)?;
    let notes: Vec<&Note> = loaded
        .notes
        .iter()
        .filter(|n| filter.matches(n) && dates.matches(n.last_update()))
        .collect();

    match args.format {
        OutputFormat::Human => {
            if notes.is_empty() {
                println!("No notes found.");
            } else {
                print!("{}", render_table(&notes, widths, args.links));
                println!();
                println!("{} note(s)", notes.len());
            }
        }
        OutputFormat::Json => {
            let listings: Vec<NoteListing> = notes
                .iter()
                .map(|n| NoteListing::from_note(n, args.links))
                .collect();
            let output = Output::new(listings);
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Paths => {
            for note in &notes {
                println!("{}", note.open_ref());
            }
        }
    }

    loaded.finish()
}

/// Renders notes as a table with `ID`, `TITLE`, `TAGS` and `PATH` columns.
///
/// With `links`, each row is followed by its note's links drawn as a tree.
pub(crate) fn render_table(notes: &[&Note], widths: TableWidths, links: bool) -> String {
    let TableWidths {
        id_width,
        title_width,
        tags_width,
    } = widths;
    let mut out = String::new();

    let _ = writeln!(
        out,
        "{:<id_width$}  {:<title_width$}  {:<tags_width$}  PATH",
        "ID", "TITLE", "TAGS"
    );
    let _ = writeln!(out, "{}", "-".repeat(id_width + title_width + tags_width + 50));

    for note in notes {
        let title = truncate_str(note.title(), title_width);
        let tags = truncate_str(&note.tags().join(", "), tags_width);
        let _ = writeln!(
            out,
            "{:<id_width$}  {:<title_width$}  {:<tags_width$}  {}",
            note.id(),
            title,
            tags,
            note.open_ref()
        );

        if links {
            let targets = note.links();
            for (i, target) in targets.iter().enumerate() {
                let branch = if i + 1 == targets.len() { "└─" } else { "├─" };
                let _ = writeln!(out, "{} {}", branch, target);
            }
        }
    }

    out
}
