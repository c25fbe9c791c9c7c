//! Info command handler.

use anyhow::Result;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::Path;

use super::{NoteFilter, load_notes};
use crate::cli::InfoArgs;
use crate::cli::output::{InfoSummary, Output, OutputFormat, TagListing};
use crate::domain::Note;

pub fn handle_info(args: &InfoArgs, root: &Path) -> Result<()> {
    let filter = NoteFilter::from_args(&args.filter)?;
    let loaded = load_notes(root, &args.filter.paths)?;
    let notes: Vec<&Note> = loaded.notes.iter().filter(|n| filter.matches(n)).collect();

    match args.format {
        OutputFormat::Human => {
            let summary = summarize(&notes);
            println!("Notes: {}", summary.notes);
            println!("Tags:");
            for tag in &summary.tags {
                println!("\t{}: {}", tag.name, tag.count);
            }
        }
        OutputFormat::Json => {
            let output = Output::new(summarize(&notes));
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Paths => {
            // Files holding at least one matching note
            let files: BTreeSet<_> = notes.iter().map(|n| n.source().absolute()).collect();
            for file in files {
                println!("{}", file.display());
            }
        }
    }

    loaded.finish()
}

/// Counts notes, and for each tag the notes carrying it, sorted by tag.
pub(crate) fn summarize(notes: &[&Note]) -> InfoSummary {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for note in notes {
        let distinct: HashSet<&str> = note.tags().iter().map(String::as_str).collect();
        for tag in distinct {
            *counts.entry(tag).or_default() += 1;
        }
    }

    InfoSummary {
        notes: notes.len(),
        tags: counts
            .into_iter()
            .map(|(name, count)| TagListing {
                name: name.to_string(),
                count,
            })
            .collect(),
    }
}
