//! Output format types for CLI commands.

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use serde::Serialize;

use crate::domain::{Extent, Note, Origin};

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for programmatic consumption
    Json,
    /// Open references (`path:line`), one per line
    Paths,
}

/// Wrapper for serializable command output.
#[derive(Debug, Serialize)]
pub struct Output<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> Output<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// A single note in listing output.
#[derive(Debug, Serialize)]
pub struct NoteListing {
    pub id: String,
    pub title: String,
    pub tags: Vec<String>,
    pub path: String,
    pub open_ref: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extent: Option<Extent>,
    pub last_update: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<Vec<String>>,
}

impl NoteListing {
    pub fn from_note(note: &Note, with_links: bool) -> Self {
        let extent = match note.origin() {
            Origin::Yaml { extent, .. } => Some(extent),
            Origin::Markdown => None,
        };

        Self {
            id: note.id().to_string(),
            title: note.title().to_string(),
            tags: note.tags().to_vec(),
            path: note.source().relative().to_string_lossy().to_string(),
            open_ref: note.open_ref(),
            extent,
            last_update: note.last_update(),
            links: with_links.then(|| note.links().to_vec()),
        }
    }
}

/// A tag with its note count.
#[derive(Debug, Serialize)]
pub struct TagListing {
    pub name: String,
    pub count: usize,
}

/// Summary of a set of notes.
#[derive(Debug, Serialize)]
pub struct InfoSummary {
    pub notes: usize,
    pub tags: Vec<TagListing>,
}
