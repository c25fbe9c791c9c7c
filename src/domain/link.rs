//! Inline `[[note-id]]` references between notes.

use regex::Regex;
use std::sync::LazyLock;

/// Matches `[[identifier]]`; the identifier may not contain brackets.
static LINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[\[([^\[\]]+)\]\]").expect("link pattern is valid"));

/// Extracts the ids referenced with `[[id]]` from a note body.
///
/// Ids are returned in order of appearance, duplicates included. Referenced
/// ids are not checked against any known note.
///
/// # Examples
///
/// ```
/// use notegit::domain::extract_links;
///
/// let links = extract_links("see [[note-1]] and [[note-2]]");
/// assert_eq!(links, vec!["note-1", "note-2"]);
///
/// assert!(extract_links("no links here").is_empty());
/// ```
pub fn extract_links(body: &str) -> Vec<String> {
    LINK_PATTERN
        .captures_iter(body)
        .map(|caps| caps[1].to_string())
        .collect()
}
