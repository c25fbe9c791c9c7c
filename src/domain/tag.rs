//! Tag membership filter for notes.

use std::collections::HashSet;

/// A tag filter with three independent lists.
///
/// A note passes when:
/// - it has every tag in `all` (vacuously true when empty),
/// - it has at least one tag in `any`, if `any` is non-empty,
/// - it has none of the tags in `none`.
///
/// Tags compare exactly; duplicates in either the filter or the note are
/// treated as a set.
///
/// # Examples
///
/// ```
/// use notegit::domain::TagFilter;
///
/// let filter = TagFilter::new().all(["a", "b"]);
/// assert!(filter.matches(["a", "b", "c"]));
/// assert!(!filter.matches(["a"]));
///
/// assert!(TagFilter::new().matches(Vec::<String>::new()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagFilter {
    all: Vec<String>,
    any: Vec<String>,
    none: Vec<String>,
}

impl TagFilter {
    /// Creates a filter that accepts every note.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requires every one of `tags`.
    pub fn all<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.all.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Requires at least one of `tags`.
    pub fn any<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.any.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Rejects notes having any of `tags`.
    pub fn none<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.none.extend(tags.into_iter().map(Into::into));
        self
    }

    /// Evaluates the filter against a note's tags.
    pub fn matches<I, S>(&self, tags: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let owned: Vec<S> = tags.into_iter().collect();
        let present: HashSet<&str> = owned.iter().map(|t| t.as_ref()).collect();

        if !self.all.iter().all(|t| present.contains(t.as_str())) {
            return false;
        }

        if !self.any.is_empty() && !self.any.iter().any(|t| present.contains(t.as_str())) {
            return false;
        }

        !self.none.iter().any(|t| present.contains(t.as_str()))
    }
}

/// Splits a comma-separated tag list, dropping empty entries.
///
/// `"a, b,,c"` yields `["a", "b", "c"]`.
pub fn split_tag_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}
