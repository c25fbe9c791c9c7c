//! Builder for test notes, rendered as YAML entries or Markdown files.

// Allow dead code since this is a test utility shared by several test crates
#![allow(dead_code)]

/// Builder for creating test notes.
#[derive(Debug, Clone)]
pub struct TestNote {
    id: String,
    title: Option<String>,
    tags: Vec<String>,
    body: Option<String>,
}

impl TestNote {
    /// Creates a new test note with the given id.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            tags: Vec::new(),
            body: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Adds a tag.
    pub fn tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    pub fn body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Renders the note as one entry of a `notes:` sequence.
    pub fn to_yaml_entry(&self) -> String {
        let mut out = format!("  - id: {}\n", self.id);
        if let Some(title) = &self.title {
            out.push_str(&format!("    title: {}\n", title));
        }
        if !self.tags.is_empty() {
            out.push_str(&format!("    tags: [{}]\n", self.tags.join(", ")));
        }
        if let Some(body) = &self.body {
            out.push_str("    note: |\n");
            for line in body.lines() {
                out.push_str(&format!("      {}\n", line));
            }
        }
        out
    }

    /// Renders the note as a Markdown file with front matter.
    pub fn to_markdown(&self) -> String {
        let mut out = format!("---\nid: {}\n", self.id);
        if let Some(title) = &self.title {
            out.push_str(&format!("title: {}\n", title));
        }
        if !self.tags.is_empty() {
            out.push_str(&format!("tags: [{}]\n", self.tags.join(", ")));
        }
        out.push_str("---\n");
        if let Some(body) = &self.body {
            out.push_str(body);
            if !body.ends_with('\n') {
                out.push('\n');
            }
        }
        out
    }
}

/// Renders notes as a complete multi-note YAML file.
pub fn yaml_file(notes: &[TestNote]) -> String {
    let mut out = String::from("notes:\n");
    for note in notes {
        out.push_str(&note.to_yaml_entry());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn yaml_entry_includes_set_fields() {
        let note = TestNote::new("a").title("A").tag("x").tag("y").body("see [[b]]");
        assert_eq!(
            note.to_yaml_entry(),
            "  - id: a\n    title: A\n    tags: [x, y]\n    note: |\n      see [[b]]\n"
        );
    }

    #[test]
    fn markdown_has_front_matter() {
        let note = TestNote::new("m").title("M").body("Body");
        assert_eq!(note.to_markdown(), "---\nid: m\ntitle: M\n---\nBody\n");
    }
}
