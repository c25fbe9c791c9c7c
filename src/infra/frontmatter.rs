//! Front matter splitting and Markdown note parsing.

use crate::domain::NoteMeta;
use crate::infra::ParseError;

const DELIMITER: &str = "---";

/// A front matter block and the body that follows it, borrowed from the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrontMatter<'a> {
    /// Text between the delimiter lines.
    pub yaml: &'a str,
    /// Everything after the closing delimiter line.
    pub body: &'a str,
}

/// Outcome of parsing a Markdown file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MarkdownOutcome {
    /// The file carries a note in its front matter.
    Note { meta: NoteMeta, body: String },
    /// The file does not start with a front matter delimiter. Not an error.
    NotANote,
}

/// Splits `content` into front matter and body.
///
/// # Format
/// ```text
/// ---
/// id: api-design
/// title: API Design
/// tags: [design]
/// ---
/// Body content here...
/// ```
///
/// Returns `Ok(None)` when the content is empty or its first line is not
/// exactly `---`. Both LF and CRLF line endings are accepted.
///
/// # Errors
///
/// Returns `ParseError::MissingClosingDelimiter` if the opening delimiter has
/// no matching closing line.
pub fn split_front_matter(content: &str) -> Result<Option<FrontMatter<'_>>, ParseError> {
    let mut lines = content.split_inclusive('\n');

    let Some(first) = lines.next() else {
        return Ok(None);
    };
    if strip_line_ending(first) != DELIMITER {
        return Ok(None);
    }

    let yaml_start = first.len();
    let mut pos = yaml_start;
    for line in lines {
        if strip_line_ending(line) == DELIMITER {
            return Ok(Some(FrontMatter {
                yaml: &content[yaml_start..pos],
                body: &content[pos + line.len()..],
            }));
        }
        pos += line.len();
    }

    Err(ParseError::MissingClosingDelimiter)
}

/// Parses a Markdown file whose front matter describes a single note.
///
/// # Errors
///
/// Returns `ParseError` if the front matter is truncated or its YAML cannot
/// be decoded into note metadata.
pub fn parse_markdown_note(content: &str) -> Result<MarkdownOutcome, ParseError> {
    let Some(front) = split_front_matter(content)? else {
        return Ok(MarkdownOutcome::NotANote);
    };

    // An empty block is a note with no metadata
    let meta = if front.yaml.trim().is_empty() {
        NoteMeta::default()
    } else {
        serde_yaml::from_str(front.yaml)?
    };

    Ok(MarkdownOutcome::Note {
        meta,
        body: front.body.to_string(),
    })
}

fn strip_line_ending(line: &str) -> &str {
    match line.strip_suffix('\n') {
        Some(line) => line.strip_suffix('\r').unwrap_or(line),
        None => line,
    }
}
