//! Note model: decoded metadata plus where the note came from.

use crate::domain::{Extent, extract_links};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use std::cell::OnceCell;
use std::fmt;
use std::path::{Path, PathBuf};

/// Metadata fields shared by YAML and Markdown notes.
///
/// Decoded from a YAML mapping. Unknown keys are ignored; a missing or null
/// `id` decodes to the empty string. Tags come from `tags` and from the
/// singular `tag`; when both keys are present their lists are joined, `tags`
/// first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "RawNoteMeta")]
pub struct NoteMeta {
    pub id: String,
    pub title: Option<String>,
    pub tags: Vec<String>,
    /// Free-text body of a YAML note.
    pub body: Option<String>,
}

/// The mapping as written, before the two tag keys are joined.
#[derive(Deserialize)]
struct RawNoteMeta {
    #[serde(default, deserialize_with = "null_as_default")]
    id: String,

    #[serde(default)]
    title: Option<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    tags: Vec<String>,

    #[serde(default, deserialize_with = "null_as_default")]
    tag: Vec<String>,

    #[serde(default, rename = "note")]
    body: Option<String>,
}

impl From<RawNoteMeta> for NoteMeta {
    fn from(raw: RawNoteMeta) -> Self {
        let mut tags = raw.tags;
        tags.extend(raw.tag);
        Self {
            id: raw.id,
            title: raw.title,
            tags,
            body: raw.body,
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// The file a note was extracted from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    relative: PathBuf,
    absolute: PathBuf,
}

impl SourceFile {
    /// Creates a source for `relative`, resolved against `root`.
    pub fn new(root: &Path, relative: impl Into<PathBuf>) -> Self {
        let relative = relative.into();
        let absolute = root.join(&relative);
        Self { relative, absolute }
    }

    /// Path relative to the notes root; used for history queries.
    pub fn relative(&self) -> &Path {
        &self.relative
    }

    /// Path used to read the file.
    pub fn absolute(&self) -> &Path {
        &self.absolute
    }
}

/// How a note is stored in its file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// One entry of a multi-note YAML file.
    Yaml {
        /// 1-based line of the note's mapping node.
        line: usize,
        /// Lines and bytes owned by the note.
        extent: Extent,
    },
    /// A Markdown file whose front matter is the note; the whole file is the note.
    Markdown,
}

/// A note extracted from a file.
///
/// Notes are built once per extraction and never mutated. Links are parsed
/// from the body on first access.
#[derive(Clone)]
pub struct Note {
    id: String,
    title: Option<String>,
    tags: Vec<String>,
    body: Option<String>,
    source: SourceFile,
    origin: Origin,
    last_update: Option<DateTime<Utc>>,
    links: OnceCell<Vec<String>>,
}

impl Note {
    /// Builds a note from a YAML mapping.
    pub fn from_yaml(
        meta: NoteMeta,
        source: SourceFile,
        line: usize,
        extent: Extent,
        last_update: Option<DateTime<Utc>>,
    ) -> Self {
        let NoteMeta {
            id,
            title,
            tags,
            body,
        } = meta;

        Self {
            id,
            title,
            tags,
            body,
            source,
            origin: Origin::Yaml { line, extent },
            last_update,
            links: OnceCell::new(),
        }
    }

    /// Builds a note from Markdown front matter and the text after it.
    pub fn from_markdown(
        meta: NoteMeta,
        body: String,
        source: SourceFile,
        last_update: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            id: meta.id,
            title: meta.title,
            tags: meta.tags,
            body: Some(body),
            source,
            origin: Origin::Markdown,
            last_update,
            links: OnceCell::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Returns the title, or `""` when the note has none.
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    pub fn tags(&self) -> &[String] {
        &self.tags
    }

    /// The text scanned for links.
    pub fn body(&self) -> Option<&str> {
        self.body.as_deref()
    }

    pub fn source(&self) -> &SourceFile {
        &self.source
    }

    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// Extent inside the source file, for YAML notes only.
    pub fn extent(&self) -> Option<Extent> {
        match self.origin {
            Origin::Yaml { extent, .. } => Some(extent),
            Origin::Markdown => None,
        }
    }

    /// Most recent modification of the note's lines, when history was available.
    pub fn last_update(&self) -> Option<DateTime<Utc>> {
        self.last_update
    }

    /// Ids referenced from the body with `[[id]]`, in order of appearance.
    pub fn links(&self) -> &[String] {
        self.links
            .get_or_init(|| self.body.as_deref().map(extract_links).unwrap_or_default())
    }

    /// `path:line` reference for opening the note in an editor.
    pub fn open_ref(&self) -> String {
        let line = match self.origin {
            Origin::Yaml { line, .. } => line,
            Origin::Markdown => 0,
        };
        format!("{}:{}", self.source.absolute().display(), line)
    }
}

impl fmt::Display for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.title {
            Some(title) => write!(f, "{} [{}]", title, self.id),
            None => write!(f, "[{}]", self.id),
        }
    }
}

impl fmt::Debug for Note {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Note")
            .field("id", &self.id)
            .field("title", &self.title)
            .field("tags", &self.tags)
            .field("source", &self.source.relative)
            .field("origin", &self.origin)
            .field("last_update", &self.last_update)
            .finish()
    }
}
