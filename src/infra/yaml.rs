//! Multi-note YAML parser.
//!
//! A notes file is a mapping whose `notes` key holds a sequence of note
//! mappings:
//!
//! ```text
//! notes:
//!   - id: api-design
//!     title: API Design
//!     tags: [design]
//!     note: |
//!       Links to [[http-errors]].
//!   - id: http-errors
//!     title: HTTP Errors
//! ```
//!
//! The document is loaded into a small positioned tree from the parser's
//! marked events, so every note keeps the line and byte offset where its
//! mapping starts. Each note mapping is then decoded into [`NoteMeta`]
//! through `serde_yaml`. Aliases are resolved, both inside notes and for the
//! `notes` value itself, within a fixed node and depth budget per note.

use std::collections::HashMap;

use serde_yaml::{Mapping, Value};
use yaml_rust2::parser::{Event, MarkedEventReceiver, Parser};
use yaml_rust2::scanner::{Marker, TScalarStyle};

use crate::domain::{NoteMeta, StartPosition};
use crate::infra::ParseError;

const NOTES_KEY: &str = "notes";

/// Most nodes one note may expand to, aliases included.
const MAX_NOTE_NODES: usize = 10_000;

/// Deepest nesting decoded inside one note.
const MAX_NOTE_DEPTH: usize = 128;

/// A note decoded from a YAML file, with the position of its mapping node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YamlNote {
    pub meta: NoteMeta,
    pub start: StartPosition,
}

/// Parses every note of a multi-note YAML file, in document order.
///
/// All documents of the stream are scanned. A document without a `notes`
/// sequence contributes no notes; sequence entries that are not mappings are
/// skipped.
///
/// # Errors
///
/// Returns `ParseError::Syntax` if the YAML is malformed,
/// `ParseError::InvalidYaml` if a note mapping cannot be decoded (for
/// example `tags` holding a mapping), and `ParseError::ExpansionLimit` if a
/// note expands past the node or depth budget.
pub fn parse_yaml_notes(content: &str) -> Result<Vec<YamlNote>, ParseError> {
    let mut tree = TreeBuilder::default();
    Parser::new_from_str(content).load(&mut tree, true)?;

    let mut decoded = Vec::new();
    for document in &tree.documents {
        for node in tree.note_nodes(document) {
            let mut budget = MAX_NOTE_NODES;
            let meta: NoteMeta = serde_yaml::from_value(tree.to_value(node, 0, &mut budget)?)?;
            decoded.push((node.mark, meta));
        }
    }

    let lines = LineIndex::new(content);
    Ok(decoded
        .into_iter()
        .map(|(mark, meta)| YamlNote {
            meta,
            start: lines.position(mark),
        })
        .collect())
}

// ===========================================
// Positioned tree
// ===========================================

#[derive(Debug, Clone)]
struct Node {
    mark: Marker,
    kind: Kind,
}

#[derive(Debug, Clone)]
enum Kind {
    Scalar { value: String, plain: bool },
    Sequence(Vec<Node>),
    Mapping(Vec<(Node, Node)>),
    Alias(usize),
}

impl Node {
    fn is_scalar(&self, expected: &str) -> bool {
        matches!(&self.kind, Kind::Scalar { value, .. } if value == expected)
    }
}

/// A collection whose end event has not arrived yet.
struct OpenNode {
    mark: Marker,
    anchor: usize,
    mapping: bool,
    children: Vec<Node>,
}

/// Builds one tree per document from marked parser events.
#[derive(Default)]
struct TreeBuilder {
    documents: Vec<Node>,
    open: Vec<OpenNode>,
    anchors: HashMap<usize, Node>,
}

impl TreeBuilder {
    fn open(&mut self, mark: Marker, anchor: usize, mapping: bool) {
        self.open.push(OpenNode {
            mark,
            anchor,
            mapping,
            children: Vec::new(),
        });
    }

    fn close(&mut self) {
        let Some(node) = self.open.pop() else {
            return;
        };

        let (mark, kind) = if node.mapping {
            let mut children = node.children.into_iter();
            let mut entries = Vec::new();
            while let (Some(key), Some(value)) = (children.next(), children.next()) {
                entries.push((key, value));
            }
            // A block mapping is marked at its first `:`, a flow mapping at `{`
            let mark = match entries.first() {
                Some((key, _)) if key.mark.index() < node.mark.index() => key.mark,
                _ => node.mark,
            };
            (mark, Kind::Mapping(entries))
        } else {
            (node.mark, Kind::Sequence(node.children))
        };

        self.attach(Node { mark, kind }, node.anchor);
    }

    fn attach(&mut self, node: Node, anchor: usize) {
        if anchor != 0 {
            self.anchors.insert(anchor, node.clone());
        }
        match self.open.last_mut() {
            Some(parent) => parent.children.push(node),
            None => self.documents.push(node),
        }
    }

    /// Returns the mapping nodes listed under the document's `notes` keys.
    fn note_nodes<'t>(&'t self, document: &'t Node) -> impl Iterator<Item = &'t Node> + 't {
        let entries: &[(Node, Node)] = match &document.kind {
            Kind::Mapping(entries) => entries,
            _ => &[],
        };

        entries
            .iter()
            .filter(|(key, _)| key.is_scalar(NOTES_KEY))
            .filter_map(move |(_, value)| match &self.resolve(value).kind {
                Kind::Sequence(items) => Some(items),
                _ => None,
            })
            .flatten()
            .filter(|item| matches!(item.kind, Kind::Mapping(_)))
    }

    /// Follows an alias to its anchored node. Unknown anchors resolve to the alias itself.
    fn resolve<'t>(&'t self, node: &'t Node) -> &'t Node {
        match &node.kind {
            Kind::Alias(anchor) => self.anchors.get(anchor).unwrap_or(node),
            _ => node,
        }
    }

    /// Converts a node to a `serde_yaml::Value`, resolving aliases.
    ///
    /// Plain scalars spelled as null become `Value::Null`; every other scalar
    /// stays a string so ids and tags such as `42` or `yes` keep their text.
    /// Every node produced, including each copy made through an alias, is
    /// charged to `budget`.
    fn to_value(&self, node: &Node, depth: usize, budget: &mut usize) -> Result<Value, ParseError> {
        if depth > MAX_NOTE_DEPTH {
            return Err(ParseError::ExpansionLimit("nesting depth"));
        }
        *budget = budget
            .checked_sub(1)
            .ok_or(ParseError::ExpansionLimit("node count"))?;

        let value = match &node.kind {
            Kind::Scalar { value, plain } => {
                if *plain && is_null(value) {
                    Value::Null
                } else {
                    Value::String(value.clone())
                }
            }
            Kind::Sequence(items) => Value::Sequence(
                items
                    .iter()
                    .map(|item| self.to_value(item, depth + 1, &mut *budget))
                    .collect::<Result<_, _>>()?,
            ),
            Kind::Mapping(entries) => {
                let mut mapping = Mapping::new();
                for (key, value) in entries {
                    mapping.insert(
                        self.to_value(key, depth + 1, budget)?,
                        self.to_value(value, depth + 1, budget)?,
                    );
                }
                Value::Mapping(mapping)
            }
            Kind::Alias(anchor) => match self.anchors.get(anchor) {
                Some(target) => self.to_value(target, depth + 1, budget)?,
                None => Value::Null,
            },
        };
        Ok(value)
    }
}

impl MarkedEventReceiver for TreeBuilder {
    fn on_event(&mut self, event: Event, mark: Marker) {
        match event {
            Event::SequenceStart(anchor, ..) => self.open(mark, anchor, false),
            Event::MappingStart(anchor, ..) => self.open(mark, anchor, true),
            Event::SequenceEnd | Event::MappingEnd => self.close(),
            Event::Scalar(value, style, anchor, ..) => {
                let plain = matches!(style, TScalarStyle::Plain);
                self.attach(
                    Node {
                        mark,
                        kind: Kind::Scalar { value, plain },
                    },
                    anchor,
                );
            }
            Event::Alias(anchor) => self.attach(
                Node {
                    mark,
                    kind: Kind::Alias(anchor),
                },
                0,
            ),
            _ => {}
        }
    }
}

fn is_null(value: &str) -> bool {
    matches!(value, "" | "~" | "null" | "Null" | "NULL")
}

// ===========================================
// Marker to byte offset
// ===========================================

/// Byte offsets of line starts, for turning parser markers into positions.
struct LineIndex<'a> {
    content: &'a str,
    starts: Vec<usize>,
}

impl<'a> LineIndex<'a> {
    fn new(content: &'a str) -> Self {
        let starts = std::iter::once(0)
            .chain(content.match_indices('\n').map(|(i, _)| i + 1))
            .collect();
        Self { content, starts }
    }

    /// Marker lines are 1-based and columns count characters.
    fn position(&self, mark: Marker) -> StartPosition {
        let line = mark.line().max(1);
        let line_start = self
            .starts
            .get(line - 1)
            .copied()
            .unwrap_or(self.content.len());

        let column_bytes: usize = self.content[line_start..]
            .chars()
            .take(mark.col())
            .map(char::len_utf8)
            .sum();

        StartPosition {
            line,
            offset: line_start + column_bytes,
        }
    }
}
