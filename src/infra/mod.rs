//! File I/O, note parsers and extraction

mod error;
mod extract;
mod frontmatter;
mod fs;
mod yaml;

pub use error::ParseError;
pub use extract::{Extraction, Extractor};
pub use frontmatter::{FrontMatter, MarkdownOutcome, parse_markdown_note, split_front_matter};
pub use fs::{ExtractError, Format, read_source, scan_notes_directory};
pub use yaml::{YamlNote, parse_yaml_notes};
