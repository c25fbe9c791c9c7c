//! Core types: Note, Extent, tag filter, link extraction

mod extent;
mod link;
mod note;
mod tag;

pub use extent::{Extent, FileStats, StartPosition, infer_extents};
pub use link::extract_links;
pub use note::{Note, NoteMeta, Origin, SourceFile};
pub use tag::{TagFilter, split_tag_list};
