//! # Tag Builder Model
//!
//! Data model for the page builder: pages, tags, children payloads and
//! per-breakpoint styles, plus the id generator and read-only tree lookups
//! used by the editor.

mod breakpoint;
mod error;
mod id_generator;
mod index;
mod tag;
mod visitor;

pub use breakpoint::{Breakpoint, BreakpointFlags, Styles};
pub use error::ModelError;
pub use id_generator::IdGenerator;
pub use index::{
    contains, depth_of, find_parent, find_parent_mut, find_tag, find_tag_mut, index_in_parent,
    is_descendant,
};
pub use tag::{
    Columns, ImageCarousel, ItemCarousel, LinkImage, Page, Tag, TagChildren, TagChildrenType,
    TagId, DEFAULT_DIV_STYLE, DEFAULT_ITEM_QUERY, DEFAULT_TEXT, PLACEHOLDER_IMAGE_ALT,
    PLACEHOLDER_IMAGE_SRC,
};
pub use visitor::{
    collect_ids, count_tags, duplicate_ids, walk_tag, walk_tag_mut, TagVisitor, TagVisitorMut,
};
