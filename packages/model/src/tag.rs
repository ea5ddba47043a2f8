//! # Tag Model
//!
//! A page is a tree of tags. Each tag carries at most one children payload
//! and a set of per-breakpoint styles.
//!
//! ```text
//! Page { name, root }
//!          └─ Tag { id, name?, children?, styles }
//!                     └─ Text | Tags[..] | ImageCarousel | ItemCarousel | LinkImage
//! ```
//!
//! The JSON layout matches what the page builder has always persisted:
//! children are externally tagged (`{"tags": [...]}`, `{"text": "..."}`) and
//! styles sit flat on the tag (`pcStyle`, `mobStyle`, ...).

use crate::{Breakpoint, BreakpointFlags, IdGenerator, ModelError, Styles};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub const DEFAULT_TEXT: &str = "New text";
pub const DEFAULT_ITEM_QUERY: &str = "SELECT * FROM item";
pub const PLACEHOLDER_IMAGE_SRC: &str = "https://yourLink.com/image.jpg";
pub const PLACEHOLDER_IMAGE_ALT: &str = "Placeholder Image";
pub const DEFAULT_DIV_STYLE: &str =
    "background-color: white; padding: 1rem; color: black; border-radius: 0.375rem; border: 2px solid #2563eb;";

/// Tag identifier, unique within a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagId(pub u64);

impl fmt::Display for TagId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TagId {
    fn from(id: u64) -> Self {
        TagId(id)
    }
}

impl FromStr for TagId {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim()
            .parse::<u64>()
            .map(TagId)
            .map_err(|_| ModelError::InvalidId(s.to_string()))
    }
}

/// A single element of the page tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// None renders as an empty placeholder
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<TagChildren>,

    #[serde(flatten)]
    pub styles: Styles,
}

impl Tag {
    /// Empty placeholder tag
    pub fn new(id: TagId) -> Self {
        Self {
            id,
            name: None,
            children: None,
            styles: Styles::default(),
        }
    }

    pub fn text(id: TagId, text: impl Into<String>) -> Self {
        Self::new(id).with_children(TagChildren::Text(text.into()))
    }

    pub fn container(id: TagId, tags: Vec<Tag>) -> Self {
        Self::new(id).with_children(TagChildren::Tags(tags))
    }

    /// The leaf appended by the editor: `New div <id>` with the default card style
    pub fn default_leaf(id: TagId) -> Self {
        Self {
            styles: Styles::pc(DEFAULT_DIV_STYLE),
            ..Self::text(id, format!("New div {}", id))
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_children(mut self, children: TagChildren) -> Self {
        self.children = Some(children);
        self
    }

    pub fn with_style(mut self, breakpoint: Breakpoint, style: impl Into<String>) -> Self {
        self.styles.set(breakpoint, style);
        self
    }

    /// Name shown in the navigator; falls back to the id
    pub fn label(&self) -> String {
        match &self.name {
            Some(name) if !name.is_empty() => name.clone(),
            _ => format!("Tag {}", self.id),
        }
    }

    pub fn children_type(&self) -> Option<TagChildrenType> {
        self.children.as_ref().map(TagChildren::kind)
    }

    /// Nested tags, if this tag is a container
    pub fn tags(&self) -> Option<&Vec<Tag>> {
        match &self.children {
            Some(TagChildren::Tags(tags)) => Some(tags),
            _ => None,
        }
    }

    pub fn tags_mut(&mut self) -> Option<&mut Vec<Tag>> {
        match &mut self.children {
            Some(TagChildren::Tags(tags)) => Some(tags),
            _ => None,
        }
    }

    /// Effective style at `breakpoint` (see [`Styles::effective`])
    pub fn effective_style(&self, breakpoint: Breakpoint) -> &str {
        self.styles.effective(breakpoint)
    }

    /// Structural equality that ignores ids: same names, styles and payloads,
    /// with nested tags compared the same way.
    pub fn same_shape(&self, other: &Tag) -> bool {
        if self.name != other.name || self.styles != other.styles {
            return false;
        }
        match (&self.children, &other.children) {
            (Some(TagChildren::Tags(a)), Some(TagChildren::Tags(b))) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.same_shape(y))
            }
            (a, b) => a == b,
        }
    }
}

/// The payload of a tag. Exactly one shape at a time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TagChildren {
    Text(String),
    Tags(Vec<Tag>),
    ImageCarousel(ImageCarousel),
    ItemCarousel(ItemCarousel),
    LinkImage(LinkImage),
}

impl TagChildren {
    pub fn kind(&self) -> TagChildrenType {
        match self {
            TagChildren::Text(_) => TagChildrenType::Text,
            TagChildren::Tags(_) => TagChildrenType::Tags,
            TagChildren::ImageCarousel(_) => TagChildrenType::ImageCarousel,
            TagChildren::ItemCarousel(_) => TagChildrenType::ItemCarousel,
            TagChildren::LinkImage(_) => TagChildrenType::LinkImage,
        }
    }

    /// Default payload installed when a tag switches to `kind`.
    ///
    /// Only `Tags` draws an id, for its single seeded leaf.
    pub fn default_for(kind: TagChildrenType, ids: &mut IdGenerator) -> Self {
        match kind {
            TagChildrenType::Text => TagChildren::Text(DEFAULT_TEXT.to_string()),
            TagChildrenType::Tags => TagChildren::Tags(vec![Tag::default_leaf(ids.new_id())]),
            TagChildrenType::ImageCarousel => TagChildren::ImageCarousel(ImageCarousel::default()),
            TagChildrenType::ItemCarousel => TagChildren::ItemCarousel(ItemCarousel::default()),
            TagChildrenType::LinkImage => TagChildren::LinkImage(LinkImage::placeholder()),
        }
    }
}

/// Discriminant of [`TagChildren`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TagChildrenType {
    Text,
    Tags,
    ImageCarousel,
    ItemCarousel,
    LinkImage,
}

impl TagChildrenType {
    pub const ALL: [TagChildrenType; 5] = [
        TagChildrenType::Text,
        TagChildrenType::Tags,
        TagChildrenType::ImageCarousel,
        TagChildrenType::ItemCarousel,
        TagChildrenType::LinkImage,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TagChildrenType::Text => "text",
            TagChildrenType::Tags => "tags",
            TagChildrenType::ImageCarousel => "imageCarousel",
            TagChildrenType::ItemCarousel => "itemCarousel",
            TagChildrenType::LinkImage => "linkImage",
        }
    }
}

impl fmt::Display for TagChildrenType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TagChildrenType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TagChildrenType::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ModelError::UnknownChildrenType(s.to_string()))
    }
}

/// A clickable image
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkImage {
    pub src: String,
    pub alt: String,
    pub href: String,
}

impl LinkImage {
    pub fn placeholder() -> Self {
        Self {
            src: PLACEHOLDER_IMAGE_SRC.to_string(),
            alt: PLACEHOLDER_IMAGE_ALT.to_string(),
            href: "#".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageCarousel {
    pub link_images: Vec<LinkImage>,
    #[serde(default)]
    pub show_controller: BreakpointFlags,
}

impl Default for ImageCarousel {
    fn default() -> Self {
        Self {
            link_images: vec![LinkImage::placeholder()],
            show_controller: BreakpointFlags::all(true),
        }
    }
}

/// A carousel of catalog items. Only the query is stored; items are fetched
/// by the renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemCarousel {
    pub query: String,
    pub cols: Columns,
    #[serde(default)]
    pub show_controller: BreakpointFlags,
}

impl Default for ItemCarousel {
    fn default() -> Self {
        Self {
            query: DEFAULT_ITEM_QUERY.to_string(),
            cols: Columns::default(),
            show_controller: BreakpointFlags::all(true),
        }
    }
}

/// Column count of an item carousel: 2, 3, 4, 5, 6 or 12
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Columns(u8);

impl Columns {
    pub const ALLOWED: [u8; 6] = [2, 3, 4, 5, 6, 12];

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Columns {
    fn default() -> Self {
        Columns(3)
    }
}

impl TryFrom<u8> for Columns {
    type Error = ModelError;

    fn try_from(cols: u8) -> Result<Self, Self::Error> {
        if Self::ALLOWED.contains(&cols) {
            Ok(Columns(cols))
        } else {
            Err(ModelError::InvalidColumns(cols))
        }
    }
}

impl From<Columns> for u8 {
    fn from(cols: Columns) -> Self {
        cols.0
    }
}

/// A named page and its tag tree
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub name: String,
    pub root: Tag,
}

impl Page {
    pub fn new(name: impl Into<String>, root: Tag) -> Self {
        Self {
            name: name.into(),
            root,
        }
    }

    /// A page whose root is an empty container
    pub fn empty(name: impl Into<String>, root_id: TagId) -> Self {
        Self::new(name, Tag::container(root_id, Vec::new()))
    }

    pub fn is_root(&self, id: TagId) -> bool {
        self.root.id == id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_children_use_original_layout() {
        let tag = Tag::container(TagId(1), vec![Tag::text(TagId(2), "hi")]).with_name("Hero");
        let json = serde_json::to_value(&tag).unwrap();

        assert_eq!(
            json,
            json!({
                "id": 1,
                "name": "Hero",
                "children": { "tags": [ { "id": 2, "children": { "text": "hi" } } ] }
            })
        );
    }

    #[test]
    fn test_parse_saved_page() {
        let source = r##"{
            "name": "Home",
            "root": {
                "id": 17000000000001,
                "children": { "tags": [
                    { "id": 2, "mobStyle": "padding: 0", "children": {
                        "imageCarousel": { "linkImages": [ { "src": "a.jpg", "alt": "a", "href": "#" } ], "showController": true }
                    } },
                    { "id": 3, "children": {
                        "itemCarousel": { "query": "SELECT * FROM item", "cols": 4, "showController": false }
                    } }
                ] }
            }
        }"##;

        let page: Page = serde_json::from_str(source).unwrap();
        let tags = page.root.tags().unwrap();
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].styles.mob_style.as_deref(), Some("padding: 0"));
        assert_eq!(tags[0].children_type(), Some(TagChildrenType::ImageCarousel));

        match &tags[1].children {
            Some(TagChildren::ItemCarousel(carousel)) => {
                assert_eq!(carousel.cols.get(), 4);
                assert_eq!(carousel.show_controller, BreakpointFlags::all(false));
            }
            other => panic!("Expected item carousel, got {:?}", other),
        }
    }

    #[test]
    fn test_columns_reject_unsupported_counts() {
        assert!(Columns::try_from(7).is_err());
        let result: Result<ItemCarousel, _> =
            serde_json::from_str(r#"{"query": "q", "cols": 7}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_default_payloads() {
        let mut ids = IdGenerator::from_seed(8);
        match TagChildren::default_for(TagChildrenType::Tags, &mut ids) {
            TagChildren::Tags(tags) => {
                assert_eq!(tags.len(), 1);
                assert_eq!(tags[0].id, TagId(9));
                assert_eq!(tags[0].children, Some(TagChildren::Text("New div 9".to_string())));
            }
            other => panic!("Expected tags, got {:?}", other),
        }

        assert_eq!(
            TagChildren::default_for(TagChildrenType::Text, &mut ids),
            TagChildren::Text(DEFAULT_TEXT.to_string())
        );

        match TagChildren::default_for(TagChildrenType::ImageCarousel, &mut ids) {
            TagChildren::ImageCarousel(carousel) => {
                assert_eq!(carousel.link_images, vec![LinkImage::placeholder()]);
                assert_eq!(carousel.show_controller, BreakpointFlags::all(true));
            }
            other => panic!("Expected image carousel, got {:?}", other),
        }

        // Only the tags payload consumed an id
        assert_eq!(ids.new_id(), TagId(10));
    }

    #[test]
    fn test_children_type_parse() {
        assert_eq!("imageCarousel".parse::<TagChildrenType>().unwrap(), TagChildrenType::ImageCarousel);
        assert_eq!("tags".parse::<TagChildrenType>().unwrap(), TagChildrenType::Tags);
        assert!("div".parse::<TagChildrenType>().is_err());
    }

    #[test]
    fn test_same_shape_ignores_ids() {
        let a = Tag::container(TagId(1), vec![Tag::text(TagId(2), "x").with_name("n")]);
        let b = Tag::container(TagId(10), vec![Tag::text(TagId(20), "x").with_name("n")]);
        let c = Tag::container(TagId(1), vec![Tag::text(TagId(2), "y").with_name("n")]);
        assert!(a.same_shape(&b));
        assert!(!a.same_shape(&c));
        assert!(!a.same_shape(&Tag::container(TagId(1), vec![])));
    }

    #[test]
    fn test_label_falls_back_to_id() {
        assert_eq!(Tag::new(TagId(4)).label(), "Tag 4");
        assert_eq!(Tag::new(TagId(4)).with_name("Nav").label(), "Nav");
    }
}
