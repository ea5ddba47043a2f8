use crate::{Tag, TagId};

/// Visitor pattern for traversing a tag tree immutably
///
/// The default implementation walks the whole tree in pre-order, left to right.
/// Override `visit_tag` to act on each tag, calling `walk_tag` to keep descending.
pub trait TagVisitor: Sized {
    fn visit_tag(&mut self, tag: &Tag) {
        walk_tag(self, tag);
    }
}

/// Mutable visitor pattern for transforming a tag tree in place
pub trait TagVisitorMut: Sized {
    fn visit_tag_mut(&mut self, tag: &mut Tag) {
        walk_tag_mut(self, tag);
    }
}

pub fn walk_tag<V: TagVisitor>(visitor: &mut V, tag: &Tag) {
    if let Some(tags) = tag.tags() {
        for child in tags {
            visitor.visit_tag(child);
        }
    }
}

pub fn walk_tag_mut<V: TagVisitorMut>(visitor: &mut V, tag: &mut Tag) {
    if let Some(tags) = tag.tags_mut() {
        for child in tags {
            visitor.visit_tag_mut(child);
        }
    }
}

struct IdCollector {
    ids: Vec<TagId>,
}

impl TagVisitor for IdCollector {
    fn visit_tag(&mut self, tag: &Tag) {
        self.ids.push(tag.id);
        walk_tag(self, tag);
    }
}

/// All ids in the subtree rooted at `root`, pre-order
pub fn collect_ids(root: &Tag) -> Vec<TagId> {
    let mut collector = IdCollector { ids: Vec::new() };
    collector.visit_tag(root);
    collector.ids
}

/// Number of tags in the subtree rooted at `root` (including `root`)
pub fn count_tags(root: &Tag) -> usize {
    collect_ids(root).len()
}

/// Ids that appear more than once under `root`, in first-repeat order
pub fn duplicate_ids(root: &Tag) -> Vec<TagId> {
    let mut seen = std::collections::HashSet::new();
    let mut duplicates = Vec::new();
    for id in collect_ids(root) {
        if !seen.insert(id) && !duplicates.contains(&id) {
            duplicates.push(id);
        }
    }
    duplicates
}
