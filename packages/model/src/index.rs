//! # Tree Index
//!
//! Lookups over a tag tree. Every search is depth-first, pre-order and
//! left-to-right, and only descends through `Tags` children.
//! Lookups that miss return `None`.

use crate::{Tag, TagId};

/// First tag under `root` (inclusive) whose id is `id`
pub fn find_tag(root: &Tag, id: TagId) -> Option<&Tag> {
    if root.id == id {
        return Some(root);
    }
    root.tags()?.iter().find_map(|child| find_tag(child, id))
}

pub fn find_tag_mut(root: &mut Tag, id: TagId) -> Option<&mut Tag> {
    if root.id == id {
        return Some(root);
    }
    root.tags_mut()?.iter_mut().find_map(|child| find_tag_mut(child, id))
}

/// Nearest tag whose `Tags` list directly contains `child_id`.
///
/// `None` when `child_id` is the root's own id or is not in the tree.
pub fn find_parent(root: &Tag, child_id: TagId) -> Option<&Tag> {
    let tags = root.tags()?;
    if tags.iter().any(|child| child.id == child_id) {
        return Some(root);
    }
    tags.iter().find_map(|child| find_parent(child, child_id))
}

pub fn find_parent_mut(root: &mut Tag, child_id: TagId) -> Option<&mut Tag> {
    let holds_child = root
        .tags()
        .is_some_and(|tags| tags.iter().any(|child| child.id == child_id));
    if holds_child {
        return Some(root);
    }
    root.tags_mut()?
        .iter_mut()
        .find_map(|child| find_parent_mut(child, child_id))
}

/// Position of `child_id` among its parent's tags
pub fn index_in_parent(parent: &Tag, child_id: TagId) -> Option<usize> {
    parent.tags()?.iter().position(|child| child.id == child_id)
}

pub fn contains(root: &Tag, id: TagId) -> bool {
    find_tag(root, id).is_some()
}

/// Distance from `root` to `id` (root itself is depth 0)
pub fn depth_of(root: &Tag, id: TagId) -> Option<usize> {
    if root.id == id {
        return Some(0);
    }
    root.tags()?
        .iter()
        .find_map(|child| depth_of(child, id))
        .map(|depth| depth + 1)
}

/// True if `id` lies in the subtree rooted at `ancestor` (a tag is its own descendant)
pub fn is_descendant(root: &Tag, ancestor: TagId, id: TagId) -> bool {
    find_tag(root, ancestor).is_some_and(|subtree| contains(subtree, id))
}
