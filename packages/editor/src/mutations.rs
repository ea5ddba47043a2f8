//! # Tag Mutations
//!
//! Structural and content edits on a page's tag tree.
//!
//! ## Design Principles
//!
//! 1. **Intent-preserving**: Each mutation is one editor command (wrap, clone, ...)
//! 2. **Validated**: Preconditions are checked before anything is touched
//! 3. **Fail-safe**: A violated precondition is reported as a [`MutationError`]
//!    and leaves the page unchanged; sessions turn it into a no-op
//! 4. **Acyclic**: No mutation can place a tag under itself or its descendants
//!
//! ## Mutation Semantics
//!
//! ### Wrap
//! - The tag's slot becomes a wrapper with a fresh id, the tag's name and styles,
//!   and a single child: a verbatim copy of the tag (original id included)
//! - Selects the wrapper
//!
//! ### Unwrap
//! - Moves the tag out of its parent, just before the parent in the grandparent
//! - The parent keeps its remaining children, even when none are left
//! - Not allowed for direct children of the root
//!
//! ### Clone
//! - Deep copy with fresh ids throughout, named "Copy of ..."
//! - Appended at the end of the parent, not next to the original
//!
//! ### Delete
//! - Removes the tag and all descendants; selects the parent

use serde::{Deserialize, Serialize};
use tagbuilder_model::{
    contains, find_parent, find_tag, find_tag_mut, is_descendant, walk_tag_mut, Breakpoint,
    IdGenerator, LinkImage, Page, Tag, TagChildren, TagChildrenType, TagId, TagVisitorMut,
};
use thiserror::Error;

/// Editor commands (intent-preserving operations)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Mutation {
    /// Insert a new parent directly above a tag
    Wrap { id: TagId },

    /// Promote a tag to be the preceding sibling of its parent
    Unwrap { id: TagId },

    /// Remove a tag and its subtree
    Delete { id: TagId },

    /// Add a default leaf to a container, or a placeholder image to an image carousel
    Append { id: TagId },

    /// Deep-copy a tag to the end of its parent's children
    CloneTag { id: TagId },

    /// Swap with the previous sibling
    MoveUp { id: TagId },

    /// Swap with the next sibling
    MoveDown { id: TagId },

    /// Re-parent a tag at `index` (clamped) in `new_parent`'s children
    MoveTo {
        id: TagId,
        new_parent: TagId,
        index: usize,
    },

    SetName { id: TagId, name: String },

    /// Overwrite one breakpoint's style (empty clears it)
    SetStyle {
        id: TagId,
        breakpoint: Breakpoint,
        style: String,
    },

    /// Replace the children with the default payload of another variant
    ChangeChildrenType { id: TagId, kind: TagChildrenType },

    /// Overwrite the children payload as-is
    UpdateChildren { id: TagId, children: TagChildren },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MutationError {
    #[error("Tag not found: {0}")]
    NodeNotFound(TagId),

    #[error("Operation not allowed on the root tag ({0})")]
    RootForbidden(TagId),

    #[error("Tag {0} is a direct child of the root")]
    ParentIsRoot(TagId),

    #[error("Parent not found or not a container: {0}")]
    ParentNotFound(TagId),

    #[error("Tag {id} has unsupported children for this operation: {found:?}")]
    WrongChildrenType {
        id: TagId,
        found: Option<TagChildrenType>,
    },

    #[error("Tag {0} is already at the edge of its siblings")]
    AtBoundary(TagId),

    #[error("Tag {id} already has {kind} children")]
    AlreadyVariant { id: TagId, kind: TagChildrenType },

    #[error("Moving {id} under {new_parent} would create a cycle")]
    CycleDetected { id: TagId, new_parent: TagId },

    #[error("Mutation leaves the page unchanged")]
    NoChange,
}

/// What a successful mutation wants the editor to select next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MutationOutcome {
    pub selected: TagId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Down,
}

impl Mutation {
    /// The tag this mutation addresses
    pub fn target(&self) -> TagId {
        match self {
            Mutation::Wrap { id }
            | Mutation::Unwrap { id }
            | Mutation::Delete { id }
            | Mutation::Append { id }
            | Mutation::CloneTag { id }
            | Mutation::MoveUp { id }
            | Mutation::MoveDown { id }
            | Mutation::MoveTo { id, .. }
            | Mutation::SetName { id, .. }
            | Mutation::SetStyle { id, .. }
            | Mutation::ChangeChildrenType { id, .. }
            | Mutation::UpdateChildren { id, .. } => *id,
        }
    }

    /// Short human-readable name, used as the undo description
    pub fn label(&self) -> &'static str {
        match self {
            Mutation::Wrap { .. } => "Wrap",
            Mutation::Unwrap { .. } => "Unwrap",
            Mutation::Delete { .. } => "Delete",
            Mutation::Append { .. } => "Append",
            Mutation::CloneTag { .. } => "Clone",
            Mutation::MoveUp { .. } => "Move up",
            Mutation::MoveDown { .. } => "Move down",
            Mutation::MoveTo { .. } => "Move",
            Mutation::SetName { .. } => "Rename",
            Mutation::SetStyle { .. } => "Set style",
            Mutation::ChangeChildrenType { .. } => "Change children type",
            Mutation::UpdateChildren { .. } => "Update children",
        }
    }

    /// Style and payload edits fire on every keystroke and skip undo history
    pub fn records_history(&self) -> bool {
        !matches!(
            self,
            Mutation::SetStyle { .. } | Mutation::UpdateChildren { .. }
        )
    }

    /// Apply mutation to a page with validation.
    ///
    /// On error the page is left untouched.
    pub fn apply(&self, page: &mut Page, ids: &mut IdGenerator) -> Result<MutationOutcome, MutationError> {
        match self {
            Mutation::Wrap { id } => Self::apply_wrap(page, *id, ids),
            Mutation::Unwrap { id } => Self::apply_unwrap(page, *id),
            Mutation::Delete { id } => Self::apply_delete(page, *id),
            Mutation::Append { id } => Self::apply_append(page, *id, ids),
            Mutation::CloneTag { id } => Self::apply_clone(page, *id, ids),
            Mutation::MoveUp { id } => Self::apply_step(page, *id, Direction::Up),
            Mutation::MoveDown { id } => Self::apply_step(page, *id, Direction::Down),
            Mutation::MoveTo { id, new_parent, index } => {
                Self::apply_move_to(page, *id, *new_parent, *index)
            }
            Mutation::SetName { id, name } => Self::apply_set_name(page, *id, name),
            Mutation::SetStyle { id, breakpoint, style } => {
                Self::apply_set_style(page, *id, *breakpoint, style)
            }
            Mutation::ChangeChildrenType { id, kind } => {
                Self::apply_change_children_type(page, *id, *kind, ids)
            }
            Mutation::UpdateChildren { id, children } => {
                Self::apply_update_children(page, *id, children)
            }
        }
    }

    /// Validate without applying (dry run against a scratch copy)
    pub fn validate(&self, page: &Page, ids: &IdGenerator) -> Result<(), MutationError> {
        let mut scratch = page.clone();
        self.apply(&mut scratch, &mut ids.clone()).map(|_| ())
    }

    fn apply_wrap(page: &mut Page, id: TagId, ids: &mut IdGenerator) -> Result<MutationOutcome, MutationError> {
        if page.is_root(id) {
            return Err(MutationError::RootForbidden(id));
        }
        let tag = find_tag_mut(&mut page.root, id).ok_or(MutationError::NodeNotFound(id))?;

        let inner = tag.clone();
        tag.id = ids.new_id();
        tag.children = Some(TagChildren::Tags(vec![inner]));

        Ok(MutationOutcome { selected: tag.id })
    }

    fn apply_unwrap(page: &mut Page, id: TagId) -> Result<MutationOutcome, MutationError> {
        let parent_id = parent_of(page, id)?;
        if page.is_root(parent_id) {
            return Err(MutationError::ParentIsRoot(id));
        }
        let grandparent_id = parent_of(page, parent_id)?;

        let siblings = children_of_mut(page, grandparent_id)?;
        let parent_index = siblings
            .iter()
            .position(|tag| tag.id == parent_id)
            .ok_or(MutationError::ParentNotFound(parent_id))?;

        let parent_tags = siblings[parent_index]
            .tags_mut()
            .ok_or(MutationError::ParentNotFound(parent_id))?;
        let index = parent_tags
            .iter()
            .position(|tag| tag.id == id)
            .ok_or(MutationError::NodeNotFound(id))?;
        let tag = parent_tags.remove(index);

        siblings.insert(parent_index, tag);
        Ok(MutationOutcome { selected: id })
    }

    fn apply_delete(page: &mut Page, id: TagId) -> Result<MutationOutcome, MutationError> {
        let parent_id = parent_of(page, id)?;
        let siblings = children_of_mut(page, parent_id)?;
        let index = position_of(siblings, id)?;
        siblings.remove(index);

        Ok(MutationOutcome { selected: parent_id })
    }

    fn apply_append(page: &mut Page, id: TagId, ids: &mut IdGenerator) -> Result<MutationOutcome, MutationError> {
        let tag = find_tag_mut(&mut page.root, id).ok_or(MutationError::NodeNotFound(id))?;

        match &mut tag.children {
            Some(TagChildren::Tags(tags)) => tags.push(Tag::default_leaf(ids.new_id())),
            Some(TagChildren::ImageCarousel(carousel)) => {
                carousel.link_images.push(LinkImage::placeholder())
            }
            other => {
                return Err(MutationError::WrongChildrenType {
                    id,
                    found: other.as_ref().map(TagChildren::kind),
                })
            }
        }

        Ok(MutationOutcome { selected: id })
    }

    fn apply_clone(page: &mut Page, id: TagId, ids: &mut IdGenerator) -> Result<MutationOutcome, MutationError> {
        let parent_id = parent_of(page, id)?;
        let original = find_tag(&page.root, id).ok_or(MutationError::NodeNotFound(id))?;

        let mut copy = original.clone();
        FreshIds { ids }.visit_tag_mut(&mut copy);
        copy.name = Some(format!("Copy of {}", original.label()));

        children_of_mut(page, parent_id)?.push(copy);
        Ok(MutationOutcome { selected: id })
    }

    fn apply_step(page: &mut Page, id: TagId, direction: Direction) -> Result<MutationOutcome, MutationError> {
        let parent_id = parent_of(page, id)?;
        let siblings = children_of_mut(page, parent_id)?;
        let index = position_of(siblings, id)?;

        let neighbour = match direction {
            Direction::Up => index.checked_sub(1),
            Direction::Down => Some(index + 1).filter(|next| *next < siblings.len()),
        }
        .ok_or(MutationError::AtBoundary(id))?;

        siblings.swap(index, neighbour);
        Ok(MutationOutcome { selected: id })
    }

    fn apply_move_to(
        page: &mut Page,
        id: TagId,
        new_parent: TagId,
        index: usize,
    ) -> Result<MutationOutcome, MutationError> {
        let old_parent = parent_of(page, id)?;

        match find_tag(&page.root, new_parent) {
            None => return Err(MutationError::ParentNotFound(new_parent)),
            Some(target) if target.tags().is_none() => {
                return Err(MutationError::WrongChildrenType {
                    id: new_parent,
                    found: target.children_type(),
                })
            }
            Some(_) => {}
        }
        if is_descendant(&page.root, id, new_parent) {
            return Err(MutationError::CycleDetected { id, new_parent });
        }

        let siblings = children_of_mut(page, old_parent)?;
        let position = position_of(siblings, id)?;
        let tag = siblings.remove(position);

        // Index is relative to the target list after removal
        let destination = children_of_mut(page, new_parent)?;
        let index = index.min(destination.len());
        destination.insert(index, tag);

        Ok(MutationOutcome { selected: id })
    }

    fn apply_set_name(page: &mut Page, id: TagId, name: &str) -> Result<MutationOutcome, MutationError> {
        if page.is_root(id) {
            return Err(MutationError::RootForbidden(id));
        }
        let tag = find_tag_mut(&mut page.root, id).ok_or(MutationError::NodeNotFound(id))?;
        tag.name = (!name.is_empty()).then(|| name.to_string());

        Ok(MutationOutcome { selected: id })
    }

    fn apply_set_style(
        page: &mut Page,
        id: TagId,
        breakpoint: Breakpoint,
        style: &str,
    ) -> Result<MutationOutcome, MutationError> {
        let tag = find_tag_mut(&mut page.root, id).ok_or(MutationError::NodeNotFound(id))?;
        tag.styles.set(breakpoint, style);

        Ok(MutationOutcome { selected: id })
    }

    fn apply_change_children_type(
        page: &mut Page,
        id: TagId,
        kind: TagChildrenType,
        ids: &mut IdGenerator,
    ) -> Result<MutationOutcome, MutationError> {
        let tag = find_tag_mut(&mut page.root, id).ok_or(MutationError::NodeNotFound(id))?;
        if tag.children_type() == Some(kind) {
            return Err(MutationError::AlreadyVariant { id, kind });
        }
        tag.children = Some(TagChildren::default_for(kind, ids));

        Ok(MutationOutcome { selected: id })
    }

    fn apply_update_children(
        page: &mut Page,
        id: TagId,
        children: &TagChildren,
    ) -> Result<MutationOutcome, MutationError> {
        let tag = find_tag_mut(&mut page.root, id).ok_or(MutationError::NodeNotFound(id))?;
        tag.children = Some(children.clone());

        Ok(MutationOutcome { selected: id })
    }
}

/// Id of the tag whose children list holds `id`
fn parent_of(page: &Page, id: TagId) -> Result<TagId, MutationError> {
    if page.is_root(id) {
        return Err(MutationError::RootForbidden(id));
    }
    match find_parent(&page.root, id) {
        Some(parent) => Ok(parent.id),
        None if contains(&page.root, id) => Err(MutationError::ParentNotFound(id)),
        None => Err(MutationError::NodeNotFound(id)),
    }
}

fn children_of_mut(page: &mut Page, parent_id: TagId) -> Result<&mut Vec<Tag>, MutationError> {
    find_tag_mut(&mut page.root, parent_id)
        .and_then(Tag::tags_mut)
        .ok_or(MutationError::ParentNotFound(parent_id))
}

fn position_of(siblings: &[Tag], id: TagId) -> Result<usize, MutationError> {
    siblings
        .iter()
        .position(|tag| tag.id == id)
        .ok_or(MutationError::NodeNotFound(id))
}

/// Reassigns every id in a subtree
struct FreshIds<'a> {
    ids: &'a mut IdGenerator,
}

impl TagVisitorMut for FreshIds<'_> {
    fn visit_tag_mut(&mut self, tag: &mut Tag) {
        tag.id = self.ids.new_id();
        walk_tag_mut(self, tag);
    }
}
