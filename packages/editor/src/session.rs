//! # Edit Session Management
//!
//! An EditSession owns everything one editor needs: the live page, the
//! selection, the undo history and the id generator. There is no shared
//! global state; two sessions never see each other's edits.
//!
//! Every mutation runs against a working copy of the page. The copy replaces
//! the live page only when the mutation succeeded and actually changed
//! something, so a failed precondition can never leave a half-edited tree.

use crate::{Mutation, MutationError, RedoPolicy, Selection, Snapshot, UndoStack};
use std::mem;
use tagbuilder_model::{Breakpoint, IdGenerator, Page, Tag, TagChildren, TagChildrenType, TagId};
use tracing::debug;

/// History settings for a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Maximum undo levels (0 = unlimited)
    pub history_limit: usize,
    pub redo_policy: RedoPolicy,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            history_limit: crate::undo_stack::DEFAULT_MAX_LEVELS,
            redo_policy: RedoPolicy::default(),
        }
    }
}

/// Result of applying a mutation
#[derive(Debug, Clone, PartialEq)]
pub enum MutationResult {
    /// The page changed; `version` is the session version after the edit
    Applied { version: u64 },

    /// Nothing changed
    Noop { reason: MutationError },
}

impl MutationResult {
    pub fn is_applied(&self) -> bool {
        matches!(self, MutationResult::Applied { .. })
    }

    pub fn into_result(self) -> Result<u64, MutationError> {
        match self {
            MutationResult::Applied { version } => Ok(version),
            MutationResult::Noop { reason } => Err(reason),
        }
    }
}

/// Single-user editing state for one page
#[derive(Debug)]
pub struct EditSession {
    page: Page,
    selection: Selection,
    history: UndoStack,
    ids: IdGenerator,

    /// Increments on every applied mutation, undo and redo
    version: u64,
}

impl EditSession {
    pub fn new(page: Page) -> Self {
        Self::with_config(page, SessionConfig::default())
    }

    pub fn with_config(page: Page, config: SessionConfig) -> Self {
        let mut ids = IdGenerator::new();
        ids.observe(&page.root);

        Self {
            page,
            selection: Selection::new(),
            history: UndoStack::with_max_levels(config.history_limit)
                .with_redo_policy(config.redo_policy),
            ids,
            version: 0,
        }
    }

    /// Use a specific id source (e.g. a seeded one for reproducible runs).
    ///
    /// The generator is advanced past every id already in the page.
    pub fn with_id_generator(mut self, mut ids: IdGenerator) -> Self {
        ids.observe(&self.page.root);
        self.ids = ids;
        self
    }

    /// Apply a mutation; precondition failures come back as [`MutationResult::Noop`]
    pub fn apply(&mut self, mutation: Mutation) -> MutationResult {
        let mut working = self.page.clone();

        let outcome = match mutation.apply(&mut working, &mut self.ids) {
            Ok(outcome) => outcome,
            Err(reason) => {
                debug!(
                    mutation = mutation.label(),
                    target = %mutation.target(),
                    %reason,
                    "Mutation skipped"
                );
                return MutationResult::Noop { reason };
            }
        };

        if working == self.page {
            debug!(mutation = mutation.label(), target = %mutation.target(), "Mutation changed nothing");
            return MutationResult::Noop {
                reason: MutationError::NoChange,
            };
        }

        let before = mem::replace(&mut self.page, working);
        if mutation.records_history() {
            self.history
                .record(Snapshot::new(before, self.selection, mutation.label()));
        } else {
            self.history.discard_redo();
        }

        self.selection
            .follow(&self.page, mutation.target(), outcome.selected);
        self.version += 1;

        debug!(
            mutation = mutation.label(),
            target = %mutation.target(),
            version = self.version,
            selected = ?self.selection.id(),
            "Mutation applied"
        );

        MutationResult::Applied {
            version: self.version,
        }
    }

    /// Whether `mutation` would apply (dry run)
    pub fn can_apply(&self, mutation: &Mutation) -> bool {
        mutation.validate(&self.page, &self.ids).is_ok()
    }

    pub fn wrap(&mut self, id: TagId) -> MutationResult {
        self.apply(Mutation::Wrap { id })
    }

    pub fn unwrap(&mut self, id: TagId) -> MutationResult {
        self.apply(Mutation::Unwrap { id })
    }

    pub fn delete_tag(&mut self, id: TagId) -> MutationResult {
        self.apply(Mutation::Delete { id })
    }

    pub fn append(&mut self, id: TagId) -> MutationResult {
        self.apply(Mutation::Append { id })
    }

    pub fn clone_tag(&mut self, id: TagId) -> MutationResult {
        self.apply(Mutation::CloneTag { id })
    }

    pub fn move_up(&mut self, id: TagId) -> MutationResult {
        self.apply(Mutation::MoveUp { id })
    }

    pub fn move_down(&mut self, id: TagId) -> MutationResult {
        self.apply(Mutation::MoveDown { id })
    }

    pub fn move_to(&mut self, id: TagId, new_parent: TagId, index: usize) -> MutationResult {
        self.apply(Mutation::MoveTo {
            id,
            new_parent,
            index,
        })
    }

    pub fn set_name(&mut self, id: TagId, name: impl Into<String>) -> MutationResult {
        self.apply(Mutation::SetName {
            id,
            name: name.into(),
        })
    }

    pub fn set_style(
        &mut self,
        id: TagId,
        style: impl Into<String>,
        breakpoint: Breakpoint,
    ) -> MutationResult {
        self.apply(Mutation::SetStyle {
            id,
            breakpoint,
            style: style.into(),
        })
    }

    pub fn change_children_type(&mut self, id: TagId, kind: TagChildrenType) -> MutationResult {
        self.apply(Mutation::ChangeChildrenType { id, kind })
    }

    pub fn update_children(&mut self, id: TagId, children: TagChildren) -> MutationResult {
        self.apply(Mutation::UpdateChildren { id, children })
    }

    /// Step back one history level; false when there is nothing to undo
    pub fn undo(&mut self) -> bool {
        let undone = self.history.undo(&mut self.page, &mut self.selection);
        if undone {
            self.after_history_step("Undo");
        }
        undone
    }

    pub fn redo(&mut self) -> bool {
        let redone = self.history.redo(&mut self.page, &mut self.selection);
        if redone {
            self.after_history_step("Redo");
        }
        redone
    }

    fn after_history_step(&mut self, step: &'static str) {
        self.selection.revalidate(&self.page);
        self.version += 1;
        debug!(
            step,
            version = self.version,
            undo_levels = self.history.undo_levels(),
            redo_levels = self.history.redo_levels(),
            "History step"
        );
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history(&self) -> &UndoStack {
        &self.history
    }

    /// Group the following mutations into one undo step
    pub fn begin_batch(&mut self, description: impl Into<String>) {
        self.history.begin_batch(Some(description.into()));
    }

    pub fn end_batch(&mut self) {
        self.history.end_batch();
    }

    /// Select a tag by id, or clear the selection with `None`.
    ///
    /// Unknown ids leave the selection unchanged and return false.
    pub fn set_selected_tag(&mut self, id: Option<TagId>) -> bool {
        match id {
            Some(id) => self.selection.select(&self.page, id),
            None => {
                self.selection.clear();
                true
            }
        }
    }

    pub fn selected(&self) -> Option<&Tag> {
        self.selection.resolve(&self.page)
    }

    pub fn selected_id(&self) -> Option<TagId> {
        self.selection.id()
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn into_page(self) -> Page {
        self.page
    }

    pub fn version(&self) -> u64 {
        self.version
    }
}
