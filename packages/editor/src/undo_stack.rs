//! # Undo/Redo Stack
//!
//! Snapshot-based history for a page and its selection.
//!
//! ## Design
//!
//! - Before a recorded mutation is applied, the previous `{page, selection}` is
//!   pushed as a snapshot (moved, never shared with the live page)
//! - Undo swaps the live state with the newest snapshot and moves it to redo
//! - Redo does the reverse
//! - Under [`RedoPolicy::ClearOnEdit`] new edits clear the redo stack
//! - Batches group several mutations into one undo step
//!
//! ## Example
//!
//! ```rust,ignore
//! let mut stack = UndoStack::new();
//!
//! stack.record(Snapshot::new(page.clone(), selection, "Wrap"));
//! // ... mutate page ...
//!
//! stack.undo(&mut page, &mut selection);
//! stack.redo(&mut page, &mut selection);
//! ```

use crate::Selection;
use serde::{Deserialize, Serialize};
use std::mem;
use tagbuilder_model::Page;

/// Default number of undo levels kept
pub const DEFAULT_MAX_LEVELS: usize = 100;

/// What happens to undone states when a new edit is recorded
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum RedoPolicy {
    /// A new edit discards everything that was undone
    #[default]
    #[serde(rename = "clear")]
    ClearOnEdit,

    /// Undone states stay redoable after new edits
    #[serde(rename = "retain")]
    Retain,
}

/// Page and selection as they were before an edit
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    pub page: Page,
    pub selection: Selection,

    /// Label of the edit that followed this state
    pub description: Option<String>,
}

impl Snapshot {
    pub fn new(page: Page, selection: Selection, description: impl Into<String>) -> Self {
        Self {
            page,
            selection,
            description: Some(description.into()),
        }
    }
}

#[derive(Debug)]
struct OpenBatch {
    description: Option<String>,
    recorded: bool,
}

/// Undo/redo stack for page editing
#[derive(Debug)]
pub struct UndoStack {
    /// Past states (most recent last)
    undo_stack: Vec<Snapshot>,

    /// Undone states (most recent last)
    redo_stack: Vec<Snapshot>,

    /// Maximum number of undo levels (0 = unlimited)
    max_levels: usize,

    redo_policy: RedoPolicy,

    /// Currently building a batch
    current_batch: Option<OpenBatch>,
}

impl UndoStack {
    /// Create a new undo stack with default max levels (100)
    pub fn new() -> Self {
        Self::with_max_levels(DEFAULT_MAX_LEVELS)
    }

    pub fn with_max_levels(max_levels: usize) -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            max_levels,
            redo_policy: RedoPolicy::default(),
            current_batch: None,
        }
    }

    pub fn with_redo_policy(mut self, redo_policy: RedoPolicy) -> Self {
        self.redo_policy = redo_policy;
        self
    }

    pub fn redo_policy(&self) -> RedoPolicy {
        self.redo_policy
    }

    /// Record the state before an edit.
    ///
    /// Inside a batch only the first snapshot is kept, labelled with the
    /// batch description when one was given.
    pub fn record(&mut self, mut snapshot: Snapshot) {
        if let Some(batch) = &mut self.current_batch {
            if batch.recorded {
                return;
            }
            batch.recorded = true;
            if batch.description.is_some() {
                snapshot.description = batch.description.clone();
            }
        }
        self.push(snapshot);
    }

    fn push(&mut self, snapshot: Snapshot) {
        self.undo_stack.push(snapshot);

        if self.max_levels > 0 && self.undo_stack.len() > self.max_levels {
            let excess = self.undo_stack.len() - self.max_levels;
            self.undo_stack.drain(..excess);
        }

        self.discard_redo();
    }

    /// Drop the redo stack under [`RedoPolicy::ClearOnEdit`].
    /// Called for edits that change the page without recording a snapshot.
    pub fn discard_redo(&mut self) {
        if self.redo_policy == RedoPolicy::ClearOnEdit {
            self.redo_stack.clear();
        }
    }

    /// Start a batch of edits (undone/redone together)
    pub fn begin_batch(&mut self, description: Option<String>) {
        self.current_batch = Some(OpenBatch {
            description,
            recorded: false,
        });
    }

    pub fn end_batch(&mut self) {
        self.current_batch = None;
    }

    pub fn in_batch(&self) -> bool {
        self.current_batch.is_some()
    }

    /// Restore the most recent snapshot; the live state moves to the redo stack.
    ///
    /// Returns false when there is nothing to undo. Closes any open batch.
    pub fn undo(&mut self, page: &mut Page, selection: &mut Selection) -> bool {
        self.end_batch();
        match self.undo_stack.pop() {
            Some(mut snapshot) => {
                swap_live(&mut snapshot, page, selection);
                self.redo_stack.push(snapshot);
                true
            }
            None => false,
        }
    }

    /// Restore the most recently undone snapshot
    pub fn redo(&mut self, page: &mut Page, selection: &mut Selection) -> bool {
        self.end_batch();
        match self.redo_stack.pop() {
            Some(mut snapshot) => {
                swap_live(&mut snapshot, page, selection);
                self.undo_stack.push(snapshot);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        !self.undo_stack.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo_stack.is_empty()
    }

    pub fn undo_levels(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_levels(&self) -> usize {
        self.redo_stack.len()
    }

    /// Clear all undo/redo history
    pub fn clear(&mut self) {
        self.undo_stack.clear();
        self.redo_stack.clear();
        self.current_batch = None;
    }

    /// Description of the edit the next undo reverts
    pub fn undo_description(&self) -> Option<&str> {
        self.undo_stack
            .last()
            .and_then(|snapshot| snapshot.description.as_deref())
    }

    /// Description of the edit the next redo reapplies
    pub fn redo_description(&self) -> Option<&str> {
        self.redo_stack
            .last()
            .and_then(|snapshot| snapshot.description.as_deref())
    }
}

impl Default for UndoStack {
    fn default() -> Self {
        Self::new()
    }
}

fn swap_live(snapshot: &mut Snapshot, page: &mut Page, selection: &mut Selection) {
    mem::swap(&mut snapshot.page, page);
    mem::swap(&mut snapshot.selection, selection);
}
