//! # Tag Builder Editor
//!
//! Tree-editing core for the page builder.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────┐
//! │ model: Page / Tag tree, ids, lookups        │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ editor: sessions + mutations                │
//! │  - Structural edits (wrap, unwrap, clone..) │
//! │  - Snapshot undo/redo                       │
//! │  - Selection kept valid across edits        │
//! │  - Load/save page documents                 │
//! └─────────────────────────────────────────────┘
//!                     ↓
//! ┌─────────────────────────────────────────────┐
//! │ renderer (external): Page → UI              │
//! └─────────────────────────────────────────────┘
//! ```
//!
//! ## Core Principles
//!
//! 1. **Page is the source of truth**: rendering is a derived view
//! 2. **Fail safe**: invalid edits are no-ops, never panics or partial writes
//! 3. **Copy-on-write**: history snapshots never alias the live page
//! 4. **No global state**: a session owns page, history, selection and ids
//!
//! ## Usage
//!
//! ```rust,ignore
//! use tagbuilder_editor::{Document, EditSession};
//!
//! let mut doc = Document::load("home.json")?;
//! let mut session = EditSession::new(doc.page().clone());
//!
//! session.wrap(TagId(42));
//! session.append(TagId(42));
//! session.undo();
//!
//! doc.replace_page(session.into_page())?;
//! doc.save()?;
//! ```

mod document;
mod errors;
mod mutations;
mod selection;
mod session;
mod undo_stack;

pub use document::{Document, DocumentStorage};
pub use errors::EditorError;
pub use mutations::{Mutation, MutationError, MutationOutcome};
pub use selection::Selection;
pub use session::{EditSession, MutationResult, SessionConfig};
pub use undo_stack::{RedoPolicy, Snapshot, UndoStack, DEFAULT_MAX_LEVELS};

// Re-export model types for convenience
pub use tagbuilder_model as model;
