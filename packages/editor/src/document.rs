//! # Document Handle
//!
//! A Document is one page on disk (or in memory) plus its save state.
//! Documents can be:
//! - **Memory-backed**: Temporary, for testing or in-memory operations
//! - **File-backed**: Loaded from and saved to a JSON file
//!
//! ## Lifecycle
//!
//! ```text
//! Load → Validate → Edit (EditSession) → Replace page → Save
//!   ↓       ↓              ↓                   ↓          ↓
//! JSON   unique ids    mutations           version++    JSON
//! ```

use crate::EditorError;
use std::path::{Path, PathBuf};
use tagbuilder_model::{count_tags, duplicate_ids, Page};
use tracing::{debug, info};

/// Editable page document
#[derive(Debug)]
pub struct Document {
    /// Path to the JSON file (informational for memory-backed documents)
    pub path: PathBuf,

    /// Current version number (increments on each page replacement)
    pub version: u64,

    storage: DocumentStorage,
}

/// Storage backend for document
#[derive(Debug)]
pub enum DocumentStorage {
    /// In-memory only (for testing, temp docs)
    Memory { page: Page },

    /// File-backed
    File { page: Page, dirty: bool },
}

impl Document {
    /// Wrap an existing page (memory-backed)
    pub fn new(path: impl Into<PathBuf>, page: Page) -> Result<Self, EditorError> {
        validate(&page)?;
        Ok(Self {
            path: path.into(),
            version: 0,
            storage: DocumentStorage::Memory { page },
        })
    }

    /// Parse a page from JSON text (memory-backed)
    pub fn from_json(path: impl Into<PathBuf>, source: &str) -> Result<Self, EditorError> {
        let page: Page = serde_json::from_str(source)?;
        Self::new(path, page)
    }

    /// Load a page from a JSON file (file-backed)
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, EditorError> {
        let path = path.into();
        let source = std::fs::read_to_string(&path)?;
        let page: Page = serde_json::from_str(&source)?;
        validate(&page)?;

        info!(
            path = %path.display(),
            page = %page.name,
            tags = count_tags(&page.root),
            "Loaded page"
        );

        Ok(Self {
            path,
            version: 0,
            storage: DocumentStorage::File { page, dirty: false },
        })
    }

    pub fn page(&self) -> &Page {
        match &self.storage {
            DocumentStorage::Memory { page } | DocumentStorage::File { page, .. } => page,
        }
    }

    pub fn into_page(self) -> Page {
        match self.storage {
            DocumentStorage::Memory { page } | DocumentStorage::File { page, .. } => page,
        }
    }

    /// Swap in an edited page (typically an [`EditSession`](crate::EditSession)'s result)
    pub fn replace_page(&mut self, new_page: Page) -> Result<u64, EditorError> {
        validate(&new_page)?;

        match &mut self.storage {
            DocumentStorage::Memory { page } => *page = new_page,
            DocumentStorage::File { page, dirty } => {
                *page = new_page;
                *dirty = true;
            }
        }
        self.version += 1;

        debug!(path = %self.path.display(), version = self.version, "Replaced page");
        Ok(self.version)
    }

    /// Check if document has unsaved changes
    pub fn is_dirty(&self) -> bool {
        match &self.storage {
            DocumentStorage::File { dirty, .. } => *dirty,
            DocumentStorage::Memory { .. } => false,
        }
    }

    /// Save document to disk (if file-backed)
    pub fn save(&mut self) -> Result<(), EditorError> {
        match &mut self.storage {
            DocumentStorage::File { page, dirty } => {
                write_page(&self.path, page)?;
                *dirty = false;
                info!(path = %self.path.display(), "Saved page");
                Ok(())
            }
            DocumentStorage::Memory { .. } => Err(EditorError::NotFileBacked),
        }
    }

    /// Write to `path` and make the document file-backed there
    pub fn save_as(&mut self, path: impl Into<PathBuf>) -> Result<(), EditorError> {
        let path = path.into();
        write_page(&path, self.page())?;

        let page = self.page().clone();
        self.storage = DocumentStorage::File { page, dirty: false };
        self.path = path;

        info!(path = %self.path.display(), "Saved page");
        Ok(())
    }

    /// Pretty-printed JSON of the current page
    pub fn to_json(&self) -> Result<String, EditorError> {
        Ok(serde_json::to_string_pretty(self.page())?)
    }
}

fn validate(page: &Page) -> Result<(), EditorError> {
    match duplicate_ids(&page.root).first() {
        Some(id) => Err(EditorError::DuplicateId(*id)),
        None => Ok(()),
    }
}

fn write_page(path: &Path, page: &Page) -> Result<(), EditorError> {
    let mut json = serde_json::to_string_pretty(page)?;
    json.push('\n');
    std::fs::write(path, json)?;
    Ok(())
}
