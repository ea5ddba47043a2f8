//! Error types for the editor

use tagbuilder_model::TagId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EditorError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Duplicate tag id {0} in page")]
    DuplicateId(TagId),

    #[error("Document is not file-backed")]
    NotFileBacked,
}
