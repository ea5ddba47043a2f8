use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Unknown breakpoint: {0} (expected pc, mob, tab, wide or ultra)")]
    UnknownBreakpoint(String),

    #[error("Unknown children type: {0}")]
    UnknownChildrenType(String),

    #[error("Invalid column count: {0} (expected 2, 3, 4, 5, 6 or 12)")]
    InvalidColumns(u8),

    #[error("Invalid tag id: {0}")]
    InvalidId(String),
}
