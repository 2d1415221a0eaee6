use thiserror::Error;

/// Errors reported by controller operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TabStateError {
    #[error("tab index {index} is out of range for {len} tabs")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Errors raised by a key-value store backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("storage write failed: {0}")]
    Write(String),
}

/// Errors raised while loading a screen policy table.
#[derive(Debug, Error)]
pub enum PolicyError {
    #[error("invalid screen policy table: {0}")]
    Parse(#[from] serde_json::Error),
}
