//! Error types for pgbox-artifacts

/// Result type for artifact operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or rendering artifacts
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// File parsing or writing failure from the anchored renderer.
    #[error(transparent)]
    Blocks(#[from] pgbox_blocks::Error),

    /// A server parameter was already set to a different value.
    #[error("server parameter '{key}' already set to '{existing}', refusing '{requested}'")]
    GucConflict {
        key: String,
        existing: String,
        requested: String,
    },
}
