//! Error types for pgbox-cli

/// Result type for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors that can occur in CLI operations
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Error from the extension catalog
    #[error(transparent)]
    Catalog(#[from] pgbox_catalog::Error),

    /// Error from aggregation or naming
    #[error(transparent)]
    Core(#[from] pgbox_core::Error),

    /// Error from artifact rendering
    #[error(transparent)]
    Artifacts(#[from] pgbox_artifacts::Error),

    /// Error from the anchored renderer
    #[error(transparent)]
    Blocks(#[from] pgbox_blocks::Error),

    /// Error from the container runtime
    #[error(transparent)]
    Runtime(#[from] pgbox_runtime::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),

    /// User-facing error with a message
    #[error("{message}")]
    User { message: String },
}

impl CliError {
    /// Create a new user error with the given message
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
        }
    }
}
