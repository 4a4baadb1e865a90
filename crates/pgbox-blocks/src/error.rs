//! Error types for pgbox-blocks

use std::path::PathBuf;

/// Result type for pgbox-blocks operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during file parsing and writing
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Lock acquisition failed for {path}")]
    LockFailed { path: PathBuf },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
