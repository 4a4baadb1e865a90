//! Error types for pgbox-catalog

/// Result type for catalog operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during catalog lookups
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// One or more requested extension names are not in the catalog.
    ///
    /// Always carries the complete list of offending names, not just
    /// the first one encountered.
    #[error("unknown extensions: {}", names.join(", "))]
    UnknownExtensions { names: Vec<String> },
}

impl Error {
    /// Create an unknown-extensions error from the collected offenders.
    pub fn unknown(names: Vec<String>) -> Self {
        Self::UnknownExtensions { names }
    }
}
