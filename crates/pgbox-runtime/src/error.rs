//! Error types for pgbox-runtime

/// Result type for runtime operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors from the container-runtime boundary
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The runtime binary could not be invoked at all.
    #[error("failed to invoke '{binary}': {source}")]
    Spawn {
        binary: String,
        #[source]
        source: std::io::Error,
    },

    /// The runtime returned non-zero. The captured combined output is
    /// appended verbatim to aid diagnosis; it is never interpreted.
    #[error("command failed: {command}\n{output}")]
    CommandFailed { command: String, output: String },
}
