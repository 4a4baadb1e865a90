//! Error types for pgbox-core

use crate::aggregate::GucConflict;

/// Result type for pgbox-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during aggregation
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Unknown extension names, from catalog validation.
    #[error(transparent)]
    Catalog(#[from] pgbox_catalog::Error),

    /// Two or more extensions set the same server parameter to
    /// different values. Carries every conflict found in the request,
    /// never just the first.
    #[error("conflicting server parameters:\n{}", summarize(conflicts))]
    GucConflicts { conflicts: Vec<GucConflict> },
}

fn summarize(conflicts: &[GucConflict]) -> String {
    conflicts
        .iter()
        .map(|c| format!("  {}", c))
        .collect::<Vec<_>>()
        .join("\n")
}
