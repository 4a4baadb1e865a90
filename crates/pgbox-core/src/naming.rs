//! Deterministic container and image naming.
//!
//! Names are derived from the PostgreSQL version plus a short hash of
//! the requested extensions' *resolved* configuration, not just their
//! names. Changing a catalog entry's definition (say, a GUC default)
//! therefore produces a different name and correctly invalidates any
//! previously built image, even when the user's request is unchanged.

use pgbox_blocks::ShortHasher;
use pgbox_catalog::Catalog;

/// Prefix for all container and image names produced by pgbox.
pub const NAME_PREFIX: &str = "pgbox";

/// Short hash of the resolved configuration of the requested
/// extensions, or `None` when no extensions are requested.
///
/// Names are hashed sorted, so the hash is insensitive to request
/// order. Callers are expected to have validated the names; an
/// unknown name contributes only its own text.
pub fn config_hash<S: AsRef<str>>(catalog: &Catalog, version: &str, names: &[S]) -> Option<String> {
    if names.is_empty() {
        return None;
    }

    let mut sorted: Vec<&str> = names.iter().map(|n| n.as_ref()).collect();
    sorted.sort_unstable();
    sorted.dedup();

    let mut hasher = ShortHasher::new();
    for name in sorted {
        hasher.update(name);
        if let Some(desc) = catalog.get(name) {
            hasher.update(&desc.resolved_package(version).unwrap_or_default());
            hasher.update(&desc.preload.join(","));
            let mut gucs: Vec<String> = desc
                .gucs
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            gucs.sort_unstable();
            hasher.update(&gucs.join(","));
            hasher.update(&desc.resolved_init_sql());
        }
    }
    Some(hasher.finish())
}

/// Container name for a request: `pgbox-pg<version>` for a plain
/// server, `pgbox-pg<version>-<hash>` when extensions are requested.
pub fn container_name<S: AsRef<str>>(catalog: &Catalog, version: &str, names: &[S]) -> String {
    match config_hash(catalog, version, names) {
        Some(hash) => format!("{}-pg{}-{}", NAME_PREFIX, version, hash),
        None => format!("{}-pg{}", NAME_PREFIX, version),
    }
}

/// Image reference for a request: the unmodified base image when no
/// extensions are requested (no custom image needed), otherwise a
/// local tag incorporating the configuration hash.
pub fn image_name<S: AsRef<str>>(catalog: &Catalog, version: &str, names: &[S]) -> String {
    match config_hash(catalog, version, names) {
        Some(hash) => format!("{}-pg{}-custom:{}", NAME_PREFIX, version, hash),
        None => format!("postgres:{}", version),
    }
}
