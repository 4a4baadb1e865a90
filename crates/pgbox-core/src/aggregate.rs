//! Conflict-aware aggregation of extension requirements.
//!
//! Turns a list of requested extension names into one unified set of
//! packages, download URLs, preload libraries, server parameters and
//! init SQL. Server-parameter conflicts are collected across the whole
//! request and reported together; the aggregator never silently picks
//! a winner.

use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;

use pgbox_blocks::content_checksum;
use pgbox_catalog::{Catalog, host_arch};
use tracing::debug;

use crate::error::{Error, Result};

/// One deduplicated piece of initialization SQL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SqlFragment {
    /// Name of the contributing extension.
    pub name: String,
    /// Trimmed SQL text.
    pub sql: String,
    /// Content checksum used for dedup.
    pub checksum: String,
}

/// A server parameter set to different values by different extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GucConflict {
    /// The parameter key.
    pub key: String,
    /// Every `(extension, value)` pair that touched the key, in
    /// request order, starting with the one that set it first.
    pub entries: Vec<(String, String)>,
}

impl fmt::Display for GucConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self
            .entries
            .iter()
            .map(|(ext, value)| format!("{}={}", ext, value))
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{}: {}", self.key, entries)
    }
}

/// Merged requirements for one requested extension set.
///
/// Built fresh for every invocation and discarded after rendering.
/// All collections are deterministic: sorted where order has no
/// meaning, content-deduplicated where it does.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Aggregation {
    /// PostgreSQL major version the request targets.
    pub version: String,
    /// Base image: first requested extension with an override wins,
    /// otherwise `postgres:<version>`.
    pub base_image: String,
    /// Apt packages to install, sorted and deduplicated.
    pub packages: Vec<String>,
    /// Direct-download compressed-package URLs, sorted and deduplicated.
    pub tar_urls: Vec<String>,
    /// Direct-download zip-of-package URLs, sorted and deduplicated.
    pub zip_urls: Vec<String>,
    /// Shared-preload library names, sorted and deduplicated.
    pub preload: Vec<String>,
    /// Merged server parameters.
    pub gucs: BTreeMap<String, String>,
    /// Init SQL in request order, deduplicated by content checksum.
    pub sql_fragments: Vec<SqlFragment>,
}

impl Aggregation {
    /// Whether a custom image must be built for this request.
    pub fn needs_custom_image(&self) -> bool {
        !self.packages.is_empty() || !self.tar_urls.is_empty() || !self.zip_urls.is_empty()
    }

    /// Whether the server configuration requires a restart to apply.
    pub fn requires_restart(&self) -> bool {
        !self.preload.is_empty()
    }
}

/// Accumulates values in first-seen order, skipping duplicates, and
/// hands them back sorted.
#[derive(Debug, Default)]
struct SortedSet {
    seen: HashSet<String>,
    values: Vec<String>,
}

impl SortedSet {
    fn insert(&mut self, value: String) {
        if !value.is_empty() && self.seen.insert(value.clone()) {
            self.values.push(value);
        }
    }

    fn into_sorted(mut self) -> Vec<String> {
        self.values.sort_unstable();
        self.values
    }
}

/// Aggregate requirements for the requested extensions, resolving
/// download URLs for the host architecture.
pub fn aggregate<S: AsRef<str>>(
    catalog: &Catalog,
    version: &str,
    names: &[S],
) -> Result<Aggregation> {
    aggregate_with_arch(catalog, version, host_arch(), names)
}

/// Aggregate requirements for an explicit architecture.
///
/// Two-phase: all names are validated up front, and server-parameter
/// conflicts are collected across the full pass before the aggregation
/// fails, so every problem surfaces in one message.
pub fn aggregate_with_arch<S: AsRef<str>>(
    catalog: &Catalog,
    version: &str,
    arch: &str,
    names: &[S],
) -> Result<Aggregation> {
    catalog.validate(names)?;

    let mut packages = SortedSet::default();
    let mut tar_urls = SortedSet::default();
    let mut zip_urls = SortedSet::default();
    let mut preload = SortedSet::default();

    let mut gucs: BTreeMap<String, String> = BTreeMap::new();
    let mut guc_sources: HashMap<String, String> = HashMap::new();
    let mut conflicts: BTreeMap<String, GucConflict> = BTreeMap::new();

    let mut fragments: Vec<SqlFragment> = Vec::new();
    let mut fragment_index: HashMap<String, usize> = HashMap::new();

    let mut base_image: Option<String> = None;

    for name in names {
        let name = name.as_ref();
        // validate() guarantees presence
        let Some(desc) = catalog.get(name) else {
            continue;
        };
        debug!(extension = name, "aggregating");

        if let Some(package) = desc.resolved_package(version) {
            packages.insert(package);
        }
        for url in desc.resolved_tar_urls(version, arch) {
            tar_urls.insert(url);
        }
        for url in desc.resolved_zip_urls(version, arch) {
            zip_urls.insert(url);
        }
        for lib in desc.preload {
            preload.insert(lib.to_string());
        }

        for (key, value) in desc.gucs {
            match gucs.get(*key) {
                None => {
                    gucs.insert(key.to_string(), value.to_string());
                    guc_sources.insert(key.to_string(), name.to_string());
                }
                Some(existing) if existing == value => {}
                Some(existing) => {
                    let conflict = conflicts.entry(key.to_string()).or_insert_with(|| {
                        let source = guc_sources
                            .get(*key)
                            .cloned()
                            .unwrap_or_default();
                        GucConflict {
                            key: key.to_string(),
                            entries: vec![(source, existing.clone())],
                        }
                    });
                    conflict.entries.push((name.to_string(), value.to_string()));
                }
            }
        }

        let sql = desc.resolved_init_sql();
        let sql = sql.trim();
        if !sql.is_empty() {
            let checksum = content_checksum(sql);
            match fragment_index.get(&checksum) {
                // identical content collapses; the lexicographically
                // smallest contributor labels it, independent of
                // request order
                Some(&i) => {
                    if name < fragments[i].name.as_str() {
                        fragments[i].name = name.to_string();
                    }
                }
                None => {
                    fragment_index.insert(checksum.clone(), fragments.len());
                    fragments.push(SqlFragment {
                        name: name.to_string(),
                        sql: sql.to_string(),
                        checksum,
                    });
                }
            }
        }

        if base_image.is_none() {
            base_image = desc.resolved_base_image(version);
        }
    }

    if !conflicts.is_empty() {
        return Err(Error::GucConflicts {
            conflicts: conflicts.into_values().collect(),
        });
    }

    Ok(Aggregation {
        version: version.to_string(),
        base_image: base_image.unwrap_or_else(|| format!("postgres:{}", version)),
        packages: packages.into_sorted(),
        tar_urls: tar_urls.into_sorted(),
        zip_urls: zip_urls.into_sorted(),
        preload: preload.into_sorted(),
        gucs,
        sql_fragments: fragments,
    })
}
