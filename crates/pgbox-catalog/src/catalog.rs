//! The built-in extension catalog.
//!
//! A static table of known PostgreSQL extensions, indexed by name.
//! Contrib extensions ship with the base image and contribute no
//! package; PGDG extensions install an apt package; a handful either
//! download release archives directly or replace the base image
//! entirely.

use std::collections::HashMap;

use crate::descriptor::ExtensionDescriptor;
use crate::error::{Error, Result};

/// Template with every optional field empty, for struct-update syntax.
const BASE: ExtensionDescriptor = ExtensionDescriptor {
    name: "",
    description: "",
    package: None,
    tar_urls: &[],
    zip_urls: &[],
    base_image: None,
    sql_name: None,
    preload: &[],
    gucs: &[],
    init_sql: None,
};

/// All known extensions.
///
/// Keys must be globally unique; `Catalog::builtin` asserts this in
/// debug builds.
static BUILTIN: &[ExtensionDescriptor] = &[
    // --- contrib modules (ship with the postgres image) ---
    ExtensionDescriptor {
        name: "hstore",
        description: "Key/value pairs within a single column",
        ..BASE
    },
    ExtensionDescriptor {
        name: "pg_trgm",
        description: "Trigram matching for fuzzy text search",
        ..BASE
    },
    ExtensionDescriptor {
        name: "pgcrypto",
        description: "Cryptographic functions",
        ..BASE
    },
    ExtensionDescriptor {
        name: "citext",
        description: "Case-insensitive character string type",
        ..BASE
    },
    ExtensionDescriptor {
        name: "ltree",
        description: "Hierarchical tree-like label type",
        ..BASE
    },
    ExtensionDescriptor {
        name: "cube",
        description: "Multidimensional cube data type",
        ..BASE
    },
    ExtensionDescriptor {
        name: "earthdistance",
        description: "Great-circle distance calculations",
        init_sql: Some(
            "CREATE EXTENSION IF NOT EXISTS cube;\nCREATE EXTENSION IF NOT EXISTS earthdistance;",
        ),
        ..BASE
    },
    ExtensionDescriptor {
        name: "intarray",
        description: "Integer array operators and functions",
        ..BASE
    },
    ExtensionDescriptor {
        name: "tablefunc",
        description: "Crosstab and other table-returning functions",
        ..BASE
    },
    ExtensionDescriptor {
        name: "unaccent",
        description: "Text search dictionary that removes accents",
        ..BASE
    },
    ExtensionDescriptor {
        name: "fuzzystrmatch",
        description: "Soundex, Levenshtein and other string similarity",
        ..BASE
    },
    ExtensionDescriptor {
        name: "btree_gin",
        description: "GIN operator classes for B-tree types",
        ..BASE
    },
    ExtensionDescriptor {
        name: "btree_gist",
        description: "GiST operator classes for B-tree types",
        ..BASE
    },
    ExtensionDescriptor {
        name: "bloom",
        description: "Bloom-filter index access method",
        ..BASE
    },
    ExtensionDescriptor {
        name: "pg_buffercache",
        description: "Inspect the shared buffer cache",
        ..BASE
    },
    ExtensionDescriptor {
        name: "pgrowlocks",
        description: "Show row-level locking information",
        ..BASE
    },
    ExtensionDescriptor {
        name: "pgstattuple",
        description: "Tuple-level statistics",
        ..BASE
    },
    ExtensionDescriptor {
        name: "uuid-ossp",
        description: "UUID generation functions",
        sql_name: Some("\"uuid-ossp\""),
        ..BASE
    },
    // contrib, but needs preloading and has no CREATE EXTENSION
    ExtensionDescriptor {
        name: "auto_explain",
        description: "Log execution plans of slow statements",
        preload: &["auto_explain"],
        gucs: &[("auto_explain.log_min_duration", "250ms")],
        init_sql: Some(""),
        ..BASE
    },
    ExtensionDescriptor {
        name: "pg_stat_statements",
        description: "Track planning and execution statistics of all statements",
        preload: &["pg_stat_statements"],
        gucs: &[("pg_stat_statements.track", "all")],
        ..BASE
    },
    // --- PGDG packages ---
    ExtensionDescriptor {
        name: "pgvector",
        description: "Vector similarity search",
        package: Some("postgresql-%v-pgvector"),
        sql_name: Some("vector"),
        ..BASE
    },
    ExtensionDescriptor {
        name: "pg_cron",
        description: "Run periodic jobs inside the database",
        package: Some("postgresql-%v-cron"),
        preload: &["pg_cron"],
        gucs: &[("cron.database_name", "postgres")],
        ..BASE
    },
    ExtensionDescriptor {
        name: "postgis",
        description: "Geographic objects and spatial queries",
        package: Some("postgresql-%v-postgis-3"),
        ..BASE
    },
    ExtensionDescriptor {
        name: "pgrouting",
        description: "Geospatial routing on top of PostGIS",
        package: Some("postgresql-%v-pgrouting"),
        init_sql: Some(
            "CREATE EXTENSION IF NOT EXISTS postgis;\nCREATE EXTENSION IF NOT EXISTS pgrouting;",
        ),
        ..BASE
    },
    ExtensionDescriptor {
        name: "hypopg",
        description: "Hypothetical indexes for query planning",
        package: Some("postgresql-%v-hypopg"),
        ..BASE
    },
    ExtensionDescriptor {
        name: "pgaudit",
        description: "Detailed session and object audit logging",
        package: Some("postgresql-%v-pgaudit"),
        preload: &["pgaudit"],
        gucs: &[("pgaudit.log", "ddl")],
        ..BASE
    },
    ExtensionDescriptor {
        name: "pg_partman",
        description: "Automated partition management",
        package: Some("postgresql-%v-partman"),
        preload: &["pg_partman_bgw"],
        gucs: &[
            ("pg_partman_bgw.dbname", "postgres"),
            ("pg_partman_bgw.interval", "3600"),
        ],
        ..BASE
    },
    ExtensionDescriptor {
        name: "pg_hint_plan",
        description: "Planner hints via SQL comments",
        package: Some("postgresql-%v-pg-hint-plan"),
        preload: &["pg_hint_plan"],
        ..BASE
    },
    ExtensionDescriptor {
        name: "pg_repack",
        description: "Reorganize tables without exclusive locks",
        package: Some("postgresql-%v-repack"),
        ..BASE
    },
    ExtensionDescriptor {
        name: "pg_squeeze",
        description: "Automatic removal of table bloat",
        package: Some("postgresql-%v-squeeze"),
        preload: &["pg_squeeze"],
        ..BASE
    },
    ExtensionDescriptor {
        name: "plpgsql_check",
        description: "Static analysis of PL/pgSQL functions",
        package: Some("postgresql-%v-plpgsql-check"),
        ..BASE
    },
    ExtensionDescriptor {
        name: "wal2json",
        description: "JSON output plugin for logical decoding",
        package: Some("postgresql-%v-wal2json"),
        init_sql: Some(""),
        ..BASE
    },
    ExtensionDescriptor {
        name: "orafce",
        description: "Oracle compatibility functions",
        package: Some("postgresql-%v-orafce"),
        ..BASE
    },
    ExtensionDescriptor {
        name: "pgtap",
        description: "Unit testing framework for SQL",
        package: Some("postgresql-%v-pgtap"),
        ..BASE
    },
    ExtensionDescriptor {
        name: "http",
        description: "HTTP client callable from SQL",
        package: Some("postgresql-%v-http"),
        ..BASE
    },
    ExtensionDescriptor {
        name: "rum",
        description: "RUM index access method for full-text ranking",
        package: Some("postgresql-%v-rum"),
        ..BASE
    },
    // --- direct-download release archives ---
    ExtensionDescriptor {
        name: "pg_net",
        description: "Asynchronous HTTP requests from SQL",
        tar_urls: &[
            "https://github.com/supabase/pg_net/releases/download/v0.14.0/pg_net-v0.14.0-pg%v-%a-linux-gnu.tar.gz",
        ],
        preload: &["pg_net"],
        ..BASE
    },
    ExtensionDescriptor {
        name: "pg_jsonschema",
        description: "JSON Schema validation functions",
        zip_urls: &[
            "https://github.com/supabase/pg_jsonschema/releases/download/v0.3.3/pg_jsonschema-v0.3.3-pg%v-%a-linux-gnu.deb.zip",
        ],
        ..BASE
    },
    // --- base-image overrides ---
    ExtensionDescriptor {
        name: "timescaledb",
        description: "Time-series tables with automatic partitioning",
        base_image: Some("timescale/timescaledb:latest-pg%v"),
        preload: &["timescaledb"],
        ..BASE
    },
    ExtensionDescriptor {
        name: "citus",
        description: "Distributed tables and columnar storage",
        base_image: Some("citusdata/citus:13.0-pg%v"),
        preload: &["citus"],
        ..BASE
    },
];

/// Catalog of known extensions.
///
/// Built once per invocation from the static table and passed
/// explicitly to whoever needs lookups; there is no global state.
#[derive(Debug, Clone)]
pub struct Catalog {
    entries: HashMap<&'static str, &'static ExtensionDescriptor>,
}

impl Catalog {
    /// Build the catalog from the compiled-in extension table.
    pub fn builtin() -> Self {
        Self::from_descriptors(BUILTIN)
    }

    /// Build a catalog from an explicit descriptor table.
    ///
    /// `builtin` is the production path; this constructor exists so
    /// callers and tests can work against a controlled table.
    pub fn from_descriptors(descriptors: &'static [ExtensionDescriptor]) -> Self {
        let mut entries = HashMap::with_capacity(descriptors.len());
        for desc in descriptors {
            let previous = entries.insert(desc.name, desc);
            debug_assert!(previous.is_none(), "duplicate catalog key: {}", desc.name);
        }
        Self { entries }
    }

    /// Look up an extension by name.
    pub fn get(&self, name: &str) -> Option<&'static ExtensionDescriptor> {
        self.entries.get(name).copied()
    }

    /// Check if an extension is known.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// List all known extension names (sorted).
    pub fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<&'static str> = self.entries.keys().copied().collect();
        names.sort_unstable();
        names
    }

    /// Number of catalog entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the catalog is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Validate that every requested name exists.
    ///
    /// Collects *all* unknown names before failing so the user sees the
    /// complete list in one message.
    pub fn validate<S: AsRef<str>>(&self, names: &[S]) -> Result<()> {
        let unknown: Vec<String> = names
            .iter()
            .map(|n| n.as_ref())
            .filter(|n| !self.contains(n))
            .map(str::to_string)
            .collect();
        if unknown.is_empty() {
            Ok(())
        } else {
            Err(Error::unknown(unknown))
        }
    }
}
