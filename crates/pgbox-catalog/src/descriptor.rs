//! Extension descriptor and template resolution.
//!
//! A descriptor captures everything needed to install and enable one
//! PostgreSQL extension: the apt package (or direct-download archives)
//! that provides it, the shared libraries it must preload, the server
//! parameters it requires, and the SQL that creates it.

/// Placeholder for the PostgreSQL major version in templates.
pub const VERSION_PLACEHOLDER: &str = "%v";

/// Placeholder for the dpkg architecture (`amd64`, `arm64`) in URL templates.
pub const ARCH_PLACEHOLDER: &str = "%a";

/// Static description of one catalog extension.
///
/// Descriptors are compiled-in reference data; they are never mutated
/// after process start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtensionDescriptor {
    /// Catalog key. Globally unique, matches what users pass on the CLI.
    pub name: &'static str,
    /// Human-readable description, shown by `pgbox list`.
    pub description: &'static str,
    /// Apt package template (`%v` = PG major), if the extension is
    /// installed from the PGDG repository. Contrib extensions that ship
    /// with the base image have no package.
    pub package: Option<&'static str>,
    /// Direct-download URLs for gzip-compressed package archives
    /// (`%v` = PG major, `%a` = dpkg architecture).
    pub tar_urls: &'static [&'static str],
    /// Direct-download URLs for zip archives containing a package.
    pub zip_urls: &'static [&'static str],
    /// Base-image override template (`%v` = PG major). Extensions that
    /// ship their own image (e.g. timescaledb) set this instead of a
    /// package.
    pub base_image: Option<&'static str>,
    /// Name used in `CREATE EXTENSION`, when it differs from the
    /// catalog key (e.g. pgvector's SQL name is `vector`).
    pub sql_name: Option<&'static str>,
    /// Libraries that must appear in `shared_preload_libraries`.
    pub preload: &'static [&'static str],
    /// Server parameters the extension requires, as `(key, value)` pairs.
    pub gucs: &'static [(&'static str, &'static str)],
    /// Custom initialization SQL. `None` falls back to a generated
    /// `CREATE EXTENSION IF NOT EXISTS <sql-name>;`. An empty string
    /// means the extension needs no SQL at all (e.g. auto_explain).
    pub init_sql: Option<&'static str>,
}

/// Substitute version and architecture placeholders in a template.
fn substitute(template: &str, version: &str, arch: &str) -> String {
    template
        .replace(VERSION_PLACEHOLDER, version)
        .replace(ARCH_PLACEHOLDER, arch)
}

impl ExtensionDescriptor {
    /// The name used in `CREATE EXTENSION`, defaulting to the catalog key.
    pub fn resolved_sql_name(&self) -> &str {
        self.sql_name.unwrap_or(self.name)
    }

    /// The apt package for a given PG major version, if any.
    pub fn resolved_package(&self, version: &str) -> Option<String> {
        self.package.map(|t| substitute(t, version, ""))
    }

    /// The base-image override for a given PG major version, if any.
    pub fn resolved_base_image(&self, version: &str) -> Option<String> {
        self.base_image.map(|t| substitute(t, version, ""))
    }

    /// Direct-download archive URLs with placeholders resolved.
    pub fn resolved_tar_urls(&self, version: &str, arch: &str) -> Vec<String> {
        self.tar_urls
            .iter()
            .map(|t| substitute(t, version, arch))
            .collect()
    }

    /// Direct-download zip URLs with placeholders resolved.
    pub fn resolved_zip_urls(&self, version: &str, arch: &str) -> Vec<String> {
        self.zip_urls
            .iter()
            .map(|t| substitute(t, version, arch))
            .collect()
    }

    /// The initialization SQL for this extension.
    ///
    /// Custom SQL wins; otherwise a `CREATE EXTENSION IF NOT EXISTS`
    /// statement is generated from the resolved SQL name.
    pub fn resolved_init_sql(&self) -> String {
        match self.init_sql {
            Some(sql) => sql.to_string(),
            None => format!(
                "CREATE EXTENSION IF NOT EXISTS {};",
                self.resolved_sql_name()
            ),
        }
    }
}

/// Map the host architecture to its dpkg name.
///
/// Used when resolving direct-download URL templates for the machine
/// the image will be built on.
pub fn host_arch() -> &'static str {
    match std::env::consts::ARCH {
        "x86_64" => "amd64",
        "aarch64" => "arm64",
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PLAIN: ExtensionDescriptor = ExtensionDescriptor {
        name: "hstore",
        description: "Key/value store",
        package: None,
        tar_urls: &[],
        zip_urls: &[],
        base_image: None,
        sql_name: None,
        preload: &[],
        gucs: &[],
        init_sql: None,
    };

    #[test]
    fn sql_name_defaults_to_key() {
        assert_eq!(PLAIN.resolved_sql_name(), "hstore");
    }

    #[test]
    fn init_sql_defaults_to_create_extension() {
        assert_eq!(
            PLAIN.resolved_init_sql(),
            "CREATE EXTENSION IF NOT EXISTS hstore;"
        );
    }

    #[test]
    fn package_template_substitutes_version() {
        let desc = ExtensionDescriptor {
            package: Some("postgresql-%v-pgvector"),
            ..PLAIN
        };
        assert_eq!(
            desc.resolved_package("17"),
            Some("postgresql-17-pgvector".to_string())
        );
    }

    #[test]
    fn no_package_resolves_to_none() {
        assert_eq!(PLAIN.resolved_package("17"), None);
    }

    #[test]
    fn url_template_substitutes_version_and_arch() {
        let desc = ExtensionDescriptor {
            tar_urls: &["https://example.com/ext-pg%v-%a.tar.gz"],
            ..PLAIN
        };
        assert_eq!(
            desc.resolved_tar_urls("17", "amd64"),
            vec!["https://example.com/ext-pg17-amd64.tar.gz".to_string()]
        );
    }

    #[test]
    fn custom_init_sql_wins() {
        let desc = ExtensionDescriptor {
            init_sql: Some("CREATE EXTENSION IF NOT EXISTS cube;"),
            ..PLAIN
        };
        assert_eq!(desc.resolved_init_sql(), "CREATE EXTENSION IF NOT EXISTS cube;");
    }

    #[test]
    fn empty_init_sql_stays_empty() {
        let desc = ExtensionDescriptor {
            init_sql: Some(""),
            ..PLAIN
        };
        assert_eq!(desc.resolved_init_sql(), "");
    }
}
