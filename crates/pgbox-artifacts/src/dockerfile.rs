//! Dockerfile artifact.
//!
//! Describes the custom image build: a fixed header (`ARG PG_MAJOR` /
//! `FROM`) plus up to three install blocks inside the anchored region:
//! apt packages from the PGDG repository, direct-download compressed
//! packages, and zip archives containing packages. Blocks are emitted
//! only when non-empty.

use std::collections::BTreeSet;

/// In-memory Dockerfile specification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockerfileSpec {
    version: String,
    base_image: String,
    packages: BTreeSet<String>,
    tar_urls: BTreeSet<String>,
    zip_urls: BTreeSet<String>,
    copy_init: bool,
}

impl DockerfileSpec {
    /// Create a spec for a PG major version and base image. Both are
    /// immutable after construction.
    pub fn new(version: impl Into<String>, base_image: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            base_image: base_image.into(),
            packages: BTreeSet::new(),
            tar_urls: BTreeSet::new(),
            zip_urls: BTreeSet::new(),
            copy_init: false,
        }
    }

    pub fn base_image(&self) -> &str {
        &self.base_image
    }

    /// Add apt packages; duplicates collapse, output is sorted.
    pub fn add_packages<I, S>(&mut self, packages: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.packages.extend(packages.into_iter().map(Into::into));
    }

    /// Add direct-download compressed-package URLs.
    pub fn add_tar_urls<I, S>(&mut self, urls: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tar_urls.extend(urls.into_iter().map(Into::into));
    }

    /// Add direct-download zip-of-package URLs.
    pub fn add_zip_urls<I, S>(&mut self, urls: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.zip_urls.extend(urls.into_iter().map(Into::into));
    }

    /// Bake the init script into the image's initdb directory. Used on
    /// the live-run path, where there is no compose file to mount it.
    pub fn set_copy_init(&mut self, copy_init: bool) {
        self.copy_init = copy_init;
    }

    /// Whether the anchored region would be empty.
    pub fn is_empty(&self) -> bool {
        self.packages.is_empty()
            && self.tar_urls.is_empty()
            && self.zip_urls.is_empty()
            && !self.copy_init
    }

    /// The fixed file header above the anchored region.
    pub fn render_header(&self) -> Vec<String> {
        vec![
            format!("ARG PG_MAJOR={}", self.version),
            format!("FROM {}", self.base_image),
            String::new(),
        ]
    }

    /// The anchored install blocks, in a fixed order: apt packages,
    /// then compressed packages, then zip archives.
    pub fn render_body(&self) -> Vec<String> {
        let mut lines = Vec::new();

        if !self.packages.is_empty() {
            lines.push("RUN apt-get update \\".to_string());
            lines.push(
                "    && apt-get install -y --no-install-recommends postgresql-common ca-certificates \\"
                    .to_string(),
            );
            lines.push(
                "    && /usr/share/postgresql-common/pgdg/apt.postgresql.org.sh -y \\".to_string(),
            );
            lines.push("    && apt-get install -y --no-install-recommends \\".to_string());
            for package in &self.packages {
                lines.push(format!("        {} \\", package));
            }
            lines.push("    && rm -rf /var/lib/apt/lists/*".to_string());
        }

        for url in &self.tar_urls {
            if !lines.is_empty() {
                lines.push(String::new());
            }
            lines.push("RUN apt-get update \\".to_string());
            lines.push(
                "    && apt-get install -y --no-install-recommends curl ca-certificates \\"
                    .to_string(),
            );
            lines.push(format!("    && curl -fsSL \"{}\" -o /tmp/pgbox-pkg.tar.gz \\", url));
            lines.push("    && tar -xzf /tmp/pgbox-pkg.tar.gz -C /tmp \\".to_string());
            lines.push(
                "    && apt-get install -y --no-install-recommends /tmp/*.deb \\".to_string(),
            );
            lines.push("    && rm -rf /tmp/pgbox-pkg.tar.gz /tmp/*.deb /var/lib/apt/lists/*".to_string());
        }

        for url in &self.zip_urls {
            if !lines.is_empty() {
                lines.push(String::new());
            }
            lines.push("RUN apt-get update \\".to_string());
            lines.push(
                "    && apt-get install -y --no-install-recommends curl unzip ca-certificates \\"
                    .to_string(),
            );
            lines.push(format!("    && curl -fsSL \"{}\" -o /tmp/pgbox-pkg.zip \\", url));
            lines.push("    && unzip -o /tmp/pgbox-pkg.zip -d /tmp \\".to_string());
            lines.push(
                "    && apt-get install -y --no-install-recommends /tmp/*.deb \\".to_string(),
            );
            lines.push("    && rm -rf /tmp/pgbox-pkg.zip /tmp/*.deb /var/lib/apt/lists/*".to_string());
        }

        if self.copy_init {
            if !lines.is_empty() {
                lines.push(String::new());
            }
            lines.push("COPY init.sql /docker-entrypoint-initdb.d/init.sql".to_string());
        }

        lines
    }
}
