//! Docker Compose artifact.
//!
//! Renders one `services:` entry with either an image reference or a
//! build context, sorted environment, optional `command:` flags for
//! server configuration, ports, volumes and a fixed `pg_isready`
//! healthcheck.

use std::collections::{BTreeMap, BTreeSet};

/// How the compose service obtains its image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImageRef {
    /// A pullable or locally-tagged image.
    Image(String),
    /// A build context directory containing a Dockerfile.
    Build(String),
}

/// In-memory compose specification for a single service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposeSpec {
    service: String,
    container_name: String,
    image: ImageRef,
    env: BTreeMap<String, String>,
    ports: BTreeSet<String>,
    volumes: BTreeSet<String>,
    command_flags: Vec<String>,
    networks: BTreeSet<String>,
}

impl ComposeSpec {
    pub fn new(
        service: impl Into<String>,
        container_name: impl Into<String>,
        image: ImageRef,
    ) -> Self {
        Self {
            service: service.into(),
            container_name: container_name.into(),
            image,
            env: BTreeMap::new(),
            ports: BTreeSet::new(),
            volumes: BTreeSet::new(),
            command_flags: Vec::new(),
            networks: BTreeSet::new(),
        }
    }

    /// Set an environment variable. Last write wins.
    pub fn set_env(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.env.insert(key.into(), value.into());
    }

    /// Add a port mapping such as `5432:5432`. Dedups and sorts.
    pub fn add_port(&mut self, mapping: impl Into<String>) {
        self.ports.insert(mapping.into());
    }

    /// Add a volume mapping. Dedups and sorts.
    pub fn add_volume(&mut self, mapping: impl Into<String>) {
        self.volumes.insert(mapping.into());
    }

    /// Add a network name. Dedups and sorts.
    pub fn add_network(&mut self, name: impl Into<String>) {
        self.networks.insert(name.into());
    }

    /// Set the `postgres -c` flag list (from the server conf). The
    /// `command:` block is emitted only when flags are present.
    pub fn set_command_flags(&mut self, flags: Vec<String>) {
        self.command_flags = flags;
    }

    /// Render the compose file content as YAML lines.
    pub fn render(&self) -> Vec<String> {
        let mut lines = vec!["services:".to_string(), format!("  {}:", self.service)];

        match &self.image {
            ImageRef::Image(image) => lines.push(format!("    image: {}", image)),
            ImageRef::Build(context) => lines.push(format!("    build: {}", context)),
        }
        lines.push(format!("    container_name: {}", self.container_name));

        if !self.env.is_empty() {
            lines.push("    environment:".to_string());
            for (key, value) in &self.env {
                lines.push(format!("      {}: {}", key, value));
            }
        }

        if !self.command_flags.is_empty() {
            lines.push("    command:".to_string());
            for flag in &self.command_flags {
                lines.push(format!("      - \"{}\"", flag));
            }
        }

        if !self.ports.is_empty() {
            lines.push("    ports:".to_string());
            for port in &self.ports {
                lines.push(format!("      - \"{}\"", port));
            }
        }

        if !self.volumes.is_empty() {
            lines.push("    volumes:".to_string());
            for volume in &self.volumes {
                lines.push(format!("      - {}", volume));
            }
        }

        lines.push("    healthcheck:".to_string());
        lines.push("      test: [\"CMD-SHELL\", \"pg_isready -U postgres\"]".to_string());
        lines.push("      interval: 5s".to_string());
        lines.push("      timeout: 3s".to_string());
        lines.push("      retries: 10".to_string());

        if !self.networks.is_empty() {
            lines.push("    networks:".to_string());
            for network in &self.networks {
                lines.push(format!("      - {}", network));
            }
        }

        lines
    }
}
