//! Server configuration artifact.
//!
//! Holds the merged `shared_preload_libraries` list and arbitrary
//! server parameters, and renders them as a conf snippet suitable for
//! inclusion from `postgresql.conf` or as `-c` command flags.

use std::collections::{BTreeMap, BTreeSet};

use crate::error::{Error, Result};

/// The merged server configuration for one request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerConf {
    preload: BTreeSet<String>,
    gucs: BTreeMap<String, String>,
}

impl ServerConf {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add shared-preload library names. Duplicates collapse; output
    /// order is sorted.
    pub fn add_preload<I, S>(&mut self, names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.preload.insert(name.into());
        }
    }

    /// Set a server parameter.
    ///
    /// Reasserting the same value is a no-op; a different value for an
    /// already-set key is rejected, never silently overwritten.
    pub fn set_guc(&mut self, key: impl Into<String>, value: impl Into<String>) -> Result<()> {
        let key = key.into();
        let value = value.into();
        match self.gucs.get(&key) {
            None => {
                self.gucs.insert(key, value);
                Ok(())
            }
            Some(existing) if *existing == value => Ok(()),
            Some(existing) => Err(Error::GucConflict {
                existing: existing.clone(),
                requested: value,
                key,
            }),
        }
    }

    /// Whether preloading forces a server restart to take effect.
    pub fn requires_restart(&self) -> bool {
        !self.preload.is_empty()
    }

    /// Whether there is anything to render at all.
    pub fn is_empty(&self) -> bool {
        self.preload.is_empty() && self.gucs.is_empty()
    }

    /// Sorted preload library names.
    pub fn preload(&self) -> impl Iterator<Item = &str> {
        self.preload.iter().map(String::as_str)
    }

    /// Sorted `(key, value)` parameter pairs.
    pub fn gucs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.gucs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Render as conf-file lines.
    pub fn render(&self) -> Vec<String> {
        let mut lines = Vec::new();
        if !self.preload.is_empty() {
            let joined = self.preload.iter().cloned().collect::<Vec<_>>().join(",");
            lines.push(format!("shared_preload_libraries = '{}'", joined));
        }
        for (key, value) in &self.gucs {
            lines.push(format!("{} = '{}'", key, value));
        }
        lines
    }

    /// Render as `postgres -c key=value` flag pairs for a compose
    /// `command:` list or `docker run` invocation.
    pub fn command_flags(&self) -> Vec<String> {
        let mut flags = Vec::new();
        if !self.preload.is_empty() {
            let joined = self.preload.iter().cloned().collect::<Vec<_>>().join(",");
            flags.push("-c".to_string());
            flags.push(format!("shared_preload_libraries={}", joined));
        }
        for (key, value) in &self.gucs {
            flags.push("-c".to_string());
            flags.push(format!("{}={}", key, value));
        }
        flags
    }
}
