//! The `export` command: render a standalone compose project.

use std::path::{Path, PathBuf};

use pgbox_artifacts::{ImageRef, ServiceOptions, export};
use pgbox_catalog::Catalog;
use pgbox_core::{aggregate, container_name};

use crate::error::Result;

/// Export the compose project for a configuration into `dir`.
///
/// When the configuration needs a custom image, the compose service
/// references a local build context and a Dockerfile is written next
/// to it; otherwise it references the base image directly.
pub fn run_export(
    catalog: &Catalog,
    dir: &Path,
    version: &str,
    extensions: &[String],
    port: u16,
) -> Result<Vec<PathBuf>> {
    let agg = aggregate(catalog, version, extensions)?;
    let container = container_name(catalog, version, extensions);

    let image = if agg.needs_custom_image() {
        ImageRef::Build(".".to_string())
    } else {
        ImageRef::Image(agg.base_image.clone())
    };
    let mut opts = ServiceOptions::new(container, image);
    opts.port = port;

    std::fs::create_dir_all(dir)?;
    Ok(export(dir, &agg, &opts)?)
}
