//! The `logs` command.

use pgbox_catalog::Catalog;
use pgbox_core::container_name;
use pgbox_runtime::ContainerRuntime;

use crate::error::{CliError, Result};

/// Stream logs for the container of a configuration.
pub fn run_logs<R: ContainerRuntime>(
    runtime: &R,
    catalog: &Catalog,
    version: &str,
    extensions: &[String],
    follow: bool,
) -> Result<()> {
    catalog.validate(extensions)?;
    let container = container_name(catalog, version, extensions);

    if !runtime.container_exists(&container)? {
        return Err(CliError::user(format!(
            "no container named '{}'",
            container
        )));
    }
    runtime.stream_logs(&container, follow)?;
    Ok(())
}
