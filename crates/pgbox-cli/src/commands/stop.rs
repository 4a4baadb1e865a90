//! The `stop` command.

use pgbox_catalog::Catalog;
use pgbox_core::container_name;
use pgbox_runtime::ContainerRuntime;

use crate::error::{CliError, Result};

/// Stop (and optionally remove) the container for a configuration.
pub fn run_stop<R: ContainerRuntime>(
    runtime: &R,
    catalog: &Catalog,
    version: &str,
    extensions: &[String],
    remove: bool,
) -> Result<String> {
    catalog.validate(extensions)?;
    let container = container_name(catalog, version, extensions);

    if !runtime.container_exists(&container)? {
        return Err(CliError::user(format!(
            "no container named '{}'; nothing to stop",
            container
        )));
    }

    if runtime.container_running(&container)? {
        runtime.stop_container(&container)?;
    }
    if remove {
        runtime.remove_container(&container)?;
    }
    Ok(container)
}
