//! The `psql` command: interactive session passthrough.

use pgbox_catalog::Catalog;
use pgbox_core::container_name;
use pgbox_runtime::ContainerRuntime;

use crate::error::{CliError, Result};

/// Open an interactive psql session in the running container for a
/// configuration.
pub fn run_psql<R: ContainerRuntime>(
    runtime: &R,
    catalog: &Catalog,
    version: &str,
    extensions: &[String],
    user: &str,
    database: &str,
) -> Result<()> {
    catalog.validate(extensions)?;
    let container = container_name(catalog, version, extensions);

    if !runtime.container_running(&container)? {
        return Err(CliError::user(format!(
            "container '{}' is not running; start it with `pgbox up` first",
            container
        )));
    }

    runtime.exec_interactive(
        &container,
        &[
            "psql".to_string(),
            "-U".to_string(),
            user.to_string(),
            "-d".to_string(),
            database.to_string(),
        ],
    )?;
    Ok(())
}
