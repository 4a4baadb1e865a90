//! The `up` command: validate, aggregate, build if needed, launch.

use pgbox_artifacts::{dockerfile_spec, init_sql, server_conf, write_dockerfile, write_init_sql};
use pgbox_catalog::Catalog;
use pgbox_core::{aggregate, container_name, image_name};
use pgbox_runtime::{ContainerRuntime, RunOptions};
use tracing::{debug, info};

use crate::error::Result;

/// Parameters for launching a server.
#[derive(Debug, Clone)]
pub struct UpOptions {
    pub version: String,
    pub extensions: Vec<String>,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
}

impl Default for UpOptions {
    fn default() -> Self {
        Self {
            version: "17".to_string(),
            extensions: Vec::new(),
            port: 5432,
            user: "postgres".to_string(),
            password: "postgres".to_string(),
            database: "postgres".to_string(),
        }
    }
}

/// What `up` did, for user-facing reporting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpOutcome {
    /// The container was already running; nothing to do.
    AlreadyRunning { container: String },
    /// An existing stopped container was started (fast path).
    Restarted { container: String },
    /// A fresh container was launched.
    Launched {
        container: String,
        image: String,
        built_image: bool,
    },
}

impl UpOutcome {
    /// One-line description for the terminal.
    ///
    /// A reused container keeps the port mapping it was created with,
    /// so only a fresh launch reports the requested port.
    pub fn summary(&self, port: u16) -> String {
        match self {
            UpOutcome::AlreadyRunning { container } => {
                format!("{} is already running", container)
            }
            UpOutcome::Restarted { container } => {
                format!("restarted {} with its existing port mapping", container)
            }
            UpOutcome::Launched { container, .. } => {
                format!("launched {} on port {}", container, port)
            }
        }
    }
}

/// Launch (or reuse) the server container for a configuration.
///
/// The container name encodes the resolved extension configuration, so
/// an identical request reuses the existing container and a changed
/// one gets a fresh name.
pub fn run_up<R: ContainerRuntime>(
    runtime: &R,
    catalog: &Catalog,
    opts: &UpOptions,
) -> Result<UpOutcome> {
    let agg = aggregate(catalog, &opts.version, &opts.extensions)?;
    let container = container_name(catalog, &opts.version, &opts.extensions);
    let image = image_name(catalog, &opts.version, &opts.extensions);

    if runtime.container_running(&container)? {
        return Ok(UpOutcome::AlreadyRunning { container });
    }
    if runtime.container_exists(&container)? {
        debug!(container, "starting existing container");
        runtime.start_container(&container)?;
        return Ok(UpOutcome::Restarted { container });
    }

    let mut built_image = false;
    if !opts.extensions.is_empty() && !runtime.image_exists(&image)? {
        let context = tempfile::tempdir()?;
        let init = init_sql(&agg);

        let mut spec = dockerfile_spec(&agg);
        spec.set_copy_init(!init.is_empty());
        write_dockerfile(context.path(), &spec)?;
        if !init.is_empty() {
            write_init_sql(context.path(), &init)?;
        }

        info!(image, "building custom image");
        runtime.build_image(
            context.path(),
            &image,
            &[("PG_MAJOR".to_string(), opts.version.clone())],
        )?;
        built_image = true;
        // context drops here; best-effort cleanup of the build dir
    }

    let conf = server_conf(&agg)?;
    let run = RunOptions {
        image: image.clone(),
        name: container.clone(),
        port: opts.port,
        env: vec![
            ("POSTGRES_USER".to_string(), opts.user.clone()),
            ("POSTGRES_PASSWORD".to_string(), opts.password.clone()),
            ("POSTGRES_DB".to_string(), opts.database.clone()),
        ],
        volumes: vec![format!("{}-data:/var/lib/postgresql/data", container)],
        server_args: conf.command_flags(),
    };
    runtime.run_container(&run)?;

    Ok(UpOutcome::Launched {
        container,
        image,
        built_image,
    })
}
