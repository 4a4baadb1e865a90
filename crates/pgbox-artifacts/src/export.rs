//! Rendering artifact models into files.
//!
//! Bridges an [`Aggregation`] into the four artifact models and merges
//! each into its file through the anchored renderer, so re-exports
//! never clobber user edits placed outside the marked regions.

use std::path::{Path, PathBuf};

use pgbox_blocks::{Markers, merge_into_file};
use pgbox_core::Aggregation;
use tracing::debug;

use crate::compose::{ComposeSpec, ImageRef};
use crate::conf::ServerConf;
use crate::dockerfile::DockerfileSpec;
use crate::error::Result;
use crate::initsql::InitSql;

/// File names of the generated artifacts.
pub const DOCKERFILE: &str = "Dockerfile";
pub const COMPOSE_FILE: &str = "docker-compose.yml";
pub const INIT_SQL_FILE: &str = "init.sql";
pub const CONF_FILE: &str = "postgresql.conf.pgbox";

/// Where init scripts land inside the official postgres image.
const INITDB_DIR: &str = "/docker-entrypoint-initdb.d";

/// Knobs for the compose service, with pgbox defaults.
#[derive(Debug, Clone)]
pub struct ServiceOptions {
    pub service: String,
    pub container_name: String,
    pub image: ImageRef,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub database: String,
    /// Host path bound to the data directory, or `None` for an
    /// unpersisted server.
    pub data_dir: Option<String>,
}

impl ServiceOptions {
    pub fn new(container_name: impl Into<String>, image: ImageRef) -> Self {
        Self {
            service: "db".to_string(),
            container_name: container_name.into(),
            image,
            port: 5432,
            user: "postgres".to_string(),
            password: "postgres".to_string(),
            database: "postgres".to_string(),
            data_dir: Some("./pgdata".to_string()),
        }
    }
}

/// Build the Dockerfile model from an aggregation.
pub fn dockerfile_spec(agg: &Aggregation) -> DockerfileSpec {
    let mut spec = DockerfileSpec::new(&agg.version, &agg.base_image);
    spec.add_packages(agg.packages.iter().cloned());
    spec.add_tar_urls(agg.tar_urls.iter().cloned());
    spec.add_zip_urls(agg.zip_urls.iter().cloned());
    spec
}

/// Build the server-conf model from an aggregation.
///
/// Aggregation has already rejected conflicting values, so every key
/// is set exactly once here.
pub fn server_conf(agg: &Aggregation) -> Result<ServerConf> {
    let mut conf = ServerConf::new();
    conf.add_preload(agg.preload.iter().cloned());
    for (key, value) in &agg.gucs {
        conf.set_guc(key, value)?;
    }
    Ok(conf)
}

/// Build the init-SQL model from an aggregation.
pub fn init_sql(agg: &Aggregation) -> InitSql {
    let mut init = InitSql::new();
    for fragment in &agg.sql_fragments {
        init.add_fragment(&fragment.name, &fragment.sql);
    }
    init
}

/// Build the compose model for a service.
pub fn compose_spec(conf: &ServerConf, init: &InitSql, opts: &ServiceOptions) -> ComposeSpec {
    let mut spec = ComposeSpec::new(&opts.service, &opts.container_name, opts.image.clone());
    spec.set_env("POSTGRES_USER", &opts.user);
    spec.set_env("POSTGRES_PASSWORD", &opts.password);
    spec.set_env("POSTGRES_DB", &opts.database);
    spec.add_port(format!("{}:5432", opts.port));
    if let Some(data_dir) = &opts.data_dir {
        spec.add_volume(format!("{}:/var/lib/postgresql/data", data_dir));
    }
    if !init.is_empty() {
        spec.add_volume(format!(
            "./{}:{}/{}:ro",
            INIT_SQL_FILE, INITDB_DIR, INIT_SQL_FILE
        ));
    }
    spec.set_command_flags(conf.command_flags());
    spec
}

/// Merge the Dockerfile into `dir`, creating it with the fixed header
/// when absent.
pub fn write_dockerfile(dir: &Path, spec: &DockerfileSpec) -> Result<PathBuf> {
    let path = dir.join(DOCKERFILE);
    debug!(path = %path.display(), "writing Dockerfile");
    merge_into_file(
        &path,
        &Markers::hash(),
        &spec.render_header(),
        &spec.render_body(),
    )?;
    Ok(path)
}

/// Merge the compose file into `dir`.
pub fn write_compose(dir: &Path, spec: &ComposeSpec) -> Result<PathBuf> {
    let path = dir.join(COMPOSE_FILE);
    debug!(path = %path.display(), "writing compose file");
    let header = vec![
        "# Generated by pgbox. Content between the pgbox markers is regenerated;".to_string(),
        "# everything outside them is yours.".to_string(),
    ];
    merge_into_file(&path, &Markers::hash(), &header, &spec.render())?;
    Ok(path)
}

/// Merge the conf snippet into `dir`. Skipped entirely (returns
/// `None`) when there is nothing to configure.
pub fn write_conf(dir: &Path, conf: &ServerConf) -> Result<Option<PathBuf>> {
    if conf.is_empty() {
        return Ok(None);
    }
    let path = dir.join(CONF_FILE);
    debug!(path = %path.display(), "writing conf snippet");
    let header = vec!["# PostgreSQL settings managed by pgbox.".to_string()];
    merge_into_file(&path, &Markers::hash(), &header, &conf.render())?;
    Ok(Some(path))
}

/// Merge the init script into `dir`.
pub fn write_init_sql(dir: &Path, init: &InitSql) -> Result<PathBuf> {
    let path = dir.join(INIT_SQL_FILE);
    debug!(path = %path.display(), "writing init script");
    let header = vec!["-- Extension initialization managed by pgbox.".to_string()];
    merge_into_file(&path, &Markers::sql(), &header, &init.render())?;
    Ok(path)
}

/// Render a complete standalone compose project into `dir`.
///
/// Writes the compose file always, the Dockerfile only when a custom
/// image is needed, and the conf/init artifacts only when non-empty.
/// Returns the paths written.
pub fn export(dir: &Path, agg: &Aggregation, opts: &ServiceOptions) -> Result<Vec<PathBuf>> {
    let conf = server_conf(agg)?;
    let init = init_sql(agg);

    let mut written = Vec::new();

    if agg.needs_custom_image() {
        written.push(write_dockerfile(dir, &dockerfile_spec(agg))?);
    }
    written.push(write_compose(dir, &compose_spec(&conf, &init, opts))?);
    if let Some(path) = write_conf(dir, &conf)? {
        written.push(path);
    }
    if !init.is_empty() {
        written.push(write_init_sql(dir, &init)?);
    }

    Ok(written)
}
