//! Artifact models for pgbox generated files.
//!
//! Four value-holders — Dockerfile, compose file, server conf, init
//! SQL — each exposing only additive, idempotent mutators and
//! rendering into deterministic (sorted) line output, plus the export
//! functions that merge them into files through the anchored renderer.

pub mod compose;
pub mod conf;
pub mod dockerfile;
pub mod error;
pub mod export;
pub mod initsql;

pub use compose::{ComposeSpec, ImageRef};
pub use conf::ServerConf;
pub use dockerfile::DockerfileSpec;
pub use error::{Error, Result};
pub use export::{
    COMPOSE_FILE, CONF_FILE, DOCKERFILE, INIT_SQL_FILE, ServiceOptions, compose_spec,
    dockerfile_spec, export, init_sql, server_conf, write_compose, write_conf, write_dockerfile,
    write_init_sql,
};
pub use initsql::{Fragment, InitSql};
