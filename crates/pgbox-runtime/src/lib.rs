//! Container-runtime boundary for pgbox.
//!
//! Defines the synchronous [`ContainerRuntime`] trait the
//! orchestration layer talks to, and the [`DockerCli`] implementation
//! that invokes `docker` as a subprocess, parsing only line-oriented
//! `--format` output for existence checks.

pub mod docker;
pub mod error;
pub mod runtime;

pub use docker::DockerCli;
pub use error::{Error, Result};
pub use runtime::{ContainerRuntime, RunOptions};
