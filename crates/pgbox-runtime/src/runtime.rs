//! The container-runtime trait.
//!
//! The core treats the runtime as an external collaborator: a handful
//! of synchronous operations that succeed or fail with captured
//! output. Implementations live behind this trait so orchestration can
//! be exercised in tests without a daemon.

use std::path::Path;

use crate::error::Result;

/// Options for launching a new container.
#[derive(Debug, Clone, Default)]
pub struct RunOptions {
    /// Image reference to run.
    pub image: String,
    /// Container name.
    pub name: String,
    /// Host port mapped to 5432.
    pub port: u16,
    /// Environment variables.
    pub env: Vec<(String, String)>,
    /// Volume mappings, `host:container` form.
    pub volumes: Vec<String>,
    /// Extra arguments passed to the server entrypoint (e.g. `-c`
    /// configuration flags).
    pub server_args: Vec<String>,
}

/// Synchronous operations against the container runtime.
pub trait ContainerRuntime {
    /// Build an image from a context directory.
    fn build_image(&self, context: &Path, tag: &str, build_args: &[(String, String)])
    -> Result<()>;
    /// Launch a new detached container.
    fn run_container(&self, opts: &RunOptions) -> Result<()>;
    /// Start an existing stopped container.
    fn start_container(&self, name: &str) -> Result<()>;
    /// Stop a running container.
    fn stop_container(&self, name: &str) -> Result<()>;
    /// Remove a stopped container.
    fn remove_container(&self, name: &str) -> Result<()>;
    /// Whether a container with this exact name exists (any state).
    fn container_exists(&self, name: &str) -> Result<bool>;
    /// Whether a container with this exact name is running.
    fn container_running(&self, name: &str) -> Result<bool>;
    /// Whether an image with this exact tag exists locally.
    fn image_exists(&self, tag: &str) -> Result<bool>;
    /// Stream container logs to the terminal.
    fn stream_logs(&self, name: &str, follow: bool) -> Result<()>;
    /// Run a command inside the container with the terminal attached.
    fn exec_interactive(&self, name: &str, command: &[String]) -> Result<()>;
}
