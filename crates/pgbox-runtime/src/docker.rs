//! Docker CLI implementation of the container-runtime boundary.
//!
//! Every operation is a synchronous subprocess call. Short
//! bookkeeping commands capture their combined output (attached to the
//! error on failure); long-running ones — image builds, log streaming,
//! interactive exec — inherit the terminal.

use std::path::Path;
use std::process::{Command, Stdio};

use tracing::debug;

use crate::error::{Error, Result};
use crate::runtime::{ContainerRuntime, RunOptions};

/// Container runtime backed by the `docker` binary.
#[derive(Debug, Clone)]
pub struct DockerCli {
    binary: String,
}

impl Default for DockerCli {
    fn default() -> Self {
        Self::new()
    }
}

impl DockerCli {
    pub fn new() -> Self {
        Self {
            binary: "docker".to_string(),
        }
    }

    /// Use a different binary, e.g. `podman`.
    pub fn with_binary(binary: impl Into<String>) -> Self {
        Self {
            binary: binary.into(),
        }
    }

    /// Run a short command, capturing combined output.
    fn run_capture(&self, args: &[String]) -> Result<String> {
        debug!(binary = %self.binary, ?args, "running");
        let output = Command::new(&self.binary)
            .args(args)
            .output()
            .map_err(|e| Error::Spawn {
                binary: self.binary.clone(),
                source: e,
            })?;

        let mut combined = String::from_utf8_lossy(&output.stdout).into_owned();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        if output.status.success() {
            Ok(combined)
        } else {
            Err(Error::CommandFailed {
                command: format!("{} {}", self.binary, args.join(" ")),
                output: combined,
            })
        }
    }

    /// Run a long or interactive command with inherited stdio.
    fn run_inherit(&self, args: &[String]) -> Result<()> {
        debug!(binary = %self.binary, ?args, "running interactively");
        let status = Command::new(&self.binary)
            .args(args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| Error::Spawn {
                binary: self.binary.clone(),
                source: e,
            })?;

        if status.success() {
            Ok(())
        } else {
            Err(Error::CommandFailed {
                command: format!("{} {}", self.binary, args.join(" ")),
                output: format!("exit status: {}", status),
            })
        }
    }
}

/// Arguments for `docker run` built from run options.
///
/// Split out as a pure function so the flag layout is testable without
/// a runtime.
pub(crate) fn run_args(opts: &RunOptions) -> Vec<String> {
    let mut args = vec![
        "run".to_string(),
        "-d".to_string(),
        "--name".to_string(),
        opts.name.clone(),
        "-p".to_string(),
        format!("{}:5432", opts.port),
    ];
    for (key, value) in &opts.env {
        args.push("-e".to_string());
        args.push(format!("{}={}", key, value));
    }
    for volume in &opts.volumes {
        args.push("-v".to_string());
        args.push(volume.clone());
    }
    args.push(opts.image.clone());
    args.extend(opts.server_args.iter().cloned());
    args
}

/// Whether `name` appears in line-oriented `--format` output.
pub(crate) fn listed(output: &str, name: &str) -> bool {
    output.lines().any(|line| line.trim() == name)
}

impl ContainerRuntime for DockerCli {
    fn build_image(&self, context: &Path, tag: &str, build_args: &[(String, String)]) -> Result<()> {
        let mut args = vec![
            "build".to_string(),
            "-t".to_string(),
            tag.to_string(),
        ];
        for (key, value) in build_args {
            args.push("--build-arg".to_string());
            args.push(format!("{}={}", key, value));
        }
        args.push(context.display().to_string());
        self.run_inherit(&args)
    }

    fn run_container(&self, opts: &RunOptions) -> Result<()> {
        self.run_capture(&run_args(opts)).map(|_| ())
    }

    fn start_container(&self, name: &str) -> Result<()> {
        self.run_capture(&["start".to_string(), name.to_string()])
            .map(|_| ())
    }

    fn stop_container(&self, name: &str) -> Result<()> {
        self.run_capture(&["stop".to_string(), name.to_string()])
            .map(|_| ())
    }

    fn remove_container(&self, name: &str) -> Result<()> {
        self.run_capture(&["rm".to_string(), name.to_string()])
            .map(|_| ())
    }

    fn container_exists(&self, name: &str) -> Result<bool> {
        let output = self.run_capture(&[
            "ps".to_string(),
            "-a".to_string(),
            "--format".to_string(),
            "{{.Names}}".to_string(),
        ])?;
        Ok(listed(&output, name))
    }

    fn container_running(&self, name: &str) -> Result<bool> {
        let output = self.run_capture(&[
            "ps".to_string(),
            "--format".to_string(),
            "{{.Names}}".to_string(),
        ])?;
        Ok(listed(&output, name))
    }

    fn image_exists(&self, tag: &str) -> Result<bool> {
        let output = self.run_capture(&[
            "image".to_string(),
            "ls".to_string(),
            "--format".to_string(),
            "{{.Repository}}:{{.Tag}}".to_string(),
        ])?;
        Ok(listed(&output, tag))
    }

    fn stream_logs(&self, name: &str, follow: bool) -> Result<()> {
        let mut args = vec!["logs".to_string()];
        if follow {
            args.push("-f".to_string());
        }
        args.push(name.to_string());
        self.run_inherit(&args)
    }

    fn exec_interactive(&self, name: &str, command: &[String]) -> Result<()> {
        let mut args = vec!["exec".to_string(), "-it".to_string(), name.to_string()];
        args.extend(command.iter().cloned());
        self.run_inherit(&args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_args_layout() {
        let opts = RunOptions {
            image: "postgres:17".to_string(),
            name: "pgbox-pg17".to_string(),
            port: 5433,
            env: vec![("POSTGRES_PASSWORD".to_string(), "postgres".to_string())],
            volumes: vec!["pgdata:/var/lib/postgresql/data".to_string()],
            server_args: vec!["-c".to_string(), "shared_preload_libraries=pg_cron".to_string()],
        };
        let args = run_args(&opts);
        assert_eq!(args[0], "run");
        assert!(args.contains(&"-d".to_string()));
        assert!(args.contains(&"5433:5432".to_string()));
        assert!(args.contains(&"POSTGRES_PASSWORD=postgres".to_string()));
        assert!(args.contains(&"pgdata:/var/lib/postgresql/data".to_string()));
        // image comes before the server args it parameterizes
        let image = args.iter().position(|a| a == "postgres:17").unwrap();
        let flag = args
            .iter()
            .position(|a| a == "shared_preload_libraries=pg_cron")
            .unwrap();
        assert!(image < flag);
    }

    #[test]
    fn listed_matches_exact_lines_only() {
        let output = "pgbox-pg17\npgbox-pg17-abc123\nother\n";
        assert!(listed(output, "pgbox-pg17"));
        assert!(listed(output, "pgbox-pg17-abc123"));
        assert!(!listed(output, "pgbox-pg1"));
        assert!(!listed(output, "missing"));
    }

    #[test]
    fn listed_handles_empty_output() {
        assert!(!listed("", "anything"));
    }
}
