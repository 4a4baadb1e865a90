//! A recording in-memory runtime for orchestration tests.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};
use std::path::Path;

use pgbox_runtime::{ContainerRuntime, Result, RunOptions};

#[derive(Default)]
struct State {
    calls: Vec<String>,
    images: HashSet<String>,
    /// container name -> running
    containers: HashMap<String, bool>,
}

/// Fake container runtime recording mutating calls.
///
/// Queries (existence checks) read the configured state and are not
/// recorded, so tests can assert on the exact action sequence.
#[derive(Default)]
pub struct FakeRuntime {
    state: RefCell<State>,
}

impl FakeRuntime {
    pub fn calls(&self) -> Vec<String> {
        self.state.borrow().calls.clone()
    }

    pub fn add_image(&self, tag: &str) {
        self.state.borrow_mut().images.insert(tag.to_string());
    }

    pub fn add_container(&self, name: &str, running: bool) {
        self.state
            .borrow_mut()
            .containers
            .insert(name.to_string(), running);
    }

    pub fn has_container(&self, name: &str) -> bool {
        self.state.borrow().containers.contains_key(name)
    }
}

impl ContainerRuntime for FakeRuntime {
    fn build_image(
        &self,
        _context: &Path,
        tag: &str,
        _build_args: &[(String, String)],
    ) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state.calls.push(format!("build {}", tag));
        state.images.insert(tag.to_string());
        Ok(())
    }

    fn run_container(&self, opts: &RunOptions) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state.calls.push(format!(
            "run {} image={} port={} args=[{}]",
            opts.name,
            opts.image,
            opts.port,
            opts.server_args.join(" ")
        ));
        state.containers.insert(opts.name.clone(), true);
        Ok(())
    }

    fn start_container(&self, name: &str) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state.calls.push(format!("start {}", name));
        state.containers.insert(name.to_string(), true);
        Ok(())
    }

    fn stop_container(&self, name: &str) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state.calls.push(format!("stop {}", name));
        state.containers.insert(name.to_string(), false);
        Ok(())
    }

    fn remove_container(&self, name: &str) -> Result<()> {
        let mut state = self.state.borrow_mut();
        state.calls.push(format!("rm {}", name));
        state.containers.remove(name);
        Ok(())
    }

    fn container_exists(&self, name: &str) -> Result<bool> {
        Ok(self.state.borrow().containers.contains_key(name))
    }

    fn container_running(&self, name: &str) -> Result<bool> {
        Ok(*self.state.borrow().containers.get(name).unwrap_or(&false))
    }

    fn image_exists(&self, tag: &str) -> Result<bool> {
        Ok(self.state.borrow().images.contains(tag))
    }

    fn stream_logs(&self, name: &str, follow: bool) -> Result<()> {
        self.state
            .borrow_mut()
            .calls
            .push(format!("logs {} follow={}", name, follow));
        Ok(())
    }

    fn exec_interactive(&self, name: &str, command: &[String]) -> Result<()> {
        self.state
            .borrow_mut()
            .calls
            .push(format!("exec {} {}", name, command.join(" ")));
        Ok(())
    }
}
