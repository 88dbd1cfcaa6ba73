//! Child handle for a supervised engine process

use std::env;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::process::{Child, ChildStdin, ChildStdout};

use crate::engine::{Engine, ReadOutcome};
use crate::error::{EngineError, Result};

use super::config::EngineOptions;

/// Lifecycle state of a spawned engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildState {
    /// Running, or exited but not yet reaped
    Spawned,
    /// SIGTERM has been delivered
    Signaled,
    /// Exit status collected; terminal
    Reaped(ExitStatus),
}

/// Handle to a running engine and the parent's ends of its pipes
pub struct ChildHandle {
    pub(super) pid: u32,
    pub(super) process: Child,
    pub(super) stdin: Option<ChildStdin>,
    pub(super) stdout: Option<ChildStdout>,
    pub(super) state: ChildState,
    pub(super) kill_grace: Option<Duration>,
}

impl ChildHandle {
    /// Spawn the engine described by `options`
    ///
    /// Must be called from within a Tokio runtime.
    ///
    /// # Errors
    /// Returns `InvalidConfig` for rejected options and `Spawn` if the engine
    /// cannot be found or started
    pub fn launch(options: &EngineOptions) -> Result<Self> {
        Self::launch_impl(options)
    }

    /// Find the engine executable
    ///
    /// Names are looked up on `PATH`; relative paths resolve against `cwd`
    /// when one is given.
    ///
    /// # Errors
    /// Returns `Spawn` if nothing executable matches
    pub fn find_executable(executable: &str, cwd: Option<&Path>) -> Result<PathBuf> {
        let found = match cwd {
            Some(dir) => which::which_in(executable, env::var_os("PATH"), dir),
            None => which::which(executable),
        };

        found.map_err(|e| {
            log::debug!("Lookup of '{executable}' failed: {e}");
            EngineError::executable_not_found(executable)
        })
    }

    /// Process ID of the engine
    #[must_use]
    pub const fn pid(&self) -> u32 {
        self.pid
    }

    /// Current lifecycle state
    #[must_use]
    pub const fn state(&self) -> ChildState {
        self.state
    }

    /// Whether the engine has been reaped
    #[must_use]
    pub const fn is_reaped(&self) -> bool {
        matches!(self.state, ChildState::Reaped(_))
    }

    pub(super) async fn send_impl(&mut self, payload: &[u8]) -> Result<()> {
        let stdin = self
            .stdin
            .as_mut()
            .ok_or_else(|| EngineError::write("engine stdin is closed"))?;

        stdin
            .write_all(payload)
            .await
            .map_err(|e| EngineError::write(format!("Failed to write to engine stdin: {e}")))?;

        stdin
            .flush()
            .await
            .map_err(|e| EngineError::write(format!("Failed to flush engine stdin: {e}")))?;

        log::debug!("Sent {} bytes to engine {}", payload.len(), self.pid);
        Ok(())
    }
}

impl std::fmt::Debug for ChildHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChildHandle")
            .field("pid", &self.pid)
            .field("state", &self.state)
            .field("stdin_open", &self.stdin.is_some())
            .field("stdout_open", &self.stdout.is_some())
            .field("kill_grace", &self.kill_grace)
            .finish_non_exhaustive()
    }
}

impl Engine for ChildHandle {
    fn id(&self) -> u32 {
        self.pid
    }

    async fn send(&mut self, payload: &[u8]) -> Result<()> {
        self.send_impl(payload).await
    }

    async fn receive_with_timeout(
        &mut self,
        max_bytes: usize,
        deadline: Duration,
    ) -> Result<ReadOutcome> {
        self.receive_impl(max_bytes, deadline).await
    }

    async fn terminate(&mut self) -> Result<()> {
        self.terminate_impl().await
    }

    fn exit_status(&self) -> Option<ExitStatus> {
        match self.state {
            ChildState::Reaped(status) => Some(status),
            ChildState::Spawned | ChildState::Signaled => None,
        }
    }
}

impl Drop for ChildHandle {
    fn drop(&mut self) {
        self.drop_impl();
    }
}
