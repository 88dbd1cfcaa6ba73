//! Lifecycle management for engine processes (launch, terminate, drop)

use crate::error::{EngineError, Result};

use super::command::CommandBuilder;
use super::config::EngineOptions;
use super::handle::{ChildHandle, ChildState};

impl ChildHandle {
    /// Spawn the engine and take ownership of the parent's pipe ends
    ///
    /// The child-side ends are closed in the parent as soon as the spawn
    /// returns; only the stdin write end and the stdout read end survive here.
    pub(super) fn launch_impl(options: &EngineOptions) -> Result<Self> {
        options.validate()?;

        if let Some(ref cwd) = options.cwd
            && !cwd.is_dir()
        {
            return Err(EngineError::spawn(format!(
                "Working directory does not exist: {}",
                cwd.display()
            )));
        }

        let program = Self::find_executable(&options.executable, options.cwd.as_deref())?;
        let mut cmd = CommandBuilder::new(&program, options).build();

        let mut child = cmd.spawn().map_err(|e| {
            EngineError::spawn(format!(
                "Failed to start engine '{}': {e}",
                options.executable
            ))
        })?;

        let pid = child
            .id()
            .ok_or_else(|| EngineError::spawn("Engine exited before its pid was read"))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| EngineError::spawn("Failed to get stdin handle"))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| EngineError::spawn("Failed to get stdout handle"))?;

        log::info!(
            "Engine '{}' started with PID {pid}",
            program.display()
        );

        Ok(Self {
            pid,
            process: child,
            stdin: Some(stdin),
            stdout: Some(stdout),
            state: ChildState::Spawned,
            kill_grace: options.kill_grace,
        })
    }

    /// Close the pipes, signal the engine and reap it
    pub(super) async fn terminate_impl(&mut self) -> Result<()> {
        // Drop our pipe ends first so the engine sees EOF on stdin
        self.stdin = None;
        self.stdout = None;

        if self.is_reaped() {
            return Ok(());
        }

        // Already exited on its own: reap without signaling
        if let Some(status) = self.process.try_wait()? {
            log::debug!("Engine {} had already exited: {status}", self.pid);
            self.state = ChildState::Reaped(status);
            return Ok(());
        }

        if self.state == ChildState::Spawned {
            self.signal(libc::SIGTERM)?;
            self.state = ChildState::Signaled;
        }

        let status = match self.kill_grace {
            Some(grace) => match tokio::time::timeout(grace, self.process.wait()).await {
                Ok(status) => status?,
                Err(_) => {
                    log::warn!(
                        "Engine {} still running {grace:?} after SIGTERM, killing it",
                        self.pid
                    );
                    if let Err(e) = self.process.start_kill() {
                        log::warn!("Failed to kill engine {}: {e}", self.pid);
                    }
                    self.process.wait().await?
                }
            },
            None => self.process.wait().await?,
        };

        log::info!("Engine {} terminated: {status}", self.pid);
        self.state = ChildState::Reaped(status);
        Ok(())
    }

    /// Deliver `signal` to the engine
    ///
    /// A process that is already gone is not an error.
    fn signal(&self, signal: libc::c_int) -> Result<()> {
        let pid = libc::pid_t::try_from(self.pid)
            .map_err(|_| EngineError::signal(format!("PID {} out of range", self.pid)))?;

        // SAFETY: kill(2) takes no pointers. The child has not been reaped, so
        // its pid cannot have been handed to another process.
        let rc = unsafe { libc::kill(pid, signal) };
        if rc == 0 {
            return Ok(());
        }

        let err = std::io::Error::last_os_error();
        if err.raw_os_error() == Some(libc::ESRCH) {
            return Ok(());
        }

        Err(EngineError::signal(format!(
            "Failed to signal engine {}: {err}",
            self.pid
        )))
    }

    /// Handle Drop cleanup
    pub(super) fn drop_impl(&mut self) {
        if self.is_reaped() {
            return;
        }

        log::warn!(
            "Engine {} dropped without terminate, killing it",
            self.pid
        );

        self.stdin = None;
        self.stdout = None;

        // SIGKILL now; whatever is not reaped here is picked up by the
        // runtime's orphan reaper through kill_on_drop.
        let _ = self.process.start_kill();
        if let Ok(Some(status)) = self.process.try_wait() {
            self.state = ChildState::Reaped(status);
        }
    }
}
