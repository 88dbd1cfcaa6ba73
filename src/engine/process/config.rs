//! Configuration constants and options for the process supervisor

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{EngineError, Result};

/// Command sent to the engine when none is configured
pub const DEFAULT_COMMAND: &str = "uci\n";

/// Default maximum number of bytes taken by a single read
pub const DEFAULT_READ_BUFFER_SIZE: usize = 1024;

/// Largest buffer a single read allocates; one pipe read never returns more
/// than the pipe capacity (at most 1 MiB on Linux)
pub const MAX_SINGLE_READ: usize = 1024 * 1024;

/// Default readiness deadline for the single read
pub const DEFAULT_READ_DEADLINE: Duration = Duration::from_secs(2);

/// Default time a child gets to exit after SIGTERM before it is sent SIGKILL
pub const DEFAULT_KILL_GRACE: Duration = Duration::from_secs(5);

// ============================================================================
// Engine Options
// ============================================================================

/// Options for launching an engine and running one exchange with it
#[derive(Debug, Clone)]
pub struct EngineOptions {
    /// Path or search-path name of the engine executable
    pub executable: String,
    /// Arguments passed verbatim to the engine
    pub args: Vec<String>,
    /// Bytes written to the engine's stdin
    pub command: Vec<u8>,
    /// Maximum number of bytes taken by the single read
    pub read_buffer_size: usize,
    /// How long to wait for the engine to produce output
    pub read_deadline: Duration,
    /// Grace period between SIGTERM and SIGKILL (`None` waits forever)
    pub kill_grace: Option<Duration>,
    /// Working directory for the engine process
    pub cwd: Option<PathBuf>,
}

impl EngineOptions {
    /// Create a new builder for `EngineOptions`
    #[must_use]
    pub fn builder(executable: impl Into<String>) -> EngineOptionsBuilder {
        EngineOptionsBuilder {
            options: Self {
                executable: executable.into(),
                args: Vec::new(),
                command: DEFAULT_COMMAND.as_bytes().to_vec(),
                read_buffer_size: DEFAULT_READ_BUFFER_SIZE,
                read_deadline: DEFAULT_READ_DEADLINE,
                kill_grace: Some(DEFAULT_KILL_GRACE),
                cwd: None,
            },
        }
    }

    /// Check option values that would otherwise fail halfway through a run
    ///
    /// # Errors
    /// Returns `InvalidConfig` if the executable is empty or the read buffer is zero-sized
    pub fn validate(&self) -> Result<()> {
        if self.executable.is_empty() {
            return Err(EngineError::invalid_config("engine executable is empty"));
        }
        if self.read_buffer_size == 0 {
            return Err(EngineError::invalid_config(
                "read buffer size must be at least one byte",
            ));
        }
        Ok(())
    }
}

// ============================================================================
// Builder for EngineOptions
// ============================================================================

/// Builder for `EngineOptions`
#[derive(Debug)]
pub struct EngineOptionsBuilder {
    options: EngineOptions,
}

impl EngineOptionsBuilder {
    /// Set engine arguments
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.args = args.into_iter().map(Into::into).collect();
        self
    }

    /// Add one engine argument
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.options.args.push(arg.into());
        self
    }

    /// Set the raw bytes written to the engine
    #[must_use]
    pub fn command(mut self, command: impl Into<Vec<u8>>) -> Self {
        self.options.command = command.into();
        self
    }

    /// Set a text command, newline-terminated if it is not already
    #[must_use]
    pub fn command_line(mut self, line: &str) -> Self {
        let mut command = line.as_bytes().to_vec();
        if !command.ends_with(b"\n") {
            command.push(b'\n');
        }
        self.options.command = command;
        self
    }

    /// Set the read buffer size
    #[must_use]
    pub const fn read_buffer_size(mut self, size: usize) -> Self {
        self.options.read_buffer_size = size;
        self
    }

    /// Set the read deadline
    #[must_use]
    pub const fn read_deadline(mut self, deadline: Duration) -> Self {
        self.options.read_deadline = deadline;
        self
    }

    /// Set the SIGTERM grace period
    #[must_use]
    pub const fn kill_grace(mut self, grace: Option<Duration>) -> Self {
        self.options.kill_grace = grace;
        self
    }

    /// Set working directory
    #[must_use]
    pub fn cwd(mut self, path: impl Into<PathBuf>) -> Self {
        self.options.cwd = Some(path.into());
        self
    }

    /// Build the options
    #[must_use]
    pub fn build(self) -> EngineOptions {
        self.options
    }
}
