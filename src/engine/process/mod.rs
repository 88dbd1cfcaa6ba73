//! Process-backed engine implementation
//!
//! This module spawns the engine as a child process with its stdin and stdout
//! replaced by pipes, and owns the parent's ends of those pipes until the
//! child is reaped.

mod command;
mod config;
mod handle;
mod lifecycle;
mod reader;

// Re-export public types
pub use config::{
    DEFAULT_COMMAND, DEFAULT_KILL_GRACE, DEFAULT_READ_BUFFER_SIZE, DEFAULT_READ_DEADLINE,
    EngineOptions, EngineOptionsBuilder, MAX_SINGLE_READ,
};
pub use handle::{ChildHandle, ChildState};

use crate::error::Result;

/// Launch `executable` with `args` using default options
///
/// Must be called from within a Tokio runtime.
///
/// # Errors
/// Returns `Spawn` if the executable cannot be found or the process cannot be created
pub fn launch<I, S>(executable: &str, args: I) -> Result<ChildHandle>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    ChildHandle::launch(&EngineOptions::builder(executable).args(args).build())
}
