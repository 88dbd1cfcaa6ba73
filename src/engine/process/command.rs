//! Engine command building logic for the process supervisor

use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

use super::config::EngineOptions;

/// Command builder for an engine process
pub struct CommandBuilder<'a> {
    program: &'a Path,
    options: &'a EngineOptions,
}

impl<'a> CommandBuilder<'a> {
    /// Create a new command builder
    ///
    /// `program` is the resolved executable; `options.executable` is kept as
    /// the child's `argv[0]`.
    pub fn new(program: &'a Path, options: &'a EngineOptions) -> Self {
        Self { program, options }
    }

    /// Build the engine command with its stdio wired onto fresh pipes
    pub fn build(&self) -> Command {
        let mut cmd = Command::new(self.program);

        cmd.arg0(&self.options.executable).args(&self.options.args);

        if let Some(ref cwd) = self.options.cwd {
            cmd.current_dir(cwd);
        }

        // stdin and stdout each get their own pipe; the child-side ends are
        // dup'd onto fd 0/1 and everything else is close-on-exec.
        cmd.stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .kill_on_drop(true);

        cmd
    }
}
