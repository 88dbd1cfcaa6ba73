//! Bounded read logic for the process supervisor

use std::time::Duration;
use tokio::io::AsyncReadExt;

use crate::engine::ReadOutcome;
use crate::error::{EngineError, Result};

use super::config::MAX_SINGLE_READ;
use super::handle::ChildHandle;

impl ChildHandle {
    /// Wait for engine output and take one read of at most `max_bytes`
    ///
    /// The pending read is dropped when the deadline fires. `read` on a pipe
    /// is cancel-safe, so nothing is consumed and the pipe stays usable.
    pub(super) async fn receive_impl(
        &mut self,
        max_bytes: usize,
        deadline: Duration,
    ) -> Result<ReadOutcome> {
        if max_bytes == 0 {
            return Err(EngineError::invalid_config(
                "receive buffer must be at least one byte",
            ));
        }

        let pid = self.pid;
        let stdout = self
            .stdout
            .as_mut()
            .ok_or_else(|| EngineError::read("engine stdout is closed"))?;

        let mut buffer = vec![0u8; max_bytes.min(MAX_SINGLE_READ)];

        match tokio::time::timeout(deadline, stdout.read(&mut buffer)).await {
            Ok(Ok(0)) => {
                log::debug!("Engine {pid} closed its stdout");
                Ok(ReadOutcome::Closed)
            }
            Ok(Ok(n)) => {
                log::debug!("Read {n} bytes from engine {pid}");
                buffer.truncate(n);
                Ok(ReadOutcome::Data(buffer))
            }
            Ok(Err(e)) => Err(EngineError::read(format!(
                "Failed to read from engine stdout: {e}"
            ))),
            Err(_) => {
                log::debug!("No output from engine {pid} within {deadline:?}");
                Ok(ReadOutcome::Timeout)
            }
        }
    }
}
