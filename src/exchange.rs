//! Single-shot command/reply exchange with an engine
//!
//! One write, one bounded read, then teardown. Failures in the write or the
//! read are recorded in the report and never skip termination.

use std::process::ExitStatus;
use std::time::Duration;

use crate::engine::process::{ChildHandle, EngineOptions};
use crate::engine::{Engine, ReadOutcome};
use crate::error::Result;

/// What happened during one exchange
#[derive(Debug)]
pub struct ExchangeReport {
    /// Process ID of the engine
    pub pid: u32,
    /// Bytes written, or the write failure
    pub sent: Result<usize>,
    /// Outcome of the single timed read
    pub received: Result<ReadOutcome>,
    /// Result of terminating and reaping the engine
    pub terminated: Result<()>,
    /// Exit status collected when the engine was reaped
    pub exit_status: Option<ExitStatus>,
}

impl ExchangeReport {
    /// Whether every step of the exchange succeeded
    #[must_use]
    pub const fn is_clean(&self) -> bool {
        self.sent.is_ok() && self.received.is_ok() && self.terminated.is_ok()
    }

    /// Bytes received from the engine, if the read produced any
    #[must_use]
    pub fn reply(&self) -> Option<&[u8]> {
        self.received.as_ref().ok().and_then(ReadOutcome::data)
    }
}

/// Send `command`, read once within `deadline`, then terminate the engine
///
/// The read is attempted even when the write fails, since an engine that
/// rejected its input may still have written something. Termination is
/// always attempted.
pub async fn run_exchange<E: Engine>(
    engine: &mut E,
    command: &[u8],
    max_bytes: usize,
    deadline: Duration,
) -> ExchangeReport {
    let pid = engine.id();

    let sent = engine.send(command).await.map(|()| command.len());
    if let Err(ref e) = sent {
        log::debug!("Engine {pid}: send failed: {e}");
    }

    let received = engine.receive_with_timeout(max_bytes, deadline).await;
    match received {
        Ok(ReadOutcome::Timeout) => log::debug!("Engine {pid}: read timed out"),
        Err(ref e) => log::debug!("Engine {pid}: receive failed: {e}"),
        Ok(_) => {}
    }

    let terminated = engine.terminate().await;
    if let Err(ref e) = terminated {
        log::error!("Engine {pid}: terminate failed: {e}");
    }

    ExchangeReport {
        pid,
        sent,
        received,
        terminated,
        exit_status: engine.exit_status(),
    }
}

/// Launch the engine described by `options` and run one exchange with it
///
/// # Errors
/// Returns setup failures (`InvalidConfig`, `Spawn`); everything after the
/// launch is reported in the [`ExchangeReport`]
pub async fn exchange(options: &EngineOptions) -> Result<ExchangeReport> {
    let mut engine = ChildHandle::launch(options)?;
    Ok(run_exchange(
        &mut engine,
        &options.command,
        options.read_buffer_size,
        options.read_deadline,
    )
    .await)
}
