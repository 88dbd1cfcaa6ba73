//! Engine layer for talking to a supervised child process
//!
//! This module provides the engine abstraction and the process-backed
//! implementation that drives a child over its stdin/stdout pipes.

pub mod process;

use std::process::ExitStatus;
use std::time::Duration;

use crate::error::Result;

/// Outcome of a single bounded read from an engine
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    /// Bytes from one read; may be any prefix of what the engine wrote
    Data(Vec<u8>),
    /// Nothing became readable before the deadline
    Timeout,
    /// The engine closed its output
    Closed,
}

impl ReadOutcome {
    /// The bytes read, if any
    #[must_use]
    pub fn data(&self) -> Option<&[u8]> {
        match self {
            Self::Data(bytes) => Some(bytes),
            Self::Timeout | Self::Closed => None,
        }
    }

    /// Whether the deadline elapsed with nothing to read
    #[must_use]
    pub const fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }
}

/// Engine trait for one bounded duplex exchange
///
/// This trait defines the operations the exchange driver performs on an
/// engine: one write, one timed read, and teardown.
pub trait Engine: Send {
    /// Operating system identifier of the engine
    fn id(&self) -> u32;

    /// Write the whole payload to the engine
    ///
    /// # Errors
    /// Returns `Write` if the engine's input is closed (e.g. it already exited)
    fn send(&mut self, payload: &[u8]) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Wait up to `deadline` for output, then read at most `max_bytes` once
    ///
    /// # Errors
    /// Returns `InvalidConfig` if `max_bytes` is zero and `Read` on an I/O
    /// failure; an elapsed deadline is [`ReadOutcome::Timeout`], not an error
    fn receive_with_timeout(
        &mut self,
        max_bytes: usize,
        deadline: Duration,
    ) -> impl std::future::Future<Output = Result<ReadOutcome>> + Send;

    /// Close the engine's pipes, signal it and wait until it has been reaped
    ///
    /// Calling this on an engine that already exited, or more than once, succeeds.
    ///
    /// # Errors
    /// Returns error if the engine could not be signaled or waited on
    fn terminate(&mut self) -> impl std::future::Future<Output = Result<()>> + Send;

    /// Exit status collected when the engine was reaped
    fn exit_status(&self) -> Option<ExitStatus>;
}

pub use process::{ChildHandle, ChildState, EngineOptions, EngineOptionsBuilder, launch};
