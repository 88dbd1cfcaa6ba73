//! # Engine Connector
//!
//! Spawns an external engine process with its standard input and standard
//! output replaced by pipes, sends it one command, waits a bounded time for
//! one reply, and then terminates and reaps it.
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::time::Duration;
//! use engine_connector::{Engine, ReadOutcome, launch};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut engine = launch("stockfish", Vec::<String>::new())?;
//!
//!     engine.send(b"uci\n").await?;
//!     match engine.receive_with_timeout(1024, Duration::from_secs(2)).await? {
//!         ReadOutcome::Data(bytes) => log::info!("{}", String::from_utf8_lossy(&bytes)),
//!         ReadOutcome::Timeout => log::info!("no reply"),
//!         ReadOutcome::Closed => log::info!("engine closed its output"),
//!     }
//!
//!     engine.terminate().await?;
//!     Ok(())
//! }
//! ```
//!
//! ## One-shot exchanges
//!
//! [`exchange()`] bundles launch, send, receive and terminate, and always
//! terminates the engine once it was started:
//!
//! ```no_run
//! # use engine_connector::{EngineOptions, exchange};
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let options = EngineOptions::builder("cat").command_line("uci").build();
//! let report = exchange(&options).await?;
//! assert_eq!(report.reply(), Some(&b"uci\n"[..]));
//! # Ok(())
//! # }
//! ```
//!
//! ## Lifecycle
//!
//! A [`ChildHandle`] moves through `Spawned → Signaled → Reaped`.
//! [`Engine::terminate`] closes the pipes, sends SIGTERM (escalating to
//! SIGKILL after the configured grace period) and waits for the exit status.
//! A handle dropped before it was reaped kills its child.

pub mod engine;
pub mod error;
pub mod exchange;

// Re-export main types for convenience
pub use engine::process::{
    DEFAULT_COMMAND, DEFAULT_KILL_GRACE, DEFAULT_READ_BUFFER_SIZE, DEFAULT_READ_DEADLINE,
    MAX_SINGLE_READ,
};
pub use engine::{
    ChildHandle, ChildState, Engine, EngineOptions, EngineOptionsBuilder, ReadOutcome, launch,
};
pub use error::{EngineError, Result};
pub use exchange::{ExchangeReport, exchange, run_exchange};

/// Version of the engine connector
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
