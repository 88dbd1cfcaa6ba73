// Engine connector
//
// Starts an engine, sends it one command over its stdin pipe, prints whatever
// it answers within the deadline, then terminates it.

use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use engine_connector::{
    ChildHandle, DEFAULT_KILL_GRACE, DEFAULT_READ_BUFFER_SIZE, DEFAULT_READ_DEADLINE, Engine,
    EngineOptions, ReadOutcome, run_exchange,
};

const DEFAULT_TIMEOUT_MS: u64 = DEFAULT_READ_DEADLINE.as_millis() as u64;
const DEFAULT_GRACE_MS: u64 = DEFAULT_KILL_GRACE.as_millis() as u64;

#[derive(Parser, Debug)]
#[command(
    name = "engine-connector",
    version,
    about = "Send one command to an engine over its stdio pipes and print the reply"
)]
struct Cli {
    /// Command sent to the engine (a trailing newline is added if missing)
    #[arg(long, default_value = "uci")]
    command: String,

    /// How long to wait for the engine's reply, in milliseconds
    #[arg(long = "timeout-ms", default_value_t = DEFAULT_TIMEOUT_MS)]
    timeout_ms: u64,

    /// Maximum number of reply bytes to read
    #[arg(long = "buffer-size", default_value_t = DEFAULT_READ_BUFFER_SIZE)]
    buffer_size: usize,

    /// Time the engine gets to exit after SIGTERM before SIGKILL, in milliseconds
    #[arg(long = "grace-ms", default_value_t = DEFAULT_GRACE_MS)]
    grace_ms: u64,

    /// Engine executable (path, or name looked up on PATH) followed by its
    /// arguments; everything after the executable is passed verbatim
    #[arg(
        value_name = "ENGINE",
        required = true,
        num_args = 1..,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    engine: Vec<String>,
}

impl Cli {
    fn into_options(self) -> EngineOptions {
        // clap guarantees at least one value; an empty executable is rejected
        // by option validation at launch
        let mut engine = self.engine.into_iter();
        let executable = engine.next().unwrap_or_default();

        EngineOptions::builder(executable)
            .args(engine)
            .command_line(&self.command)
            .read_buffer_size(self.buffer_size)
            .read_deadline(Duration::from_millis(self.timeout_ms))
            .kill_grace(Some(Duration::from_millis(self.grace_ms)))
            .build()
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            let _ = e.print();
            // Usage errors exit 1; --help and --version are not errors
            return if e.use_stderr() {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            };
        }
    };

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::from(1)
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let options = cli.into_options();

    let mut engine = ChildHandle::launch(&options)
        .with_context(|| format!("failed to launch engine '{}'", options.executable))?;
    println!("Engine started with PID {}", engine.id());

    let report = run_exchange(
        &mut engine,
        &options.command,
        options.read_buffer_size,
        options.read_deadline,
    )
    .await;

    match report.sent {
        Ok(_) => println!(
            "Sent: {}",
            String::from_utf8_lossy(&options.command).trim_end()
        ),
        Err(ref e) => log::error!("Failed to send command: {e}"),
    }

    match report.received {
        Ok(ReadOutcome::Data(ref bytes)) => {
            println!("Received:\n{}", String::from_utf8_lossy(bytes));
        }
        Ok(ReadOutcome::Timeout) => println!("Timeout: No output received."),
        Ok(ReadOutcome::Closed) => println!("Engine closed its output."),
        Err(ref e) => log::error!("Failed to read reply: {e}"),
    }

    report
        .terminated
        .with_context(|| format!("failed to terminate engine {}", report.pid))?;
    println!("Engine terminated.");

    Ok(())
}
