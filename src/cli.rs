//! Shared plumbing for the two binaries.

use serde::Serialize;

/// Installs the fmt subscriber. `RUST_LOG` wins over `verbose`.
pub fn init_tracing(verbose: bool) -> Result<(), String> {
    let level = if verbose { "debug" } else { "info" };
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init()
        .map_err(|e| format!("failed to initialize tracing subscriber: {e}"))
}

/// Prints `stats` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(stats: &T) -> Result<(), serde_json::Error> {
    println!("{}", serde_json::to_string_pretty(stats)?);
    Ok(())
}
