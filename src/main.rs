//! Clowder CLI - a terminal console for the Spy Cat Agency API.

use std::process;

use clap::Parser;
use clowder::cli::Cli;

/// Set up file-based logging when requested. The terminal itself belongs
/// to the TUI, so logs never go to stdout/stderr. Returns the appender
/// guard that must stay alive for the process lifetime.
fn init_logging(cli: &Cli) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let path = cli.log_file.as_ref()?;
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .ok()?;
    let (writer, guard) = tracing_appender::non_blocking(file);
    let filter = tracing_subscriber::EnvFilter::try_from_env("CLOWDER_LOG_FILTER")
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("clowder=debug"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Some(guard)
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let _guard = init_logging(&cli);

    if let Err(e) = clowder::tui::run(&cli).await {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}
