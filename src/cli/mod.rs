//! CLI argument definitions for clowder.

use clap::Parser;
use std::path::PathBuf;

use crate::api::DEFAULT_BREED_API;

/// Clowder - a terminal console for the Spy Cat Agency API.
///
/// Connects to a running backend, lists spy cats and missions, and lets
/// you create, edit, assign, and delete records from the keyboard.
#[derive(Parser, Debug)]
#[command(name = "clowder")]
#[command(author, version, about = "A terminal console for the Spy Cat Agency API", long_about = None)]
pub struct Cli {
    /// Backend host to connect to
    #[arg(long, default_value = "localhost", env = "CLOWDER_HOST")]
    pub host: String,

    /// Backend port to connect to
    #[arg(long, default_value_t = 8000, env = "CLOWDER_PORT")]
    pub port: u16,

    /// Breed catalog endpoint (best-effort; the cat form falls back to
    /// free-text breed entry when this is unreachable)
    #[arg(long, default_value = DEFAULT_BREED_API, env = "CLOWDER_BREED_API")]
    pub breed_api: String,

    /// Write debug logs to this file (the terminal itself is never used
    /// for log output)
    #[arg(long, env = "CLOWDER_LOG")]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Backend base URL derived from host and port.
    pub fn base_url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}
