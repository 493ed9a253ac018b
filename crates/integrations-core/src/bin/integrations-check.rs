//! Resolve the integration backends the way the server would at startup.
//!
//! Usage: `integrations-check [ENV_FILE]` (defaults to `.env`).
//!
//! Process environment variables override the file. Prints the resolved
//! configuration as JSON, or the configuration error and exits with status 1.

use std::process::ExitCode;
use std::sync::Arc;

use integrations_core::{BootstrapError, ChainEnvironment, IntegrationBootstrap, TracingLogger};
use tracing_subscriber::EnvFilter;

const DEFAULT_ENV_FILE: &str = ".env";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    // a second init only happens if something else installed a subscriber first
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn run(env_file: &str) -> Result<String, BootstrapError> {
    let env = Arc::new(ChainEnvironment::dotenv_layered(env_file)?);
    let config = IntegrationBootstrap::for_environment(env, Arc::new(TracingLogger))?;
    config
        .to_json()
        .map_err(|e| integrations_core::ConfigError::Source(e.to_string()).into())
}

fn main() -> ExitCode {
    init_tracing();

    let env_file = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_ENV_FILE.to_string());

    match run(&env_file) {
        Ok(json) => {
            println!("{}", json);
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(target: "integrations", "{}", e);
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
