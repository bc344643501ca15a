//! Batchflow orchestrator binary
//!
//! Async batch orchestration service for data automation pipelines

use batchflow_rs::server;
use clap::Parser;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Command line arguments for the orchestrator
#[derive(Debug, Parser)]
#[command(name = "orchestrator", version, about)]
struct Args {
    /// Path to the YAML configuration file
    #[arg(
        long,
        env = "ORCHESTRATOR_CONFIG",
        default_value = "config/orchestrator.yaml"
    )]
    config: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env before anything reads the environment
    dotenvy::dotenv().ok();

    // Initialize logging system
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_thread_ids(false)
        .init();

    let args = Args::parse();

    match server::builder::run_server(&args.config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            // Print error using Display (not Debug) to preserve newlines
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}
