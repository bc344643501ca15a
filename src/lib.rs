//! # Batchflow-RS
//!
//! A batch job orchestration service for enterprise data automation
//! pipelines. Callers submit a typed batch of work items (files or data
//! records); the orchestrator drives each item through a type-specific
//! pipeline of collaborator calls (validation, document processing,
//! storage) and returns an aggregate result with per-item detail.
//!
//! ## Features
//!
//! - **Typed batches**: file processing, data validation, OCR, medical
//!   records, customer import, inventory update, survey processing
//! - **Failure isolation**: one item's failure never aborts the batch
//! - **Structured outcomes**: validation rejections, collaborator errors,
//!   and malformed items are distinguishable in the result
//! - **Checkpointed progress**: pollable snapshots written every Nth item
//!   with a named, per-type cadence
//! - **HTTP surface**: submit, poll, and list batches over a JSON API
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use batchflow_rs::{Config, Orchestrator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/orchestrator.yaml").await?;
//!     let orchestrator = Orchestrator::new(config).await?;
//!     orchestrator.run().await?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod server;
pub mod services;
pub mod storage;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use utils::error::{OrchestratorError, Result};

pub use core::batch::{
    BatchCoordinator, BatchJob, BatchStatus, BatchType, FailureReason, ItemOutcome, ItemResult,
    SubmitBatchRequest,
};
pub use services::collaborators::{Collaborators, ValidationVerdict};
pub use storage::checkpoint::{CheckpointStore, InMemoryCheckpointStore};

use tracing::info;

/// A minimal orchestrator service facade
pub struct Orchestrator {
    config: Config,
    server: server::HttpServer,
}

impl Orchestrator {
    /// Create a new orchestrator instance
    pub async fn new(config: Config) -> Result<Self> {
        info!("Creating new orchestrator instance");

        let server = server::HttpServer::new(&config)?;

        Ok(Self { config, server })
    }

    /// Run the orchestrator HTTP server
    pub async fn run(self) -> Result<()> {
        info!("Starting batchflow orchestrator");
        info!("Configuration: {:#?}", self.config);

        self.server.start().await?;

        Ok(())
    }
}

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");
