//! Application state shared across HTTP handlers

use crate::config::Config;
use crate::core::batch::BatchCoordinator;
use crate::storage::checkpoint::CheckpointStore;
use std::sync::Arc;

/// HTTP server state shared across handlers
///
/// All fields are wrapped in Arc for efficient sharing across worker
/// threads.
#[derive(Clone)]
pub struct AppState {
    /// Service configuration (shared read-only)
    pub config: Arc<Config>,
    /// Batch coordinator
    pub coordinator: Arc<BatchCoordinator>,
    /// Checkpoint store, read by polling endpoints
    pub checkpoints: Arc<dyn CheckpointStore>,
}

impl AppState {
    /// Create a new AppState with shared resources
    pub fn new(
        config: Config,
        coordinator: BatchCoordinator,
        checkpoints: Arc<dyn CheckpointStore>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            coordinator: Arc::new(coordinator),
            checkpoints,
        }
    }

    /// Get service configuration
    pub fn config(&self) -> &Config {
        &self.config
    }
}
