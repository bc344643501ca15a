//! Progress tracking and checkpoint cadence

use crate::config::CheckpointConfig;
use crate::core::batch::types::{BatchJob, BatchType, ItemError, ItemOutcome, ItemResult};
use crate::storage::checkpoint::CheckpointStore;
use std::sync::Arc;
use tracing::warn;

/// Maintains running batch counts and triggers periodic checkpoint writes
///
/// Checkpoints happen after every Nth item (N is the named per-type
/// cadence from [`CheckpointConfig`]) and unconditionally after the last
/// item. A checkpoint write failure is logged and never raised; the
/// in-memory aggregate is the source of truth for the running batch.
pub struct ProgressTracker {
    store: Arc<dyn CheckpointStore>,
    cadence: CheckpointConfig,
}

impl ProgressTracker {
    /// Create a tracker backed by a checkpoint store
    pub fn new(store: Arc<dyn CheckpointStore>, cadence: CheckpointConfig) -> Self {
        Self { store, cadence }
    }

    /// Fold one item outcome into the aggregate and maybe checkpoint
    pub async fn record_outcome(
        &self,
        job: &mut BatchJob,
        batch_type: BatchType,
        result: ItemResult,
    ) {
        job.processed_items += 1;
        match &result.outcome {
            ItemOutcome::Success { .. } => job.successful_items += 1,
            ItemOutcome::Failed { error, reason } => {
                job.failed_items += 1;
                job.errors.push(ItemError {
                    item_identifier: result.item_identifier.clone(),
                    error: error.clone(),
                    reason: reason.clone(),
                });
            }
        }
        job.results.push(result);

        let interval = self.cadence.interval_for(batch_type);
        let is_last = job.processed_items == job.total_items;
        if is_last || job.processed_items % interval == 0 {
            self.checkpoint(job).await;
        }
    }

    /// Best-effort snapshot write for external pollers
    pub async fn checkpoint(&self, job: &BatchJob) {
        if let Err(e) = self.store.write(job).await {
            warn!(
                batch_id = %job.batch_id,
                error = %e,
                "checkpoint write failed, continuing"
            );
        }
    }
}
