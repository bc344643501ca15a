//! Batch coordinator: the top-level orchestration entry point

use crate::config::CheckpointConfig;
use crate::core::batch::processors;
use crate::core::batch::progress::ProgressTracker;
use crate::core::batch::types::{
    BatchJob, BatchStatus, BatchType, ItemOutcome, ItemResult, ProcessingConfig,
    SubmitBatchRequest, WorkItem,
};
use crate::services::collaborators::Collaborators;
use crate::storage::checkpoint::CheckpointStore;
use chrono::Utc;
use rand::Rng;
use rand::distributions::Alphanumeric;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Drives a batch submission to a terminal result
///
/// `submit_batch` never raises for an unknown batch type or per-item
/// failures: the caller always receives a terminal [`BatchJob`]. Items
/// are processed sequentially in input order, each awaited to completion
/// before the next begins; one item's failure never aborts the batch.
pub struct BatchCoordinator {
    collaborators: Arc<dyn Collaborators>,
    tracker: ProgressTracker,
}

impl BatchCoordinator {
    /// Create a coordinator
    pub fn new(
        collaborators: Arc<dyn Collaborators>,
        store: Arc<dyn CheckpointStore>,
        cadence: CheckpointConfig,
    ) -> Self {
        Self {
            collaborators,
            tracker: ProgressTracker::new(store, cadence),
        }
    }

    /// Run one batch to completion and return the aggregate result
    pub async fn submit_batch(&self, request: SubmitBatchRequest) -> BatchJob {
        let batch_id = allocate_batch_id();

        match BatchType::from_str(&request.batch_type) {
            Ok(batch_type) => {
                let config = request.processing_config.clone();
                let declared_type = request.batch_type.clone();
                let items = normalize_items(batch_type, request);

                let mut job = BatchJob::new(batch_id, declared_type, items.len());
                info!(
                    batch_id = %job.batch_id,
                    batch_type = %batch_type,
                    total_items = job.total_items,
                    "batch accepted"
                );

                self.process_items(&mut job, batch_type, &items, &config)
                    .await;

                job.finalize(BatchStatus::Completed, None);
                self.tracker.checkpoint(&job).await;
                info!(
                    batch_id = %job.batch_id,
                    successful = job.successful_items,
                    failed = job.failed_items,
                    elapsed_ms = job.total_processing_time_ms.unwrap_or(0),
                    "batch completed"
                );
                job
            }
            Err(e) => {
                // The batch never starts item processing; it is returned
                // as a terminal failed job, not raised to the caller.
                let total = request.items.len() + request.data.len();
                let mut job = BatchJob::new(batch_id, request.batch_type, total);
                warn!(batch_id = %job.batch_id, error = %e, "batch rejected");

                job.finalize(BatchStatus::Failed, Some(e.to_string()));
                self.tracker.checkpoint(&job).await;
                job
            }
        }
    }

    async fn process_items(
        &self,
        job: &mut BatchJob,
        batch_type: BatchType,
        items: &[WorkItem],
        config: &ProcessingConfig,
    ) {
        for (index, item) in items.iter().enumerate() {
            let item_identifier = item.identifier(index);
            debug!(batch_id = %job.batch_id, item = %item_identifier, "processing item");

            let outcome = match processors::run_pipeline(
                batch_type,
                self.collaborators.as_ref(),
                config,
                item,
            )
            .await
            {
                Ok(payload) => ItemOutcome::Success { payload },
                Err(reason) => {
                    debug!(
                        batch_id = %job.batch_id,
                        item = %item_identifier,
                        error = reason.message(),
                        "item failed"
                    );
                    ItemOutcome::failed(reason)
                }
            };

            self.tracker
                .record_outcome(
                    job,
                    batch_type,
                    ItemResult {
                        item_identifier,
                        outcome,
                    },
                )
                .await;
        }
    }
}

/// Collision-resistant batch identifier: millisecond timestamp plus a
/// random suffix
fn allocate_batch_id() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(8)
        .map(char::from)
        .collect();
    format!(
        "batch_{}_{}",
        Utc::now().timestamp_millis(),
        suffix.to_lowercase()
    )
}

/// Select the item source (`items` vs `data`) for the batch type
fn normalize_items(batch_type: BatchType, request: SubmitBatchRequest) -> Vec<WorkItem> {
    if batch_type.is_file_based() {
        request.items.into_iter().map(WorkItem::File).collect()
    } else {
        request.data.into_iter().map(WorkItem::Record).collect()
    }
}
