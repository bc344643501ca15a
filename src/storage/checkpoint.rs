//! Checkpoint store for batch progress snapshots
//!
//! Checkpoints are advisory, best-effort snapshots for external pollers.
//! They never gate the in-memory batch run; a failed write is logged by
//! the caller and processing continues.

use crate::core::batch::types::{BatchJob, BatchSummary};
use crate::utils::error::Result;
use async_trait::async_trait;
use dashmap::DashMap;

/// Read/write contract for batch status records
#[async_trait]
pub trait CheckpointStore: Send + Sync {
    /// Write a snapshot of the batch, replacing any previous one
    async fn write(&self, job: &BatchJob) -> Result<()>;

    /// Read the latest snapshot for a batch
    async fn get(&self, batch_id: &str) -> Result<Option<BatchJob>>;

    /// List summaries of all known batches, most recent first
    async fn list(&self) -> Result<Vec<BatchSummary>>;
}

/// In-memory checkpoint store
///
/// Batch runs are ephemeral: snapshots do not survive a process restart
/// and there is no durable resumption.
#[derive(Debug, Default)]
pub struct InMemoryCheckpointStore {
    snapshots: DashMap<String, BatchJob>,
}

impl InMemoryCheckpointStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of batches with at least one snapshot
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Whether the store holds no snapshots
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

#[async_trait]
impl CheckpointStore for InMemoryCheckpointStore {
    async fn write(&self, job: &BatchJob) -> Result<()> {
        self.snapshots.insert(job.batch_id.clone(), job.clone());
        Ok(())
    }

    async fn get(&self, batch_id: &str) -> Result<Option<BatchJob>> {
        Ok(self.snapshots.get(batch_id).map(|entry| entry.clone()))
    }

    async fn list(&self) -> Result<Vec<BatchSummary>> {
        let mut summaries: Vec<BatchSummary> = self
            .snapshots
            .iter()
            .map(|entry| BatchSummary::from(entry.value()))
            .collect();
        summaries.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::batch::types::BatchStatus;

    #[tokio::test]
    async fn test_write_then_read_back() {
        let store = InMemoryCheckpointStore::new();
        let job = BatchJob::new("batch_1".to_string(), "data_validation".to_string(), 3);

        store.write(&job).await.unwrap();

        let snapshot = store.get("batch_1").await.unwrap().unwrap();
        assert_eq!(snapshot, job);
        assert!(store.get("batch_missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_rewrite_replaces_snapshot() {
        let store = InMemoryCheckpointStore::new();
        let mut job = BatchJob::new("batch_1".to_string(), "ocr_processing".to_string(), 2);

        store.write(&job).await.unwrap();
        job.processed_items = 2;
        job.finalize(BatchStatus::Completed, None);
        store.write(&job).await.unwrap();

        let snapshot = store.get("batch_1").await.unwrap().unwrap();
        assert_eq!(snapshot.status, BatchStatus::Completed);
        assert_eq!(snapshot.processed_items, 2);
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_list_returns_summaries() {
        let store = InMemoryCheckpointStore::new();
        store
            .write(&BatchJob::new(
                "batch_a".to_string(),
                "customer_import".to_string(),
                1,
            ))
            .await
            .unwrap();
        store
            .write(&BatchJob::new(
                "batch_b".to_string(),
                "survey_processing".to_string(),
                4,
            ))
            .await
            .unwrap();

        let summaries = store.list().await.unwrap();
        assert_eq!(summaries.len(), 2);
        // Most recent first
        assert_eq!(summaries[0].batch_id, "batch_b");
    }
}
