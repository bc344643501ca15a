//! Batch orchestration core
//!
//! The coordinator accepts a typed batch submission, drives each work item
//! through its type-specific pipeline, folds outcomes into the aggregate
//! job, and writes pollable progress checkpoints along the way.

pub mod coordinator;
pub mod processors;
pub mod progress;
pub mod types;


pub use coordinator::BatchCoordinator;
pub use progress::ProgressTracker;
pub use types::{
    BatchJob, BatchStatus, BatchSummary, BatchType, FailureReason, FileItem, ItemError,
    ItemOutcome, ItemResult, ProcessingConfig, SubmitBatchRequest, WorkItem,
};
