//! Progress snapshot storage

pub mod checkpoint;

pub use checkpoint::{CheckpointStore, InMemoryCheckpointStore};
