//! Core orchestration logic

pub mod batch;
