//! Batch orchestration types and data structures

use crate::utils::error::OrchestratorError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

/// Closed set of supported batch operations
///
/// Adding a new batch type is a compile-time-checked addition: the
/// coordinator dispatches on this enum exhaustively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchType {
    /// Extract text/metadata from uploaded files
    FileProcessing,
    /// Validate data records against a named validation type
    DataValidation,
    /// Run documents through the OCR collaborator
    OcrProcessing,
    /// OCR a medical form, then validate the extracted data
    MedicalRecords,
    /// Validate and store customer records
    CustomerImport,
    /// Validate and apply inventory updates
    InventoryUpdate,
    /// Validate and store survey responses
    SurveyProcessing,
}

impl BatchType {
    /// All known batch types
    pub const ALL: [BatchType; 7] = [
        BatchType::FileProcessing,
        BatchType::DataValidation,
        BatchType::OcrProcessing,
        BatchType::MedicalRecords,
        BatchType::CustomerImport,
        BatchType::InventoryUpdate,
        BatchType::SurveyProcessing,
    ];

    /// Wire name of the batch type
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchType::FileProcessing => "file_processing",
            BatchType::DataValidation => "data_validation",
            BatchType::OcrProcessing => "ocr_processing",
            BatchType::MedicalRecords => "medical_records",
            BatchType::CustomerImport => "customer_import",
            BatchType::InventoryUpdate => "inventory_update",
            BatchType::SurveyProcessing => "survey_processing",
        }
    }

    /// Whether this batch type consumes file items (`items`) rather than
    /// data records (`data`)
    pub fn is_file_based(&self) -> bool {
        matches!(
            self,
            BatchType::FileProcessing | BatchType::OcrProcessing | BatchType::MedicalRecords
        )
    }
}

impl FromStr for BatchType {
    type Err = OrchestratorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BatchType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| OrchestratorError::UnsupportedBatchType(s.to_string()))
    }
}

impl fmt::Display for BatchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Batch lifecycle status
///
/// Monotonic: once a batch reaches `Completed` or `Failed` it never
/// returns to `Processing`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatchStatus {
    /// Items are being processed
    Processing,
    /// All items have been attempted
    Completed,
    /// The batch aborted before per-item processing could proceed
    Failed,
}

impl BatchStatus {
    /// Whether the batch has reached a terminal state
    pub fn is_terminal(&self) -> bool {
        matches!(self, BatchStatus::Completed | BatchStatus::Failed)
    }
}

/// Structured reason for a failed item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FailureReason {
    /// The validation collaborator answered, but rejected the data
    #[serde(rename_all = "camelCase")]
    ValidationRejected {
        /// Validation type the record was checked against
        validation_type: String,
        /// Human-readable rejection message
        message: String,
    },
    /// A collaborator call failed (network error or non-success status)
    CollaboratorError {
        /// Downstream error message
        message: String,
    },
    /// The work item itself was missing required fields
    MalformedItem {
        /// What was missing or wrong
        message: String,
    },
}

impl FailureReason {
    /// The human-readable message for this failure
    pub fn message(&self) -> &str {
        match self {
            FailureReason::ValidationRejected { message, .. }
            | FailureReason::CollaboratorError { message }
            | FailureReason::MalformedItem { message } => message,
        }
    }
}

/// Discriminated per-item outcome
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ItemOutcome {
    /// The item's pipeline completed; payload is opaque collaborator data
    Success {
        /// Type-specific result data
        payload: Value,
    },
    /// The item's pipeline failed at some step
    Failed {
        /// Failure message (mirrors `reason`, kept for quick inspection)
        error: String,
        /// Structured failure reason
        reason: FailureReason,
    },
}

impl ItemOutcome {
    /// Build a failed outcome from a structured reason
    pub fn failed(reason: FailureReason) -> Self {
        ItemOutcome::Failed {
            error: reason.message().to_string(),
            reason,
        }
    }

    /// Whether this outcome is a success
    pub fn is_success(&self) -> bool {
        matches!(self, ItemOutcome::Success { .. })
    }
}

/// Per-item result entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemResult {
    /// Best-effort label for the item (file name, record key); not
    /// guaranteed unique
    pub item_identifier: String,
    /// The item's outcome
    #[serde(flatten)]
    pub outcome: ItemOutcome,
}

/// Failure entry in the batch's quick-inspection error list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemError {
    /// Best-effort label for the item
    pub item_identifier: String,
    /// Failure message
    pub error: String,
    /// Structured failure reason
    pub reason: FailureReason,
}

/// The aggregate root for one orchestration run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchJob {
    /// Opaque unique identifier, generated at creation
    pub batch_id: String,
    /// Declared batch type, echoed as submitted (may be an unknown type
    /// for batches that failed before dispatch)
    pub batch_type: String,
    /// Lifecycle status
    pub status: BatchStatus,
    /// Number of items in the submission
    pub total_items: usize,
    /// Items attempted so far; always `successful_items + failed_items`
    pub processed_items: usize,
    /// Items that succeeded
    pub successful_items: usize,
    /// Items that failed
    pub failed_items: usize,
    /// Per-item results in processing order, one entry per attempt
    pub results: Vec<ItemResult>,
    /// Failures only, in processing order
    pub errors: Vec<ItemError>,
    /// When the batch was accepted
    pub start_time: DateTime<Utc>,
    /// When the batch reached a terminal state; set once
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
    /// `end_time - start_time` in milliseconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_processing_time_ms: Option<i64>,
    /// Top-level error; set only when the batch aborted before per-item
    /// processing (e.g. an unsupported batch type)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl BatchJob {
    /// Create a new batch job in `Processing` state
    pub fn new(batch_id: String, batch_type: String, total_items: usize) -> Self {
        Self {
            batch_id,
            batch_type,
            status: BatchStatus::Processing,
            total_items,
            processed_items: 0,
            successful_items: 0,
            failed_items: 0,
            results: Vec::with_capacity(total_items),
            errors: Vec::new(),
            start_time: Utc::now(),
            end_time: None,
            total_processing_time_ms: None,
            error: None,
        }
    }

    /// Transition to a terminal status, stamping `end_time` exactly once
    ///
    /// The status change is monotonic; finalizing an already-terminal job
    /// is a no-op.
    pub fn finalize(&mut self, status: BatchStatus, error: Option<String>) {
        if self.status.is_terminal() {
            return;
        }
        self.status = status;
        self.error = error;

        let end_time = Utc::now();
        self.end_time = Some(end_time);
        self.total_processing_time_ms =
            Some((end_time - self.start_time).num_milliseconds().max(0));
    }
}

/// Compact batch representation for listing endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchSummary {
    /// Batch identifier
    pub batch_id: String,
    /// Declared batch type
    pub batch_type: String,
    /// Lifecycle status
    pub status: BatchStatus,
    /// Number of items in the submission
    pub total_items: usize,
    /// Items attempted so far
    pub processed_items: usize,
    /// Items that succeeded
    pub successful_items: usize,
    /// Items that failed
    pub failed_items: usize,
    /// When the batch was accepted
    pub start_time: DateTime<Utc>,
}

impl From<&BatchJob> for BatchSummary {
    fn from(job: &BatchJob) -> Self {
        Self {
            batch_id: job.batch_id.clone(),
            batch_type: job.batch_type.clone(),
            status: job.status,
            total_items: job.total_items,
            processed_items: job.processed_items,
            successful_items: job.successful_items,
            failed_items: job.failed_items,
            start_time: job.start_time,
        }
    }
}

/// One file in a file-based batch submission
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileItem {
    /// File name, used as the item identifier when present
    #[serde(default)]
    pub file_name: Option<String>,
    /// File payload (base64 content, storage reference, or inline data)
    #[serde(default)]
    pub file_data: Option<Value>,
    /// Any additional fields callers attach to the file
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Free-form per-batch option bag
///
/// Unrecognized options are preserved and ignored, never rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessingConfig {
    /// Validation type override for validation-driven batches
    #[serde(default)]
    pub validation_type: Option<String>,
    /// Document type override for OCR-driven batches
    #[serde(default)]
    pub document_type: Option<String>,
    /// Everything else
    #[serde(flatten)]
    pub extra: HashMap<String, Value>,
}

/// Batch submission request
///
/// Callers supply either `items` (file-based batches) or `data`
/// (record-based batches) depending on `batch_type`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitBatchRequest {
    /// Declared batch type (wire name, e.g. `customer_import`)
    #[serde(default)]
    pub batch_type: String,
    /// File items, consumed by file-based batch types
    #[serde(default)]
    pub items: Vec<FileItem>,
    /// Data records, consumed by record-based batch types
    #[serde(default)]
    pub data: Vec<Value>,
    /// Per-batch options
    #[serde(default)]
    pub processing_config: ProcessingConfig,
}

/// One unit of work inside a batch
#[derive(Debug, Clone)]
pub enum WorkItem {
    /// A file to extract or OCR
    File(FileItem),
    /// A data record to validate/import
    Record(Value),
}

impl WorkItem {
    /// Best-effort item label for traceability
    ///
    /// Files use their file name; records use a common key when one is
    /// present. Falls back to a positional label.
    pub fn identifier(&self, index: usize) -> String {
        match self {
            WorkItem::File(file) => file
                .file_name
                .clone()
                .unwrap_or_else(|| format!("file_{}", index)),
            WorkItem::Record(record) => ["id", "recordId", "customerId", "sku", "name"]
                .iter()
                .find_map(|key| record.get(key))
                .and_then(|v| match v {
                    Value::String(s) => Some(s.clone()),
                    Value::Number(n) => Some(n.to_string()),
                    _ => None,
                })
                .unwrap_or_else(|| format!("record_{}", index)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_batch_type_round_trip() {
        for batch_type in BatchType::ALL {
            let parsed: BatchType = batch_type.as_str().parse().unwrap();
            assert_eq!(parsed, batch_type);
        }
    }

    #[test]
    fn test_unknown_batch_type_is_rejected() {
        let result = "unknown_type".parse::<BatchType>();
        assert!(matches!(
            result,
            Err(OrchestratorError::UnsupportedBatchType(ref t)) if t == "unknown_type"
        ));
    }

    #[test]
    fn test_file_based_split() {
        assert!(BatchType::FileProcessing.is_file_based());
        assert!(BatchType::MedicalRecords.is_file_based());
        assert!(!BatchType::CustomerImport.is_file_based());
        assert!(!BatchType::DataValidation.is_file_based());
    }

    #[test]
    fn test_status_monotonicity() {
        let mut job = BatchJob::new("batch_1".to_string(), "data_validation".to_string(), 0);
        job.finalize(BatchStatus::Completed, None);
        let first_end = job.end_time;

        job.finalize(BatchStatus::Failed, Some("should not apply".to_string()));
        assert_eq!(job.status, BatchStatus::Completed);
        assert_eq!(job.end_time, first_end);
        assert!(job.error.is_none());
    }

    #[test]
    fn test_item_result_serialization() {
        let success = ItemResult {
            item_identifier: "invoice.pdf".to_string(),
            outcome: ItemOutcome::Success {
                payload: json!({"extractedText": "hello"}),
            },
        };
        let value = serde_json::to_value(&success).unwrap();
        assert_eq!(value["itemIdentifier"], "invoice.pdf");
        assert_eq!(value["status"], "success");
        assert_eq!(value["payload"]["extractedText"], "hello");

        let failed = ItemResult {
            item_identifier: "rec_1".to_string(),
            outcome: ItemOutcome::failed(FailureReason::ValidationRejected {
                validation_type: "customer".to_string(),
                message: "customer data validation failed".to_string(),
            }),
        };
        let value = serde_json::to_value(&failed).unwrap();
        assert_eq!(value["status"], "failed");
        assert_eq!(value["error"], "customer data validation failed");
        assert_eq!(value["reason"]["kind"], "validation_rejected");
        assert_eq!(value["reason"]["validationType"], "customer");
    }

    #[test]
    fn test_work_item_identifier() {
        let file = WorkItem::File(FileItem {
            file_name: Some("scan.png".to_string()),
            ..Default::default()
        });
        assert_eq!(file.identifier(0), "scan.png");

        let unnamed = WorkItem::File(FileItem::default());
        assert_eq!(unnamed.identifier(3), "file_3");

        let record = WorkItem::Record(json!({"customerId": "C-17", "name": "alice"}));
        assert_eq!(record.identifier(0), "C-17");

        let numeric = WorkItem::Record(json!({"id": 42}));
        assert_eq!(numeric.identifier(0), "42");

        let bare = WorkItem::Record(json!({"value": true}));
        assert_eq!(bare.identifier(5), "record_5");
    }

    #[test]
    fn test_processing_config_ignores_unknown_options() {
        let config: ProcessingConfig = serde_json::from_value(json!({
            "validationType": "survey",
            "someFutureOption": {"nested": true}
        }))
        .unwrap();

        assert_eq!(config.validation_type.as_deref(), Some("survey"));
        assert!(config.extra.contains_key("someFutureOption"));
    }

    #[test]
    fn test_submit_request_defaults() {
        let request: SubmitBatchRequest =
            serde_json::from_value(json!({"batchType": "data_validation"})).unwrap();
        assert_eq!(request.batch_type, "data_validation");
        assert!(request.items.is_empty());
        assert!(request.data.is_empty());
    }
}
