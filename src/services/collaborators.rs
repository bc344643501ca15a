//! Collaborator service contract
//!
//! The orchestrator core talks to three downstream services through this
//! trait: validation, document processing (OCR/extraction), and storage.
//! Keeping the contract behind a trait lets the coordinator be exercised
//! against test doubles without any network.

use crate::utils::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Answer from the validation collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationVerdict {
    /// Whether the record passed validation
    pub is_valid: bool,
    /// Any additional detail the collaborator returned
    #[serde(flatten)]
    pub details: serde_json::Map<String, Value>,
}

impl ValidationVerdict {
    /// A verdict with no extra detail
    pub fn new(is_valid: bool) -> Self {
        Self {
            is_valid,
            details: serde_json::Map::new(),
        }
    }
}

/// Calls to the downstream validation, document-processing, and storage
/// services
///
/// A call either succeeds or fails once per item attempt; retry and
/// backoff are not this layer's concern.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Collaborators: Send + Sync {
    /// Validate a data record against a named validation type
    async fn validate(&self, validation_type: &str, data: &Value) -> Result<ValidationVerdict>;

    /// Run a document through OCR/extraction
    async fn process_document(
        &self,
        document_type: &str,
        file_name: &str,
        file_data: &Value,
    ) -> Result<Value>;

    /// Store or update a record, returning the acknowledgment
    async fn store_record(&self, target: &str, record: &Value) -> Result<Value>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_verdict_deserializes_extra_detail() {
        let verdict: ValidationVerdict = serde_json::from_value(json!({
            "isValid": true,
            "confidence": 0.93,
            "checkedFields": ["name", "email"]
        }))
        .unwrap();

        assert!(verdict.is_valid);
        assert_eq!(verdict.details["confidence"], json!(0.93));
    }

    #[test]
    fn test_verdict_round_trip() {
        let verdict = ValidationVerdict::new(false);
        let value = serde_json::to_value(&verdict).unwrap();
        assert_eq!(value, json!({"isValid": false}));
    }
}
