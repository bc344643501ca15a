//! Type-specific item pipelines
//!
//! One pipeline per batch type. Every pipeline consumes a single work
//! item and either returns an opaque success payload or a structured
//! failure reason. Failures are isolated: the coordinator records them
//! and moves on to the next item.

use crate::core::batch::types::{BatchType, FailureReason, FileItem, ProcessingConfig, WorkItem};
use crate::services::collaborators::Collaborators;
use crate::utils::error::OrchestratorError;
use serde_json::{Value, json};

/// Pipeline outcome: opaque payload or structured failure
pub type PipelineResult = Result<Value, FailureReason>;

/// Run the pipeline for `batch_type` against one work item
pub async fn run_pipeline(
    batch_type: BatchType,
    collaborators: &dyn Collaborators,
    config: &ProcessingConfig,
    item: &WorkItem,
) -> PipelineResult {
    match batch_type {
        BatchType::FileProcessing => process_file(collaborators, config, item).await,
        BatchType::DataValidation => validate_record(collaborators, config, item).await,
        BatchType::OcrProcessing => ocr_document(collaborators, config, item).await,
        BatchType::MedicalRecords => process_medical_record(collaborators, item).await,
        BatchType::CustomerImport => {
            import_record(collaborators, item, "customer", "customers").await
        }
        BatchType::InventoryUpdate => {
            import_record(collaborators, item, "inventory", "inventory").await
        }
        BatchType::SurveyProcessing => import_record(collaborators, item, "survey", "surveys").await,
    }
}

/// Extract text/metadata from an uploaded file
async fn process_file(
    collaborators: &dyn Collaborators,
    config: &ProcessingConfig,
    item: &WorkItem,
) -> PipelineResult {
    let (file_name, file_data) = file_parts(item)?;
    let document_type = config.document_type.as_deref().unwrap_or("standard_document");

    collaborators
        .process_document(document_type, file_name, file_data)
        .await
        .map_err(collaborator_failure)
}

/// Validate one data record against the configured validation type
async fn validate_record(
    collaborators: &dyn Collaborators,
    config: &ProcessingConfig,
    item: &WorkItem,
) -> PipelineResult {
    let record = record_payload(item)?;
    let validation_type = config.validation_type.as_deref().unwrap_or("generic");

    let verdict = collaborators
        .validate(validation_type, record)
        .await
        .map_err(collaborator_failure)?;

    if !verdict.is_valid {
        return Err(validation_rejected(validation_type));
    }

    Ok(json!({
        "validationType": validation_type,
        "isValid": true,
        "details": Value::Object(verdict.details),
    }))
}

/// Run one document through the OCR collaborator
async fn ocr_document(
    collaborators: &dyn Collaborators,
    config: &ProcessingConfig,
    item: &WorkItem,
) -> PipelineResult {
    let (file_name, file_data) = file_parts(item)?;
    let document_type = config.document_type.as_deref().unwrap_or("generic");

    collaborators
        .process_document(document_type, file_name, file_data)
        .await
        .map_err(collaborator_failure)
}

/// OCR a medical form, then validate the extracted structured data
///
/// The item fails if either step fails; OCR success alone is not enough.
async fn process_medical_record(
    collaborators: &dyn Collaborators,
    item: &WorkItem,
) -> PipelineResult {
    let (file_name, file_data) = file_parts(item)?;

    let extracted = collaborators
        .process_document("medical_form", file_name, file_data)
        .await
        .map_err(collaborator_failure)?;

    let verdict = collaborators
        .validate("medical_record", &extracted)
        .await
        .map_err(collaborator_failure)?;

    if !verdict.is_valid {
        return Err(validation_rejected("medical_record"));
    }

    Ok(json!({
        "extracted": extracted,
        "validation": Value::Object(verdict.details),
    }))
}

/// Validate a record, then store it; a rejected record never reaches the
/// storage collaborator
async fn import_record(
    collaborators: &dyn Collaborators,
    item: &WorkItem,
    validation_type: &str,
    storage_target: &str,
) -> PipelineResult {
    let record = record_payload(item)?;

    let verdict = collaborators
        .validate(validation_type, record)
        .await
        .map_err(collaborator_failure)?;

    if !verdict.is_valid {
        return Err(validation_rejected(validation_type));
    }

    let acknowledgment = collaborators
        .store_record(storage_target, record)
        .await
        .map_err(collaborator_failure)?;

    Ok(json!({
        "validation": Value::Object(verdict.details),
        "stored": acknowledgment,
    }))
}

fn file_parts(item: &WorkItem) -> Result<(&str, &Value), FailureReason> {
    match item {
        WorkItem::File(FileItem {
            file_name,
            file_data: Some(file_data),
            ..
        }) => Ok((file_name.as_deref().unwrap_or("unnamed"), file_data)),
        WorkItem::File(_) => Err(FailureReason::MalformedItem {
            message: "file item is missing fileData".to_string(),
        }),
        WorkItem::Record(_) => Err(FailureReason::MalformedItem {
            message: "expected a file item, got a data record".to_string(),
        }),
    }
}

fn record_payload(item: &WorkItem) -> Result<&Value, FailureReason> {
    match item {
        WorkItem::Record(record) => Ok(record),
        WorkItem::File(_) => Err(FailureReason::MalformedItem {
            message: "expected a data record, got a file item".to_string(),
        }),
    }
}

fn collaborator_failure(error: OrchestratorError) -> FailureReason {
    FailureReason::CollaboratorError {
        message: error.to_string(),
    }
}

fn validation_rejected(validation_type: &str) -> FailureReason {
    FailureReason::ValidationRejected {
        validation_type: validation_type.to_string(),
        message: format!("{} data validation failed", validation_type),
    }
}
