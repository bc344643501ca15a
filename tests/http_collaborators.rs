//! Integration tests for the HTTP collaborator client against mocked
//! downstream services.

use batchflow_rs::config::{CheckpointConfig, CollaboratorsConfig};
use batchflow_rs::core::batch::{
    BatchCoordinator, BatchStatus, FailureReason, ItemOutcome, SubmitBatchRequest,
};
use batchflow_rs::services::collaborators::Collaborators;
use batchflow_rs::services::http::HttpCollaborators;
use batchflow_rs::storage::checkpoint::InMemoryCheckpointStore;
use batchflow_rs::utils::error::OrchestratorError;
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn config_for(server: &MockServer) -> CollaboratorsConfig {
    CollaboratorsConfig {
        validation_url: format!("{}/api/validate", server.uri()),
        document_processing_url: format!("{}/api/process-document", server.uri()),
        storage_url: format!("{}/api/records", server.uri()),
        timeout_secs: 5,
        api_key: None,
    }
}

#[tokio::test]
async fn validate_parses_verdict_and_extra_details() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/validate"))
        .and(body_partial_json(json!({
            "validationType": "customer",
            "data": {"customerId": "C-1"},
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "isValid": true,
            "checkedFields": ["customerId", "email"],
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpCollaborators::new(config_for(&server)).unwrap();
    let verdict = client
        .validate("customer", &json!({"customerId": "C-1"}))
        .await
        .unwrap();

    assert!(verdict.is_valid);
    assert_eq!(
        verdict.details.get("checkedFields"),
        Some(&json!(["customerId", "email"]))
    );
}

#[tokio::test]
async fn non_success_response_surfaces_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/process-document"))
        .respond_with(ResponseTemplate::new(422).set_body_string("unsupported file format"))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpCollaborators::new(config_for(&server)).unwrap();
    let error = client
        .process_document("standard_document", "report.xyz", &json!({"content": "..."}))
        .await
        .unwrap_err();

    match error {
        OrchestratorError::Collaborator {
            service,
            status,
            message,
        } => {
            assert_eq!(service, "document-processing");
            assert_eq!(status, 422);
            assert!(message.contains("unsupported file format"));
        }
        other => panic!("expected collaborator error, got {:?}", other),
    }
}

#[tokio::test]
async fn store_record_targets_the_named_collection() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/records/inventory"))
        .and(body_partial_json(json!({"sku": "SKU-7"})))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"stored": true, "id": "inv_1"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpCollaborators::new(config_for(&server)).unwrap();
    let ack = client
        .store_record("inventory", &json!({"sku": "SKU-7", "quantity": 12}))
        .await
        .unwrap();

    assert_eq!(ack["stored"], json!(true));
}

#[tokio::test]
async fn api_key_is_sent_as_bearer_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/validate"))
        .and(header("authorization", "Bearer sk-collab-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"isValid": true})))
        .expect(1)
        .mount(&server)
        .await;

    let mut config = config_for(&server);
    config.api_key = Some("sk-collab-test".to_string());

    let client = HttpCollaborators::new(config).unwrap();
    let verdict = client.validate("generic", &json!({})).await.unwrap();
    assert!(verdict.is_valid);
}

#[tokio::test]
async fn customer_import_end_to_end_over_http() {
    let server = MockServer::start().await;

    // First record passes validation, second is rejected
    Mock::given(method("POST"))
        .and(path("/api/validate"))
        .and(body_partial_json(json!({"data": {"customerId": "C-1"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"isValid": true})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/validate"))
        .and(body_partial_json(json!({"data": {"customerId": "C-2"}})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "isValid": false,
            "reason": "missing email",
        })))
        .expect(1)
        .mount(&server)
        .await;
    // Only the valid record reaches storage
    Mock::given(method("POST"))
        .and(path("/api/records/customers"))
        .and(body_partial_json(json!({"customerId": "C-1"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"stored": true})))
        .expect(1)
        .mount(&server)
        .await;

    let collaborators = HttpCollaborators::new(config_for(&server)).unwrap();
    let coordinator = BatchCoordinator::new(
        Arc::new(collaborators),
        Arc::new(InMemoryCheckpointStore::new()),
        CheckpointConfig::default(),
    );

    let request = SubmitBatchRequest {
        batch_type: "customer_import".to_string(),
        data: vec![
            json!({"customerId": "C-1", "email": "c1@example.com"}),
            json!({"customerId": "C-2"}),
        ],
        ..Default::default()
    };

    let job = coordinator.submit_batch(request).await;

    assert_eq!(job.status, BatchStatus::Completed);
    assert_eq!(job.total_items, 2);
    assert_eq!(job.successful_items, 1);
    assert_eq!(job.failed_items, 1);
    assert!(job.results[0].outcome.is_success());
    match &job.results[1].outcome {
        ItemOutcome::Failed { reason, .. } => assert!(matches!(
            reason,
            FailureReason::ValidationRejected { validation_type, .. }
                if validation_type == "customer"
        )),
        other => panic!("expected failed outcome, got {:?}", other),
    }
}
