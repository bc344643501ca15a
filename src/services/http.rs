//! HTTP implementation of the collaborator contract

use crate::config::CollaboratorsConfig;
use crate::services::collaborators::{Collaborators, ValidationVerdict};
use crate::utils::error::{OrchestratorError, Result};
use async_trait::async_trait;
use serde_json::{Value, json};
use std::time::Duration;
use tracing::debug;

/// Reqwest-backed collaborator client
///
/// Endpoint addressing comes from [`CollaboratorsConfig`]; nothing here
/// reads ambient environment state.
#[derive(Debug, Clone)]
pub struct HttpCollaborators {
    client: reqwest::Client,
    config: CollaboratorsConfig,
}

impl HttpCollaborators {
    /// Create a client from collaborator configuration
    pub fn new(config: CollaboratorsConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// POST a JSON payload and return the parsed JSON response
    ///
    /// Non-success responses become an [`OrchestratorError::Collaborator`]
    /// carrying the downstream status and body text.
    async fn post(&self, service: &str, url: &str, body: Value) -> Result<Value> {
        debug!(service, url, "calling collaborator");

        let mut request = self.client.post(url).json(&body);
        if let Some(api_key) = &self.config.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = if body.is_empty() {
                status.to_string()
            } else {
                body
            };
            return Err(OrchestratorError::Collaborator {
                service: service.to_string(),
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl Collaborators for HttpCollaborators {
    async fn validate(&self, validation_type: &str, data: &Value) -> Result<ValidationVerdict> {
        let response = self
            .post(
                "validation",
                &self.config.validation_url,
                json!({
                    "validationType": validation_type,
                    "data": data,
                }),
            )
            .await?;

        Ok(serde_json::from_value(response)?)
    }

    async fn process_document(
        &self,
        document_type: &str,
        file_name: &str,
        file_data: &Value,
    ) -> Result<Value> {
        self.post(
            "document-processing",
            &self.config.document_processing_url,
            json!({
                "documentType": document_type,
                "fileName": file_name,
                "fileData": file_data,
            }),
        )
        .await
    }

    async fn store_record(&self, target: &str, record: &Value) -> Result<Value> {
        let url = format!("{}/{}", self.config.storage_url.trim_end_matches('/'), target);
        self.post("storage", &url, record.clone()).await
    }
}
