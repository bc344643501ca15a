//! Configuration model structs

use crate::core::batch::types::BatchType;
use crate::utils::error::{OrchestratorError, Result};
use serde::{Deserialize, Serialize};

/// Top-level orchestrator configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct OrchestratorConfig {
    /// HTTP server configuration
    pub server: ServerConfig,
    /// Downstream collaborator endpoints
    pub collaborators: CollaboratorsConfig,
    /// Checkpoint cadence per batch type
    pub checkpoint: CheckpointConfig,
}

impl OrchestratorConfig {
    /// Build configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(host) = std::env::var("ORCHESTRATOR_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = std::env::var("ORCHESTRATOR_PORT") {
            config.server.port = port
                .parse()
                .map_err(|_| OrchestratorError::Config(format!("Invalid port: {}", port)))?;
        }
        if let Ok(url) = std::env::var("VALIDATION_SERVICE_URL") {
            config.collaborators.validation_url = url;
        }
        if let Ok(url) = std::env::var("DOCUMENT_SERVICE_URL") {
            config.collaborators.document_processing_url = url;
        }
        if let Ok(url) = std::env::var("STORAGE_SERVICE_URL") {
            config.collaborators.storage_url = url;
        }
        if let Ok(key) = std::env::var("COLLABORATOR_API_KEY") {
            config.collaborators.api_key = Some(key);
        }

        Ok(config)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind address
    pub host: String,
    /// Bind port
    pub port: u16,
    /// Number of actix workers (defaults to the number of cores)
    pub workers: Option<usize>,
    /// CORS configuration
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            workers: None,
            cors: CorsConfig::default(),
        }
    }
}

impl ServerConfig {
    /// Validate the server configuration
    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(OrchestratorError::Config(
                "Server host must not be empty".to_string(),
            ));
        }
        if self.port == 0 {
            return Err(OrchestratorError::Config(
                "Server port must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorsConfig {
    /// Whether CORS headers are emitted
    pub enabled: bool,
    /// Allowed origins; `*` allows any origin
    pub allowed_origins: Vec<String>,
    /// Allowed HTTP methods
    pub allowed_methods: Vec<String>,
    /// Preflight cache lifetime in seconds
    pub max_age: u32,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed_origins: vec!["*".to_string()],
            allowed_methods: vec![
                "GET".to_string(),
                "POST".to_string(),
                "OPTIONS".to_string(),
            ],
            max_age: 3600,
        }
    }
}

impl CorsConfig {
    /// Whether any origin is accepted
    pub fn allows_all_origins(&self) -> bool {
        self.allowed_origins.iter().any(|o| o == "*")
    }
}

/// Downstream collaborator endpoints
///
/// All collaborator addressing lives here so the orchestrator core can be
/// exercised against fakes without touching ambient environment state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CollaboratorsConfig {
    /// Validation service endpoint
    pub validation_url: String,
    /// Document-processing (OCR/extraction) service endpoint
    pub document_processing_url: String,
    /// Storage/update service base endpoint
    pub storage_url: String,
    /// Per-call timeout in seconds
    pub timeout_secs: u64,
    /// Optional bearer token sent to all collaborators
    pub api_key: Option<String>,
}

impl Default for CollaboratorsConfig {
    fn default() -> Self {
        Self {
            validation_url: "http://127.0.0.1:9081/api/validate".to_string(),
            document_processing_url: "http://127.0.0.1:9082/api/process-document".to_string(),
            storage_url: "http://127.0.0.1:9083/api/records".to_string(),
            timeout_secs: 30,
            api_key: None,
        }
    }
}

impl CollaboratorsConfig {
    /// Validate the collaborator configuration
    pub fn validate(&self) -> Result<()> {
        for (name, url) in [
            ("validation_url", &self.validation_url),
            ("document_processing_url", &self.document_processing_url),
            ("storage_url", &self.storage_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(OrchestratorError::Config(format!(
                    "{} must be an http(s) URL, got: {}",
                    name, url
                )));
            }
        }
        if self.timeout_secs == 0 {
            return Err(OrchestratorError::Config(
                "Collaborator timeout must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

/// Checkpoint cadence per batch type
///
/// Progress snapshots are written after every Nth item, and always after
/// the last item of a batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckpointConfig {
    /// Cadence for file-processing batches
    pub file_interval: u32,
    /// Cadence for OCR-driven batches (ocr_processing, medical_records)
    pub ocr_interval: u32,
    /// Cadence for validation and record-import batches
    pub default_interval: u32,
}

impl Default for CheckpointConfig {
    fn default() -> Self {
        Self {
            file_interval: 5,
            ocr_interval: 3,
            default_interval: 10,
        }
    }
}

impl CheckpointConfig {
    /// Checkpoint interval for a batch type, never below 1
    pub fn interval_for(&self, batch_type: BatchType) -> usize {
        let interval = match batch_type {
            BatchType::FileProcessing => self.file_interval,
            BatchType::OcrProcessing | BatchType::MedicalRecords => self.ocr_interval,
            BatchType::DataValidation
            | BatchType::CustomerImport
            | BatchType::InventoryUpdate
            | BatchType::SurveyProcessing => self.default_interval,
        };
        interval.max(1) as usize
    }

    /// Validate the checkpoint configuration
    pub fn validate(&self) -> Result<()> {
        for (name, interval) in [
            ("file_interval", self.file_interval),
            ("ocr_interval", self.ocr_interval),
            ("default_interval", self.default_interval),
        ] {
            if interval == 0 {
                return Err(OrchestratorError::Config(format!(
                    "Checkpoint {} must be non-zero",
                    name
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = OrchestratorConfig::default();
        assert!(config.server.validate().is_ok());
        assert!(config.collaborators.validate().is_ok());
        assert!(config.checkpoint.validate().is_ok());
    }

    #[test]
    fn test_interval_per_batch_type() {
        let cadence = CheckpointConfig::default();
        assert_eq!(cadence.interval_for(BatchType::FileProcessing), 5);
        assert_eq!(cadence.interval_for(BatchType::OcrProcessing), 3);
        assert_eq!(cadence.interval_for(BatchType::MedicalRecords), 3);
        assert_eq!(cadence.interval_for(BatchType::DataValidation), 10);
        assert_eq!(cadence.interval_for(BatchType::CustomerImport), 10);
    }

    #[test]
    fn test_interval_never_below_one() {
        let cadence = CheckpointConfig {
            file_interval: 0,
            ocr_interval: 0,
            default_interval: 0,
        };
        assert_eq!(cadence.interval_for(BatchType::FileProcessing), 1);
        assert!(cadence.validate().is_err());
    }

    #[test]
    fn test_collaborator_url_scheme_is_checked() {
        let config = CollaboratorsConfig {
            validation_url: "ftp://somewhere/validate".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_cors_wildcard_detection() {
        let cors = CorsConfig::default();
        assert!(cors.allows_all_origins());

        let cors = CorsConfig {
            allowed_origins: vec!["https://app.example.com".to_string()],
            ..Default::default()
        };
        assert!(!cors.allows_all_origins());
    }
}
