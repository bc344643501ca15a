//! Configuration management for the orchestrator
//!
//! This module handles loading, validation, and management of all service
//! configuration.

pub mod models;

pub use models::*;

use crate::utils::error::{OrchestratorError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the orchestrator
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Orchestrator configuration
    pub orchestrator: OrchestratorConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| OrchestratorError::Config(format!("Failed to read config file: {}", e)))?;

        let orchestrator: OrchestratorConfig = serde_yaml::from_str(&content)
            .map_err(|e| OrchestratorError::Config(format!("Failed to parse config: {}", e)))?;

        let config = Self { orchestrator };
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let orchestrator = OrchestratorConfig::from_env()?;
        let config = Self { orchestrator };

        config.validate()?;
        Ok(config)
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.orchestrator.server
    }

    /// Get collaborator endpoints
    pub fn collaborators(&self) -> &CollaboratorsConfig {
        &self.orchestrator.collaborators
    }

    /// Get checkpoint cadence
    pub fn checkpoint(&self) -> &CheckpointConfig {
        &self.orchestrator.checkpoint
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.orchestrator.server.validate()?;
        self.orchestrator.collaborators.validate()?;
        self.orchestrator.checkpoint.validate()?;

        debug!("Configuration validation completed");
        Ok(())
    }

    /// Convert to YAML string
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(&self.orchestrator).map_err(|e| {
            OrchestratorError::Config(format!("Failed to serialize config to YAML: {}", e))
        })
    }
}
