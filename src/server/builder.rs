//! Server builder and run_server function

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::{OrchestratorError, Result};
use tracing::info;

/// Server builder for easier configuration
pub struct ServerBuilder {
    config: Option<Config>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the HTTP server
    pub fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| OrchestratorError::Config("Configuration is required".to_string()))?;

        HttpServer::new(&config)
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the server, loading configuration from the given file with an
/// environment-variable fallback
pub async fn run_server(config_path: &str) -> Result<()> {
    info!("Starting batchflow orchestrator");
    info!("Loading configuration file: {}", config_path);

    let config = match Config::from_file(config_path).await {
        Ok(config) => {
            info!("Configuration file loaded successfully");
            config
        }
        Err(e) => {
            info!(
                "Configuration file loading failed ({}), falling back to environment",
                e
            );
            Config::from_env()?
        }
    };

    let server = HttpServer::new(&config)?;
    info!(
        "Server starting at: http://{}:{}",
        config.server().host,
        config.server().port
    );
    info!("API Endpoints:");
    info!("   GET  /health - Health check");
    info!("   GET  /version - Version info");
    info!("   POST /v1/batches - Submit a batch");
    info!("   GET  /v1/batches - List batches");
    info!("   GET  /v1/batches/{{batch_id}} - Poll batch status");

    server.start().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_requires_config() {
        assert!(ServerBuilder::new().build().is_err());
    }

    #[test]
    fn test_builder_with_default_config() {
        let server = ServerBuilder::new()
            .with_config(Config::default())
            .build()
            .unwrap();
        assert_eq!(server.config().port, 8080);
    }
}
