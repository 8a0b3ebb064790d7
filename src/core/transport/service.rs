//! Transport service - runs the dispatch core behind the configured transport.
//!
//! The service owns the server lifecycle for the duration of a run: it starts
//! the dispatch core, serves until the transport finishes or is shut down,
//! then stops it.

use tracing::{info, warn};

use super::{TransportConfig, TransportResult};
use crate::core::McpServer;

#[cfg(feature = "stdio")]
use super::stdio::StdioTransport;

#[cfg(feature = "tcp")]
use super::tcp::TcpTransport;

#[cfg(feature = "http")]
use super::http::HttpTransport;

/// Transport service - manages the transport layer for the MCP server.
pub struct TransportService {
    config: TransportConfig,
}

impl TransportService {
    pub fn new(config: TransportConfig) -> Self {
        Self { config }
    }

    /// Create a transport service from environment variables.
    pub fn from_env() -> Self {
        Self::new(TransportConfig::from_env())
    }

    pub fn config(&self) -> &TransportConfig {
        &self.config
    }

    /// Start the server, run the transport until it finishes, then stop the
    /// server. A transport failure is reported after the server is stopped.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        info!("Starting transport: {}", self.config.description());
        server.start().await?;

        let outcome = match self.config {
            #[cfg(feature = "stdio")]
            TransportConfig::Stdio => StdioTransport::run(server.clone()).await,
            #[cfg(feature = "tcp")]
            TransportConfig::Tcp(cfg) => TcpTransport::new(cfg).run(server.clone()).await,
            #[cfg(feature = "http")]
            TransportConfig::Http(cfg) => HttpTransport::new(cfg).run(server.clone()).await,
        };

        if let Err(e) = &outcome {
            warn!("Transport finished with error: {}", e);
        }
        server.stop().await?;
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Config;
    use crate::core::error::LifecycleError;
    use crate::core::transport::TransportError;

    #[tokio::test]
    async fn test_run_refuses_a_running_server() {
        let server = McpServer::builder(Config::default()).without_catalog().build();
        server.start().await.unwrap();

        let result = TransportService::new(TransportConfig::default())
            .run(server.clone())
            .await;
        assert!(matches!(
            result,
            Err(TransportError::Lifecycle(LifecycleError::AlreadyRunning))
        ));
    }
}
