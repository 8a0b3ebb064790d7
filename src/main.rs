//! ARC MCP Server Entry Point
//!
//! Initializes logging, loads configuration, builds the dispatch core and
//! serves it over the configured transport.

use anyhow::Result;
use tracing::{Level, info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use arc_mcp_server::core::config::LoggingConfig;
use arc_mcp_server::core::{Config, McpServer, TransportService};

#[tokio::main]
async fn main() -> Result<()> {
    // Logging first, so warnings raised while loading the rest are visible.
    let logging = LoggingConfig::from_env();
    init_logging(&logging.level, logging.with_timestamps);

    let config = Config::from_env();

    info!("Starting {} v{}", config.server.name, config.server.version);
    if config.security.require_auth {
        info!(
            "Transport authentication required ({} configured tokens)",
            config.security.api_tokens.len()
        );
    } else {
        warn!("MCP_REQUIRE_AUTH not enabled - transport requests are accepted without credentials");
    }

    let server = McpServer::new(config.clone());
    info!("Server initialized with {} tools", server.registry().len());

    // The transport service starts and stops the server around the run.
    TransportService::new(config.transport).run(server).await?;

    info!("Server shutting down");

    Ok(())
}

/// Initialize the logging subsystem.
///
/// Logs go to stderr; stdout belongs to the STDIO transport.
fn init_logging(level: &str, with_timestamps: bool) {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let subscriber = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);

    if with_timestamps {
        subscriber.init();
    } else {
        subscriber.without_time().init();
    }
}
