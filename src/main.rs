use anyhow::Result;
use std::sync::Arc;
use tracing::error;

use mcp_news::config::Config;
use mcp_news::mcp::server::McpServer;
use mcp_news::news::NewsSource;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize logging
    init_logging()?;

    // Load configuration (optional config file as first argument)
    let config_path = std::env::args().nth(1);
    let config = Config::load(config_path.as_deref())?;

    // The mock article fixture; swap in a real provider here later
    let source = Arc::new(NewsSource::builtin());

    // Create MCP server with the shared source
    let mcp_server = McpServer::new(config, source)?;

    // Set up graceful shutdown
    let shutdown_signal = tokio::signal::ctrl_c();

    // Run MCP server
    tokio::select! {
        result = mcp_server.run() => {
            match result {
                Ok(_) => {},
                Err(e) => error!("MCP server error: {}", e),
            }
        }
        _ = shutdown_signal => {
        }
    }

    Ok(())
}

fn init_logging() -> Result<()> {
    // Support both LOG_LEVEL and RUST_LOG environment variables
    let filter = if let Ok(rust_log) = std::env::var("RUST_LOG") {
        // Use RUST_LOG if set (allows module-specific logging)
        tracing_subscriber::EnvFilter::try_new(rust_log)
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"))
    } else if let Ok(log_level) = std::env::var("LOG_LEVEL") {
        // Use LOG_LEVEL for global level (error, warn, info, debug, trace)
        let level_str = match log_level.to_lowercase().as_str() {
            "trace" => "trace",
            "debug" => "debug",
            "info" => "info",
            "warn" | "warning" => "warn",
            "error" => "error",
            _ => "warn", // Default to WARN for invalid values
        };
        tracing_subscriber::EnvFilter::new(level_str)
    } else {
        // Default to WARN level
        tracing_subscriber::EnvFilter::new("warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr) // Logs to stderr; stdout carries the protocol
        .compact()
        .with_target(false)
        .init();

    Ok(())
}
