//! e-Stat MCP server over stdio.

mod server;

use anyhow::Result;
use rmcp::transport::stdio;
use rmcp::ServiceExt;
use tracing_subscriber::EnvFilter;

use crate::server::EstatServer;

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the MCP transport; all diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    // A missing API key is fatal here, at startup, never per request.
    let config = estat::EstatConfig::from_env()?;
    tracing::info!(
        default_limit = ?config.default_limit,
        "starting e-Stat MCP server on stdio"
    );

    let service = EstatServer::new(config)?.serve(stdio()).await?;
    service.waiting().await?;
    Ok(())
}
