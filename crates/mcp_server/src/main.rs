//! snipserve - screenshot MCP server
//!
//! Exposes full-screen and interactive region capture as MCP tools over
//! stdio. The actual pixel work happens in the `snip` helper process; this
//! server spawns it per invocation, enforces a timeout, and relays its JSON
//! result record.

mod helper;
mod mcp;
mod requests;
mod store;

use anyhow::Result;
use mcp::SnipServer;
use rmcp::{transport::stdio, ServiceExt};
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the MCP protocol; log to stderr only
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("snipserve=info")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    info!("snipserve starting (transport: stdio)");

    let server = SnipServer::new()?;
    let service = server.serve(stdio()).await?;

    info!("server initialized, waiting for MCP requests");
    service.waiting().await?;

    info!("snipserve shutting down");
    Ok(())
}
