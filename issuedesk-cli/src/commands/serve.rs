//! HTTP server command
//!
//! Connects to PostgreSQL once, then serves the issue API until shutdown.

use std::net::{IpAddr, SocketAddr};

use anyhow::{Context, Result};
use clap::Parser;

use issuedesk_server::db::DEFAULT_MAX_CONNECTIONS;
use issuedesk_server::{
    run_server, AppState, ConnectionProvider, IssueRepo, MemoryIssueStore, ServerConfig,
};

/// Arguments for the serve command
#[derive(Parser, Debug)]
pub struct ServeArgs {
    /// Interface to bind to
    #[arg(long, env = "ISSUEDESK_HOST", default_value = "127.0.0.1")]
    pub host: IpAddr,

    /// Port to listen on
    #[arg(long, short = 'p', env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// PostgreSQL connection string
    #[arg(long, env = "PG_CONNECTION_STRING", hide_env_values = true)]
    pub database_url: Option<String>,

    /// Maximum pooled database connections
    #[arg(long, env = "PG_MAX_CONNECTIONS", default_value_t = DEFAULT_MAX_CONNECTIONS)]
    pub max_connections: u32,

    /// Keep issues in process memory, ignoring any database URL (lost on exit)
    #[arg(long)]
    pub in_memory: bool,
}

impl ServeArgs {
    fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// Run the HTTP server
pub async fn run_serve(args: ServeArgs) -> Result<()> {
    let config = ServerConfig {
        bind_addr: args.bind_addr(),
    };

    let state = if args.in_memory {
        tracing::warn!("Using in-memory store; issues are lost on exit");
        AppState::new(MemoryIssueStore::new())
    } else {
        let database_url = args.database_url.context(
            "PG_CONNECTION_STRING not set. Set via --database-url, PG_CONNECTION_STRING env, or .env",
        )?;

        let repo = IssueRepo::new(ConnectionProvider::new(database_url, args.max_connections));
        repo.connect()
            .await
            .context("Failed to connect to database")?;
        AppState::new(repo)
    };

    tracing::info!("Starting issuedesk server on {}", config.bind_addr);

    // Run server (blocks until shutdown)
    run_server(state, config).await.context("Server error")?;

    Ok(())
}
