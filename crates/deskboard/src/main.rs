//! # deskboard
//!
//! Board server binary — opens the database, registers the board actions,
//! and starts the HTTP server.

#![deny(unsafe_code)]

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use deskboard_engine::{ConnectionConfig, new_file, run_migrations};
use deskboard_rpc::{ActionRegistry, RpcContext, register_all};
use deskboard_server::{BoardServer, ServerConfig};

/// Deskboard server.
#[derive(Parser, Debug)]
#[command(name = "deskboard", about = "Personal task board server")]
struct Cli {
    /// Host to bind.
    #[arg(long, default_value = "0.0.0.0")]
    host: String,

    /// Port to bind (0 for auto-assign).
    #[arg(long, default_value = "8970")]
    port: u16,

    /// Path to the `SQLite` database.
    #[arg(long)]
    db_path: Option<PathBuf>,
}

impl Cli {
    fn default_db_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| "/tmp".to_string());
        PathBuf::from(home)
            .join(".deskboard")
            .join("database")
            .join("board.db")
    }
}

fn ensure_parent_dir(path: &std::path::Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    init_tracing();

    let db_path = args.db_path.unwrap_or_else(Cli::default_db_path);
    ensure_parent_dir(&db_path)?;
    let db_str = db_path.to_string_lossy();
    let pool = new_file(&db_str, &ConnectionConfig::default())
        .context("Failed to open database")?;
    {
        let mut conn = pool.get().context("Failed to get DB connection")?;
        let _ = run_migrations(&mut conn).context("Failed to run migrations")?;
    }

    let mut registry = ActionRegistry::new();
    register_all(&mut registry);
    let action_count = registry.actions().len();

    let config = ServerConfig {
        host: args.host,
        port: args.port,
        ..ServerConfig::default()
    };

    let server = BoardServer::new(config, registry, RpcContext::new(pool));
    let (addr, handle) = server.listen().await.context("Failed to bind server")?;

    tracing::info!("Deskboard listening on http://{addr} ({action_count} actions registered)");

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for ctrl-c")?;

    tracing::info!("Shutting down...");
    server.shutdown().shutdown();
    let _ = handle.await;

    tracing::info!("Shutdown complete");
    Ok(())
}
