//! carwatch-vd (Vehicle Detections) - Detection record web service
//!
//! Accepts uploaded detection images plus structured metadata, persists
//! them to SQLite, and serves listing/history/per-site HTML views and
//! filtered CSV export.

use anyhow::Result;
use clap::Parser;
use tracing::info;

use carwatch_common::config::{resolve_root_folder, RootFolder};
use carwatch_common::db::init_database;
use carwatch_vd::{build_router, AppState};

/// Bind address is compiled in; only the root folder is configurable.
const BIND_ADDR: &str = "127.0.0.1:8000";

#[derive(Parser, Debug)]
#[command(name = "carwatch-vd", about = "CARWATCH vehicle detection record service")]
struct Args {
    /// Root folder holding carwatch.db, images/ and assets/
    #[arg(long)]
    root_folder: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!(
        "Starting CARWATCH Vehicle Detections (carwatch-vd) v{}",
        env!("CARGO_PKG_VERSION")
    );

    let args = Args::parse();

    // Root folder resolution: CLI -> env -> TOML config -> OS default
    let root_path = resolve_root_folder(args.root_folder.as_deref(), "CARWATCH_ROOT_FOLDER");
    let root = RootFolder::new(root_path);
    root.ensure_directories_exist()?;
    info!("Root folder: {}", root.path().display());

    // Open or create database; tables are created if absent
    let db_path = root.database_path();
    info!("Database: {}", db_path.display());
    let pool = init_database(&db_path).await?;
    info!("Database connection established");

    // Create application state and router
    let state = AppState::new(pool, root.images_dir(), root.assets_dir());
    let app = build_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(BIND_ADDR).await?;
    info!("carwatch-vd listening on http://{}", BIND_ADDR);
    info!("Health check: http://{}/health", BIND_ADDR);

    axum::serve(listener, app).await?;

    Ok(())
}
