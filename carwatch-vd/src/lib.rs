//! carwatch-vd library - Vehicle Detections service
//!
//! Record-keeping backend for vehicle-detection events captured at named
//! sites: multipart image ingest, site registration, HTML review views,
//! and filtered CSV export over a single-file SQLite database.

pub mod api;
pub mod db;
pub mod error;
pub mod storage;

pub use crate::error::{ApiError, ApiResult};

use axum::Router;
use sqlx::SqlitePool;
use std::path::PathBuf;
use tower_http::services::ServeDir;

/// Application state shared across HTTP handlers
///
/// The pool is the injected database handle: each handler acquires a
/// connection per query and the pool releases it on every exit path.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Image store for uploaded detection photos
    pub images: storage::ImageStore,
    /// Static assets directory served at /assets
    pub assets_dir: PathBuf,
}

impl AppState {
    pub fn new(db: SqlitePool, images_dir: PathBuf, assets_dir: PathBuf) -> Self {
        Self {
            db,
            images: storage::ImageStore::new(images_dir),
            assets_dir,
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    // Stored images and static assets are served read-only from the
    // root folder at fixed URL prefixes.
    let images_service = ServeDir::new(state.images.dir());
    let assets_service = ServeDir::new(&state.assets_dir);

    Router::new()
        // UI routes (HTML pages)
        .merge(api::ui_routes())
        // Ingest and export API routes
        .merge(api::detection_routes())
        .merge(api::site_routes())
        .merge(api::export_routes())
        .merge(api::health_routes())
        .nest_service("/images", images_service)
        .nest_service("/assets", assets_service)
        .with_state(state)
}
