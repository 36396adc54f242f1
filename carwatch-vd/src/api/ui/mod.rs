//! UI Routes - HTML pages for the carwatch-vd web interface
//!
//! # Structure
//! This module contains all HTML page handlers:
//!
//! - **Static Assets** (`static_assets`): shared stylesheet serving
//! - **Index** (`index`): landing page
//! - **Create Site** (`create_site`): site registration form
//! - **Sites Table** (`sites_table`): all registered sites
//! - **Site Page** (`site_page`): one site plus its detections
//! - **Cars Table** (`cars_table`): all detections
//! - **Profile** (`profile`): per-plate detection history

use crate::AppState;
use axum::{routing::get, Router};

// Module declarations
mod cars_table;
mod create_site;
mod index;
mod profile;
mod site_page;
mod sites_table;
mod static_assets;

// Re-export handler functions for router assembly
use cars_table::cars_table_page;
use create_site::create_site_page;
use index::index_page;
use profile::profile_page;
use site_page::site_page;
use sites_table::sites_table_page;
use static_assets::serve_carwatch_css;

/// Build UI routes
pub fn ui_routes() -> Router<AppState> {
    Router::new()
        // Page routes
        .route("/", get(index_page))
        .route("/create_site", get(create_site_page))
        .route("/get_sites", get(sites_table_page))
        .route("/get_site/:site_id", get(site_page))
        .route("/car_details_table", get(cars_table_page))
        .route("/car_detections/:license_plate_number", get(profile_page))
        // Static assets
        .route("/static/carwatch.css", get(serve_carwatch_css))
}

/// Escape a value for interpolation into HTML text or attributes
pub(crate) fn html_escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
