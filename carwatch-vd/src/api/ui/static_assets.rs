//! Static asset handlers for the carwatch-vd UI
//!
//! Embeds and serves the shared stylesheet at compile time

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

const CARWATCH_CSS: &str = include_str!("../../../static/carwatch.css");

/// GET /static/carwatch.css
///
/// Serves the shared CARWATCH UI styles
pub async fn serve_carwatch_css() -> Response {
    (
        StatusCode::OK,
        [
            ("content-type", "text/css"),
            ("cache-control", "no-cache, no-store, must-revalidate"),
        ],
        CARWATCH_CSS,
    )
        .into_response()
}
