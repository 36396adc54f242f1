//! Site registration API
//!
//! POST /save_site_details creates a site from a JSON body. Site names
//! are deliberately not unique; a later duplicate makes the name-based
//! soft reference from detections ambiguous.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use tracing::info;

use crate::db::sites::{save_site, NewSite};
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Build site registration routes
pub fn site_routes() -> Router<AppState> {
    Router::new().route("/save_site_details", post(save_site_details))
}

/// POST /save_site_details request
#[derive(Debug, Deserialize)]
pub struct SaveSiteRequest {
    pub name: String,
    pub city: String,
    pub state: String,
}

/// POST /save_site_details
pub async fn save_site_details(
    State(state): State<AppState>,
    Json(request): Json<SaveSiteRequest>,
) -> ApiResult<Response> {
    for (value, name) in [
        (&request.name, "name"),
        (&request.city, "city"),
        (&request.state, "state"),
    ] {
        if value.is_empty() {
            return Err(ApiError::BadRequest(format!(
                "Missing required field: {}",
                name
            )));
        }
    }

    let site = NewSite {
        name: request.name,
        city: request.city,
        state: request.state,
    };
    let id = save_site(&state.db, &site).await?;

    info!(id, name = %site.name, city = %site.city, state = %site.state, "Site saved");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "site details saved successfully" })),
    )
        .into_response())
}
