//! Detection ingestion API
//!
//! POST /save_car_details accepts one multipart submission per observed
//! vehicle: a binary image part plus six scalar metadata fields. All
//! validation completes before any write; the image write precedes the
//! row insert and is not rolled back if the insert fails.

use axum::{
    extract::{Multipart, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde_json::json;
use tracing::{info, warn};

use crate::db::detections::{save_detection, NewDetection};
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Build detection ingest routes
pub fn detection_routes() -> Router<AppState> {
    Router::new().route("/save_car_details", post(save_car_details))
}

/// Collected multipart parts before validation
#[derive(Default)]
struct DetectionForm {
    license_plate_number: Option<String>,
    car_type: Option<String>,
    car_make: Option<String>,
    car_color: Option<String>,
    time_of_detection: Option<String>,
    site: Option<String>,
    /// (original filename, image bytes)
    file: Option<(String, Vec<u8>)>,
}

/// POST /save_car_details
///
/// Persist one detection: image bytes into the content-addressed store,
/// one row into car_details referencing the stored path.
pub async fn save_car_details(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> ApiResult<Response> {
    let mut form = DetectionForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Malformed multipart request: {}", e)))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let original_filename = field.file_name().unwrap_or("").to_string();
                let bytes = field.bytes().await.map_err(|e| {
                    ApiError::BadRequest(format!("Failed to read file part: {}", e))
                })?;
                form.file = Some((original_filename, bytes.to_vec()));
            }
            "license_plate_number" => form.license_plate_number = Some(field_text(field).await?),
            "car_type" => form.car_type = Some(field_text(field).await?),
            "car_make" => form.car_make = Some(field_text(field).await?),
            "car_color" => form.car_color = Some(field_text(field).await?),
            "time_of_detection" => form.time_of_detection = Some(field_text(field).await?),
            "site" => form.site = Some(field_text(field).await?),
            // Unknown parts are ignored
            _ => {}
        }
    }

    // All six fields required and non-empty; rejected before any write
    let license_plate_number = require_field(form.license_plate_number, "license_plate_number")?;
    let car_type = require_field(form.car_type, "car_type")?;
    let car_make = require_field(form.car_make, "car_make")?;
    let car_color = require_field(form.car_color, "car_color")?;
    let time_raw = require_field(form.time_of_detection, "time_of_detection")?;
    let site = require_field(form.site, "site")?;

    let time_of_detection = parse_detection_time(&time_raw).ok_or_else(|| {
        warn!(value = %time_raw, "Rejected unparseable detection time");
        ApiError::BadRequest(format!("Invalid time_of_detection: {:?}", time_raw))
    })?;

    let (original_filename, bytes) = form
        .file
        .ok_or_else(|| ApiError::BadRequest("Missing required field: file".to_string()))?;

    // Image write first, then the row insert. A failed insert leaves an
    // orphaned file behind; callers tolerate that.
    let stored = state.images.store(&original_filename, &bytes).await?;

    let detection = NewDetection {
        license_plate_number,
        car_type,
        car_make,
        car_color,
        time_of_detection,
        site,
        image_path: stored.url_path,
        original_filename,
    };
    let id = save_detection(&state.db, &detection).await?;

    info!(
        id,
        plate = %detection.license_plate_number,
        site = %detection.site,
        image = %detection.image_path,
        "Detection saved"
    );

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "Car details saved successfully" })),
    )
        .into_response())
}

async fn field_text(field: axum::extract::multipart::Field<'_>) -> ApiResult<String> {
    field
        .text()
        .await
        .map_err(|e| ApiError::BadRequest(format!("Failed to read form field: {}", e)))
}

fn require_field(value: Option<String>, name: &str) -> ApiResult<String> {
    match value {
        Some(v) if !v.is_empty() => Ok(v),
        _ => Err(ApiError::BadRequest(format!(
            "Missing required field: {}",
            name
        ))),
    }
}

/// Parse a caller-supplied detection time
///
/// Accepts RFC 3339 (offset honored) or a naive ISO-8601 timestamp
/// treated as UTC. The value is recorded as given; nothing checks it
/// against the server clock or insertion order.
pub fn parse_detection_time(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    None
}
