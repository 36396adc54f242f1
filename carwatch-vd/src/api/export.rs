//! Filtered CSV export
//!
//! POST /car_details/download_csv takes a JSON filter of four optional
//! equality fields and streams matching detections as a CSV attachment,
//! one record at a time, without buffering the full result set.

use async_stream::try_stream;
use axum::{
    body::Body,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    routing::post,
    Json, Router,
};
use futures::{Stream, TryStreamExt};
use sqlx::{Row, SqlitePool};
use tracing::debug;

use crate::db::detections::DetectionFilter;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// Export header row; the column order is part of the contract
pub const CSV_HEADER: [&str; 6] = [
    "License Plate",
    "Car Type",
    "Car Make",
    "Car Color",
    "Time of Detection",
    "Site",
];

/// Build CSV export routes
pub fn export_routes() -> Router<AppState> {
    Router::new().route("/car_details/download_csv", post(download_csv))
}

/// POST /car_details/download_csv
///
/// An empty filter exports every stored detection in storage order.
pub async fn download_csv(
    State(state): State<AppState>,
    Json(filter): Json<DetectionFilter>,
) -> ApiResult<Response> {
    let sql = filter.to_select_sql();
    let binds: Vec<String> = filter
        .terms()
        .into_iter()
        .map(|(_, value)| value.to_string())
        .collect();
    let pool = state.db.clone();

    debug!(terms = binds.len(), "Streaming CSV export");

    let headers = [
        (header::CONTENT_TYPE, "text/csv"),
        (
            header::CONTENT_DISPOSITION,
            "attachment; filename=\"filtered_data.csv\"",
        ),
    ];

    Ok((headers, Body::from_stream(csv_stream(pool, sql, binds))).into_response())
}

/// One CSV line per matching row, header first; rows are pulled from the
/// database as the body is consumed
fn csv_stream(
    pool: SqlitePool,
    sql: String,
    binds: Vec<String>,
) -> impl Stream<Item = Result<String, ApiError>> {
    try_stream! {
        yield csv_record(&CSV_HEADER)?;

        let mut query = sqlx::query(&sql);
        for value in &binds {
            query = query.bind(value.as_str());
        }

        let mut rows = query.fetch(&pool);
        while let Some(row) = rows.try_next().await? {
            let record: [String; 6] = [
                row.get("license_plate_number"),
                row.get("car_type"),
                row.get("car_make"),
                row.get("car_color"),
                row.get("time_of_detection"),
                row.get("site"),
            ];
            yield csv_record(&record)?;
        }
    }
}

/// Encode one CSV record, quoting and escaping as needed
fn csv_record<T: AsRef<[u8]>>(fields: &[T]) -> Result<String, ApiError> {
    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());
    writer
        .write_record(fields)
        .map_err(|e| ApiError::Internal(format!("CSV encoding failed: {}", e)))?;
    let bytes = writer
        .into_inner()
        .map_err(|e| ApiError::Internal(format!("CSV encoding failed: {}", e)))?;
    String::from_utf8(bytes).map_err(|e| ApiError::Internal(format!("CSV encoding failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_record_text() {
        let header = csv_record(&CSV_HEADER).unwrap();
        assert_eq!(
            header,
            "License Plate,Car Type,Car Make,Car Color,Time of Detection,Site\n"
        );
    }

    #[test]
    fn test_comma_in_value_is_quoted_not_split() {
        let record = csv_record(&["ABC123", "Sedan, long wheelbase"]).unwrap();
        assert_eq!(record, "ABC123,\"Sedan, long wheelbase\"\n");
    }

    #[test]
    fn test_embedded_quote_is_doubled() {
        let record = csv_record(&["he said \"go\""]).unwrap();
        assert_eq!(record, "\"he said \"\"go\"\"\"\n");
    }

    #[test]
    fn test_plain_values_unquoted() {
        let record = csv_record(&["ABC123", "Sedan", "Toyota"]).unwrap();
        assert_eq!(record, "ABC123,Sedan,Toyota\n");
    }
}
