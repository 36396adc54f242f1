//! Profile page handler - per-plate detection history
//!
//! Exact, case-sensitive plate match; rows ascend by detection time. An
//! unknown plate renders an empty history, not an error.

use axum::{
    extract::{Path, State},
    response::Html,
};

use super::html_escape;
use crate::db::detections::detections_for_plate;
use crate::error::ApiResult;
use crate::AppState;

/// GET /car_detections/:license_plate_number
pub async fn profile_page(
    State(state): State<AppState>,
    Path(license_plate_number): Path<String>,
) -> ApiResult<Html<String>> {
    let detections = detections_for_plate(&state.db, &license_plate_number).await?;

    let mut rows = String::new();
    for detection in &detections {
        rows.push_str(&format!(
            r#"            <tr>
                <td>{car_type}</td>
                <td>{make}</td>
                <td>{color}</td>
                <td>{time}</td>
                <td>{site}</td>
                <td><a href="{image}"><img src="{image}" alt="{filename}" class="thumb"></a></td>
            </tr>
"#,
            car_type = html_escape(&detection.car_type),
            make = html_escape(&detection.car_make),
            color = html_escape(&detection.car_color),
            time = detection.time_of_detection.format("%Y-%m-%d %H:%M:%S"),
            site = html_escape(&detection.site),
            image = html_escape(&detection.image_path),
            filename = html_escape(&detection.original_filename),
        ));
    }

    let html = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>CARWATCH - {plate}</title>
    <link rel="stylesheet" href="/static/carwatch.css">
</head>
<body>
    <header>
        <h1>Detection history: {plate}</h1>
        <p class="subtitle">{count} detection(s), oldest first</p>
    </header>
    <main>
        <table>
            <thead>
                <tr><th>Type</th><th>Make</th><th>Color</th><th>Detected At</th><th>Site</th><th>Image</th></tr>
            </thead>
            <tbody>
{rows}            </tbody>
        </table>
        <p><a class="button" href="/car_details_table">All detections</a>
           <a class="button" href="/">Home</a></p>
    </main>
</body>
</html>
"#,
        plate = html_escape(&license_plate_number),
        count = detections.len(),
        rows = rows,
    );

    Ok(Html(html))
}
