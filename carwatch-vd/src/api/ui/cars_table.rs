//! Cars table page handler - all detections
//!
//! Unfiltered, unpaginated, in storage order; the documented baseline
//! contract at small scale.

use axum::{extract::State, response::Html};

use super::html_escape;
use crate::db::detections::list_detections;
use crate::error::ApiResult;
use crate::AppState;

/// GET /car_details_table
pub async fn cars_table_page(State(state): State<AppState>) -> ApiResult<Html<String>> {
    let detections = list_detections(&state.db).await?;

    let mut rows = String::new();
    for detection in &detections {
        rows.push_str(&format!(
            r#"            <tr>
                <td><a href="/car_detections/{plate}">{plate}</a></td>
                <td>{car_type}</td>
                <td>{make}</td>
                <td>{color}</td>
                <td>{time}</td>
                <td>{site}</td>
                <td><a href="{image}"><img src="{image}" alt="{filename}" class="thumb"></a></td>
            </tr>
"#,
            plate = html_escape(&detection.license_plate_number),
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
    <title>CARWATCH - Detections</title>
    <link rel="stylesheet" href="/static/carwatch.css">
</head>
<body>
    <header>
        <h1>Detections</h1>
        <p class="subtitle">{count} recorded detection(s)</p>
    </header>
    <main>
        <table>
            <thead>
                <tr><th>License Plate</th><th>Type</th><th>Make</th><th>Color</th><th>Detected At</th><th>Site</th><th>Image</th></tr>
            </thead>
            <tbody>
{rows}            </tbody>
        </table>
        <p><a class="button" href="/">Home</a></p>
    </main>
</body>
</html>
"#,
        count = detections.len(),
        rows = rows,
    );

    Ok(Html(html))
}
