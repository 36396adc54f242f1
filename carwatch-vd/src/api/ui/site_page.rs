//! Site page handler - one site plus its detections
//!
//! The join from site to detections is by site *name* at query time; a
//! detection recorded before its site was registered still appears.

use axum::{
    extract::{Path, State},
    response::Html,
};

use super::html_escape;
use crate::db::detections::detections_for_site;
use crate::db::sites::get_site;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

/// GET /get_site/:site_id
///
/// Renders the site and every detection whose site field equals this
/// site's name. Unknown ids get a clean 404.
pub async fn site_page(
    State(state): State<AppState>,
    Path(site_id): Path<i64>,
) -> ApiResult<Html<String>> {
    let site = get_site(&state.db, site_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("No site with id {}", site_id)))?;

    let detections = detections_for_site(&state.db, &site.name).await?;

    let mut rows = String::new();
    for detection in &detections {
        rows.push_str(&format!(
            r#"            <tr>
                <td>{plate}</td>
                <td>{car_type}</td>
                <td>{make}</td>
                <td>{color}</td>
                <td>{time}</td>
                <td><a href="{image}"><img src="{image}" alt="{filename}" class="thumb"></a></td>
            </tr>
"#,
            plate = html_escape(&detection.license_plate_number),
            car_type = html_escape(&detection.car_type),
            make = html_escape(&detection.car_make),
            color = html_escape(&detection.car_color),
            time = detection.time_of_detection.format("%Y-%m-%d %H:%M:%S"),
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
    <title>CARWATCH - {name}</title>
    <link rel="stylesheet" href="/static/carwatch.css">
</head>
<body>
    <header>
        <h1>{name}</h1>
        <p class="subtitle">{city}, {st} &mdash; {count} detection(s)</p>
    </header>
    <main>
        <table>
            <thead>
                <tr><th>License Plate</th><th>Type</th><th>Make</th><th>Color</th><th>Detected At</th><th>Image</th></tr>
            </thead>
            <tbody>
{rows}            </tbody>
        </table>
        <p><a class="button" href="/get_sites">All sites</a>
           <a class="button" href="/">Home</a></p>
    </main>
</body>
</html>
"#,
        name = html_escape(&site.name),
        city = html_escape(&site.city),
        st = html_escape(&site.state),
        count = detections.len(),
        rows = rows,
    );

    Ok(Html(html))
}
