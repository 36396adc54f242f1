//! Sites table page handler - all registered sites

use axum::{extract::State, response::Html};

use super::html_escape;
use crate::db::sites::list_sites;
use crate::error::ApiResult;
use crate::AppState;

/// GET /get_sites
///
/// Renders every registered site in insertion order. The city column is
/// rendered from the city field; the original implementation displayed
/// the site name there instead.
pub async fn sites_table_page(State(state): State<AppState>) -> ApiResult<Html<String>> {
    let sites = list_sites(&state.db).await?;

    let mut rows = String::new();
    for site in &sites {
        rows.push_str(&format!(
            r#"            <tr>
                <td><a href="/get_site/{id}">{name}</a></td>
                <td>{city}</td>
                <td>{st}</td>
            </tr>
"#,
            id = site.id,
            name = html_escape(&site.name),
            city = html_escape(&site.city),
            st = html_escape(&site.state),
        ));
    }

    let html = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>CARWATCH - Sites</title>
    <link rel="stylesheet" href="/static/carwatch.css">
</head>
<body>
    <header>
        <h1>Sites</h1>
        <p class="subtitle">{count} registered site(s)</p>
    </header>
    <main>
        <table>
            <thead>
                <tr><th>Name</th><th>City</th><th>State</th></tr>
            </thead>
            <tbody>
{rows}            </tbody>
        </table>
        <p><a class="button" href="/create_site">Register a site</a>
           <a class="button" href="/">Home</a></p>
    </main>
</body>
</html>
"#,
        count = sites.len(),
        rows = rows,
    );

    Ok(Html(html))
}
