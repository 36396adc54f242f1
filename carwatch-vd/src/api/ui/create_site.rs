//! Create-site page handler - site registration form

use axum::response::Html;

const CREATE_SITE_HTML: &str = include_str!("../../../static/create_site.html");

/// GET /create_site
///
/// Serves the site registration form page; the form posts JSON to
/// /save_site_details
pub async fn create_site_page() -> Html<&'static str> {
    Html(CREATE_SITE_HTML)
}
