//! Index page handler - landing page

use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../../static/index.html");

/// GET /
///
/// Serves the static landing page
pub async fn index_page() -> Html<&'static str> {
    Html(INDEX_HTML)
}
