use axum::response::Html;

const INDEX_HTML: &str = include_str!("../../assets/index.html");

/// Static upload page
pub async fn home() -> Html<&'static str> {
    Html(INDEX_HTML)
}
