use axum::http::header;
use axum::response::{Html, IntoResponse, Response};

use crate::templates;

pub async fn openapi_spec() -> Response {
    let spec = include_str!("../openapi_spec.json");
    ([(header::CONTENT_TYPE, "application/json")], spec).into_response()
}

/// GET /docs and GET /api
pub async fn docs_page() -> Html<String> {
    Html(templates::docs::render())
}
