use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use uuid::Uuid;

use crate::report::{self, REPORT_FILENAME};
use crate::state::AppState;
use crate::view::ResultView;

pub async fn get_report(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let analysis = match Uuid::parse_str(&id).ok().and_then(|id| state.analyses.get(&id)) {
        Some(a) => a,
        None => {
            return (
                StatusCode::NOT_FOUND,
                Json(serde_json::json!({
                    "error": "Analysis not found",
                    "hint": "Reports expire; run the analysis again"
                })),
            )
                .into_response();
        }
    };

    let view = ResultView::from_response(&analysis.response);
    let body = report::render(&analysis.report_data(&view));
    let disposition = format!("attachment; filename=\"{}\"", REPORT_FILENAME);

    (
        [
            (header::CONTENT_TYPE, "text/plain; charset=utf-8".to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    )
        .into_response()
}
