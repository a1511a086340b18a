use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::warn;
use uuid::Uuid;

use super::analyze::{run_analysis, AnalyzeError, ErrorResponse};
use crate::state::AppState;
use crate::transaction::TransactionForm;
use crate::view::ResultView;

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub amount: Option<f64>,
    #[serde(default)]
    pub distance: Option<f64>,
    #[serde(default)]
    pub transaction_type: Option<i64>,
}

impl From<AnalyzeRequest> for TransactionForm {
    fn from(req: AnalyzeRequest) -> Self {
        Self {
            amount: req.amount.map(|a| a.to_string()).unwrap_or_default(),
            distance: req.distance.map(|d| d.to_string()).unwrap_or_default(),
            transaction_type: req.transaction_type.map(|t| t.to_string()),
        }
    }
}

#[derive(Serialize)]
pub struct AnalyzeResponse {
    pub analysis_id: Uuid,
    pub report_url: String,
    pub result: ResultView,
}

const REQUEST_SHAPE: &str =
    "Provide {\"amount\": >0 and <=1000000, \"distance\": >=0, \"transaction_type\": 0|1|2}";

/// POST /api/analyze
pub async fn analyze(
    State(state): State<AppState>,
    payload: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, (StatusCode, Json<ErrorResponse>)> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("[fraudshield] Rejected API body: {}", rejection.body_text());
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: format!("Invalid request body: {}", rejection.body_text()),
                hint: Some(REQUEST_SHAPE.to_string()),
            }),
        )
    })?;

    let analysis = run_analysis(&state, request.into()).await.map_err(|e| {
        let hint = match &e {
            AnalyzeError::Invalid(_) => Some(REQUEST_SHAPE.to_string()),
            AnalyzeError::Scoring(_) => Some("Check GET /health for scorer status".to_string()),
        };
        (
            e.status(),
            Json(ErrorResponse {
                error: e.to_string(),
                hint,
            }),
        )
    })?;

    Ok(Json(AnalyzeResponse {
        report_url: state.report_url(&analysis.id),
        analysis_id: analysis.id,
        result: ResultView::from_response(&analysis.response),
    }))
}
