use axum::extract::State;
use axum::Json;

use crate::analysis::AnalysisStats;
use crate::state::AppState;

pub async fn metrics(State(state): State<AppState>) -> Json<AnalysisStats> {
    Json(state.analyses.stats())
}
