use axum::extract::State;
use axum::Json;
use serde::Serialize;
use tracing::warn;

use crate::state::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub scoring_url: String,
    pub upstream_reachable: bool,
    pub model_loaded: bool,
}

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let (upstream_reachable, model_loaded) = match state.scoring.health().await {
        Ok(h) => (true, h.model_loaded),
        Err(e) => {
            warn!("[fraudshield] Scorer health check failed: {}", e);
            (false, false)
        }
    };
    Json(HealthResponse {
        status: "ok".to_string(),
        version: format!("fraudshield-v{}", env!("CARGO_PKG_VERSION")),
        scoring_url: state.scoring.base_url().to_string(),
        upstream_reachable,
        model_loaded,
    })
}
