mod analysis;
mod config;
mod handlers;
mod rate_limit;
mod report;
mod routes;
mod scoring;
mod state;
mod templates;
mod transaction;
mod view;

use std::time::Duration;
use tracing::info;

use crate::config::Config;
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env();
    info!("[fraudshield] Starting fraudshield frontend");
    info!("[fraudshield] Scoring service: {}", config.scoring_url);
    info!("[fraudshield] Base URL: {}", config.base_url);
    info!(
        "[fraudshield] Result delay: {}ms, report TTL: {}s",
        config.result_delay.as_millis(),
        config.analysis_ttl.as_secs()
    );

    let state = AppState::new(config.clone())?;

    match state.scoring.health().await {
        Ok(h) if h.model_loaded => info!("[fraudshield] Scoring service is up, model loaded"),
        Ok(_) => tracing::warn!("[fraudshield] Scoring service is up but reports no model loaded"),
        Err(e) => tracing::warn!("[fraudshield] Scoring service not reachable yet: {}", e),
    }

    // Reports are only downloadable while their analysis is still held.
    let analyses = state.analyses.clone();
    let ttl = config.analysis_ttl;
    tokio::spawn(async move {
        let period = Duration::from_secs(600).min(ttl).max(Duration::from_secs(1));
        let mut interval = tokio::time::interval(period);
        loop {
            interval.tick().await;
            analyses.cleanup(ttl);
        }
    });

    let app = routes::router(state);

    let addr = format!("0.0.0.0:{}", config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("[fraudshield] Listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
