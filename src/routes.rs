use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use std::time::Duration;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::handlers;
use crate::rate_limit::{self, RateLimiter};
use crate::state::AppState;

/// Submissions allowed per route per minute. Each one costs a scorer call.
pub const SUBMISSIONS_PER_MINUTE: u32 = 30;

pub fn router(state: AppState) -> Router {
    let cors = if let Some(ref origins) = state.config.cors_origins {
        let origins: Vec<_> = origins
            .split(',')
            .filter_map(|s| s.trim().parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    };

    let form_limiter = RateLimiter::new(SUBMISSIONS_PER_MINUTE, Duration::from_secs(60));
    let api_limiter = RateLimiter::new(SUBMISSIONS_PER_MINUTE, Duration::from_secs(60));

    Router::new()
        .route("/", get(handlers::analyze::index))
        .route(
            "/analyze",
            post(handlers::analyze::analyze).layer(middleware::from_fn_with_state(
                form_limiter,
                rate_limit::enforce,
            )),
        )
        .route(
            "/api/analyze",
            post(handlers::api::analyze).layer(middleware::from_fn_with_state(
                api_limiter,
                rate_limit::enforce,
            )),
        )
        .route("/report/:id", get(handlers::report::get_report))
        .route("/health", get(handlers::health::health))
        .route("/metrics", get(handlers::metrics::metrics))
        .route("/docs", get(handlers::docs::docs_page))
        .route("/api", get(handlers::docs::docs_page))
        .route("/openapi.json", get(handlers::docs::openapi_spec))
        .layer(cors)
        .with_state(state)
}
