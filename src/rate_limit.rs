//! Fixed-window request limiting for the submission routes.

use axum::extract::{Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::warn;

use crate::handlers::analyze::ErrorResponse;

struct Window {
    started: Instant,
    count: u32,
}

/// Allows `limit` requests per `period`; anything past that is refused
/// until the window rolls over.
#[derive(Clone)]
pub struct RateLimiter {
    window: Arc<Mutex<Window>>,
    limit: u32,
    period: Duration,
}

impl RateLimiter {
    pub fn new(limit: u32, period: Duration) -> Self {
        Self {
            window: Arc::new(Mutex::new(Window {
                started: Instant::now(),
                count: 0,
            })),
            limit,
            period,
        }
    }

    /// Counts one request. `Err` carries the seconds until the window resets.
    pub async fn check(&self) -> Result<(), u64> {
        let mut window = self.window.lock().await;
        let elapsed = window.started.elapsed();
        if elapsed >= self.period {
            window.started = Instant::now();
            window.count = 0;
        }
        if window.count >= self.limit {
            let remaining = self.period.saturating_sub(window.started.elapsed());
            return Err(remaining.as_secs().max(1));
        }
        window.count += 1;
        Ok(())
    }
}

pub async fn enforce(State(limiter): State<RateLimiter>, req: Request, next: Next) -> Response {
    match limiter.check().await {
        Ok(()) => next.run(req).await,
        Err(retry_after) => {
            warn!(
                "[fraudshield] Rate limit hit on {}, retry in {}s",
                req.uri().path(),
                retry_after
            );
            (
                StatusCode::TOO_MANY_REQUESTS,
                [(header::RETRY_AFTER, retry_after.to_string())],
                Json(ErrorResponse {
                    error: "Too many requests".to_string(),
                    hint: Some(format!("Try again in {}s", retry_after)),
                }),
            )
                .into_response()
        }
    }
}
