use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::{error, warn};

use crate::transaction::Transaction;

const GENERIC_REJECTION: &str = "An error occurred. Please try again.";

/// Body of `POST /predict`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PredictRequest {
    pub amount: f64,
    pub distance: f64,
    pub transaction_type: u8,
}

impl From<&Transaction> for PredictRequest {
    fn from(tx: &Transaction) -> Self {
        Self {
            amount: tx.amount,
            distance: tx.distance,
            transaction_type: tx.transaction_type.wire(),
        }
    }
}

/// Scoring result. Probabilities and confidence are percentages.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PredictResponse {
    pub is_fraud: bool,
    pub confidence: f64,
    pub fraud_probability: f64,
    pub legitimate_probability: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prediction: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct UpstreamHealth {
    pub status: String,
    #[serde(default)]
    pub model_loaded: bool,
}

#[derive(Deserialize)]
struct UpstreamError {
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Error)]
pub enum ScoringError {
    /// The scorer answered with a non-success status.
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("Unable to connect to the scoring service. Please make sure it is running.")]
    Unreachable(#[source] reqwest::Error),

    #[error("The scoring service returned an unexpected response.")]
    Malformed(String),
}

#[derive(Clone)]
pub struct ScoringClient {
    http: reqwest::Client,
    base_url: String,
}

impl ScoringClient {
    pub fn new(base_url: &str, timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn predict(&self, tx: &Transaction) -> Result<PredictResponse, ScoringError> {
        let url = format!("{}/predict", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(&PredictRequest::from(tx))
            .send()
            .await
            .map_err(|e| {
                error!("[fraudshield] Scoring request to {} failed: {}", url, e);
                ScoringError::Unreachable(e)
            })?;

        let status = response.status();
        let body = response.bytes().await.map_err(ScoringError::Unreachable)?;

        if !status.is_success() {
            let message = serde_json::from_slice::<UpstreamError>(&body)
                .ok()
                .and_then(|e| e.error)
                .unwrap_or_else(|| GENERIC_REJECTION.to_string());
            warn!("[fraudshield] Scorer rejected request ({}): {}", status, message);
            return Err(ScoringError::Rejected {
                status: status.as_u16(),
                message,
            });
        }

        serde_json::from_slice(&body).map_err(|e| {
            warn!("[fraudshield] Scorer response did not parse: {}", e);
            ScoringError::Malformed(e.to_string())
        })
    }

    pub async fn health(&self) -> Result<UpstreamHealth, ScoringError> {
        let url = format!("{}/health", self.base_url);
        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(ScoringError::Unreachable)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScoringError::Rejected {
                status: status.as_u16(),
                message: GENERIC_REJECTION.to_string(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| ScoringError::Malformed(e.to_string()))
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::TransactionType;
    use axum::http::StatusCode;

    fn tx() -> Transaction {
        Transaction {
            amount: 420.0,
            distance: 310.5,
            transaction_type: TransactionType::Atm,
        }
    }

    fn client(url: &str) -> ScoringClient {
        ScoringClient::new(url, Duration::from_secs(5)).unwrap()
    }

    #[test]
    fn request_body_has_exact_wire_shape() {
        let body = serde_json::to_value(PredictRequest::from(&tx())).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"amount": 420.0, "distance": 310.5, "transaction_type": 2})
        );
    }

    #[test]
    fn response_parses_without_prediction_label() {
        let parsed: PredictResponse = serde_json::from_str(
            r#"{"is_fraud":false,"confidence":70.0,"fraud_probability":30.0,"legitimate_probability":70.0}"#,
        )
        .unwrap();
        assert!(!parsed.is_fraud);
        assert_eq!(parsed.prediction, None);
    }

    #[tokio::test]
    async fn predict_posts_transaction_and_parses_result() {
        let (url, seen) = stub::spawn(StatusCode::OK, stub::fraud_body()).await;
        let result = client(&url).predict(&tx()).await.unwrap();

        assert!(result.is_fraud);
        assert_eq!(result.fraud_probability, 87.25);
        let requests = seen.0.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0]["transaction_type"], 2);
    }

    #[tokio::test]
    async fn rejection_carries_upstream_error_message() {
        let (url, _) = stub::spawn(
            StatusCode::BAD_REQUEST,
            serde_json::json!({"error": "Amount must be positive"}),
        )
        .await;
        let err = client(&url).predict(&tx()).await.unwrap_err();
        match err {
            ScoringError::Rejected { status, message } => {
                assert_eq!(status, 400);
                assert_eq!(message, "Amount must be positive");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn rejection_without_message_uses_generic_text() {
        let (url, _) = stub::spawn(StatusCode::INTERNAL_SERVER_ERROR, serde_json::json!({})).await;
        let err = client(&url).predict(&tx()).await.unwrap_err();
        assert_eq!(err.to_string(), GENERIC_REJECTION);
    }

    #[tokio::test]
    async fn wrong_shape_is_malformed() {
        let (url, _) = stub::spawn(StatusCode::OK, serde_json::json!({"score": 0.3})).await;
        let err = client(&url).predict(&tx()).await.unwrap_err();
        assert!(matches!(err, ScoringError::Malformed(_)));
    }

    #[tokio::test]
    async fn dead_scorer_is_unreachable() {
        let url = stub::dead_url().await;
        let err = client(&url).predict(&tx()).await.unwrap_err();
        assert!(matches!(err, ScoringError::Unreachable(_)));
        assert!(err.to_string().starts_with("Unable to connect"));
    }

    #[tokio::test]
    async fn health_reads_model_state() {
        let (url, _) = stub::spawn(StatusCode::OK, stub::safe_body()).await;
        let health = client(&url).health().await.unwrap();
        assert_eq!(health.status, "healthy");
        assert!(health.model_loaded);
    }
}
