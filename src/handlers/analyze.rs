use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::Form;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use crate::analysis::Analysis;
use crate::scoring::ScoringError;
use crate::state::AppState;
use crate::templates::page::{self, PageModel};
use crate::transaction::{TransactionForm, ValidationError};
use crate::view::{ErrorView, Panel, ResultView};

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    #[error(transparent)]
    Scoring(#[from] ScoringError),
}

impl AnalyzeError {
    pub fn status(&self) -> StatusCode {
        match self {
            AnalyzeError::Invalid(_) => StatusCode::BAD_REQUEST,
            AnalyzeError::Scoring(_) => StatusCode::BAD_GATEWAY,
        }
    }

    pub fn view(&self) -> ErrorView {
        match self {
            AnalyzeError::Invalid(e) => ErrorView::from(e),
            AnalyzeError::Scoring(e) => ErrorView::from(e),
        }
    }
}

/// Validate, score, and remember one submission.
pub async fn run_analysis(
    state: &AppState,
    form: TransactionForm,
) -> Result<Analysis, AnalyzeError> {
    let transaction = form.validate()?;
    let response = state.scoring.predict(&transaction).await?;

    if !state.config.result_delay.is_zero() {
        tokio::time::sleep(state.config.result_delay).await;
    }

    let analysis = Analysis::new(form, transaction, response);
    info!(
        "[fraudshield] Analysis {} scored: fraud={} confidence={:.1}",
        analysis.id, analysis.response.is_fraud, analysis.response.confidence
    );
    state.analyses.insert(analysis.clone());
    Ok(analysis)
}

/// POST /analyze
///
/// Form submission from the page. Always answers with the page, carrying
/// either the result panel or the error panel.
pub async fn analyze(
    State(state): State<AppState>,
    Form(form): Form<TransactionForm>,
) -> (StatusCode, Html<String>) {
    match run_analysis(&state, form.clone()).await {
        Ok(analysis) => {
            let panel = Panel::Result(ResultView::from_response(&analysis.response));
            let report_url = state.report_url(&analysis.id);
            let html = page::render(&PageModel {
                form: &analysis.form,
                panel: &panel,
                report_url: Some(&report_url),
            });
            (StatusCode::OK, Html(html))
        }
        Err(e) => {
            let panel = Panel::Error(e.view());
            let html = page::render(&PageModel {
                form: &form,
                panel: &panel,
                report_url: None,
            });
            (e.status(), Html(html))
        }
    }
}

/// GET /
pub async fn index() -> Html<String> {
    let form = TransactionForm::default();
    Html(page::render(&PageModel {
        form: &form,
        panel: &Panel::Empty,
        report_url: None,
    }))
}
