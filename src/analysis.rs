use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use crate::report::ReportData;
use crate::scoring::PredictResponse;
use crate::transaction::{method_label, Transaction, TransactionForm};
use crate::view::ResultView;

/// One completed check: what the user entered and what the scorer said.
#[derive(Clone, Debug, Serialize)]
pub struct Analysis {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub form: TransactionForm,
    pub transaction: Transaction,
    pub response: PredictResponse,
}

impl Analysis {
    pub fn new(form: TransactionForm, transaction: Transaction, response: PredictResponse) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            form,
            transaction,
            response,
        }
    }

    /// Report fields, taken from the values as entered and the texts as displayed.
    pub fn report_data(&self, view: &ResultView) -> ReportData {
        ReportData {
            timestamp: self.created_at,
            amount: self.form.amount.trim().to_string(),
            distance: self.form.distance.trim().to_string(),
            method: method_label(self.form.transaction_type.as_deref()).to_string(),
            result: view.title.to_string(),
            confidence: view.confidence.text.clone(),
            fraud_risk: view.fraud.text.clone(),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, PartialEq, Eq)]
pub struct AnalysisStats {
    pub total: u64,
    pub flagged: u64,
    pub cleared: u64,
}

/// In-memory only; entries age out via [`AnalysisStore::cleanup`].
#[derive(Clone, Default)]
pub struct AnalysisStore {
    entries: Arc<DashMap<Uuid, Analysis>>,
}

impl AnalysisStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, analysis: Analysis) {
        self.entries.insert(analysis.id, analysis);
    }

    pub fn get(&self, id: &Uuid) -> Option<Analysis> {
        self.entries.get(id).map(|entry| entry.value().clone())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn cleanup(&self, max_age: std::time::Duration) {
        let max_age = match chrono::Duration::from_std(max_age) {
            Ok(d) => d,
            Err(e) => {
                warn!("[fraudshield] Analysis TTL out of range, skipping eviction: {}", e);
                return;
            }
        };
        let cutoff = Utc::now() - max_age;
        let before = self.len();
        self.entries.retain(|_, analysis| analysis.created_at > cutoff);
        let removed = before.saturating_sub(self.len());
        if removed > 0 {
            info!("[fraudshield] Evicted {} analyses", removed);
        }
    }

    pub fn stats(&self) -> AnalysisStats {
        let mut stats = AnalysisStats::default();
        for entry in self.entries.iter() {
            stats.total += 1;
            if entry.response.is_fraud {
                stats.flagged += 1;
            } else {
                stats.cleared += 1;
            }
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transaction::TransactionType;
    use std::time::Duration;

    fn analysis(is_fraud: bool) -> Analysis {
        let form = TransactionForm {
            amount: " 89.99".to_string(),
            distance: "4".to_string(),
            transaction_type: Some("0".to_string()),
        };
        let transaction = Transaction {
            amount: 89.99,
            distance: 4.0,
            transaction_type: TransactionType::Online,
        };
        let response = PredictResponse {
            is_fraud,
            confidence: 88.0,
            fraud_probability: if is_fraud { 88.0 } else { 12.0 },
            legitimate_probability: if is_fraud { 12.0 } else { 88.0 },
            prediction: None,
        };
        Analysis::new(form, transaction, response)
    }

    #[test]
    fn insert_then_get() {
        let store = AnalysisStore::new();
        let a = analysis(false);
        let id = a.id;
        store.insert(a);
        assert_eq!(store.get(&id).map(|a| a.id), Some(id));
        assert!(store.get(&Uuid::new_v4()).is_none());
    }

    #[test]
    fn stats_split_by_verdict() {
        let store = AnalysisStore::new();
        store.insert(analysis(true));
        store.insert(analysis(false));
        store.insert(analysis(false));
        assert_eq!(
            store.stats(),
            AnalysisStats {
                total: 3,
                flagged: 1,
                cleared: 2
            }
        );
    }

    #[test]
    fn cleanup_drops_only_old_entries() {
        let store = AnalysisStore::new();
        let mut old = analysis(true);
        old.created_at = Utc::now() - chrono::Duration::hours(2);
        let old_id = old.id;
        let fresh = analysis(false);
        let fresh_id = fresh.id;
        store.insert(old);
        store.insert(fresh);

        store.cleanup(Duration::from_secs(3600));

        assert!(store.get(&old_id).is_none());
        assert!(store.get(&fresh_id).is_some());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn report_data_uses_entered_and_displayed_values() {
        let a = analysis(false);
        let view = ResultView::from_response(&a.response);
        let data = a.report_data(&view);
        assert_eq!(data.amount, "89.99");
        assert_eq!(data.distance, "4");
        assert_eq!(data.method, "Online Purchase");
        assert_eq!(data.result, "Transaction Appears Safe");
        assert_eq!(data.confidence, "88.0%");
        assert_eq!(data.fraud_risk, "12.0%");
    }
}
