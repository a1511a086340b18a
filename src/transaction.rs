use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Largest amount the form accepts before asking the user to double-check.
pub const MAX_AMOUNT: f64 = 1_000_000.0;

/// Distance at which the distance indicator bar is full.
pub const DISTANCE_FULL_SCALE_KM: f64 = 500.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    Online,
    InStore,
    Atm,
}

impl TransactionType {
    pub const ALL: [TransactionType; 3] = [Self::Online, Self::InStore, Self::Atm];

    pub fn from_wire(value: i64) -> Option<Self> {
        match value {
            0 => Some(Self::Online),
            1 => Some(Self::InStore),
            2 => Some(Self::Atm),
            _ => None,
        }
    }

    /// Integer code the scoring service expects.
    pub fn wire(self) -> u8 {
        match self {
            Self::Online => 0,
            Self::InStore => 1,
            Self::Atm => 2,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Online => "Online Purchase",
            Self::InStore => "In-Store Purchase",
            Self::Atm => "ATM Withdrawal",
        }
    }
}

/// Label for a raw method value, "Unknown" when it names no method.
pub fn method_label(raw: Option<&str>) -> &'static str {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .and_then(TransactionType::from_wire)
        .map(TransactionType::label)
        .unwrap_or("Unknown")
}

#[derive(Clone, Debug, PartialEq, Error)]
pub enum ValidationError {
    #[error("Please enter a valid transaction amount (greater than $0)")]
    InvalidAmount,

    #[error("Transaction amount seems unusually high. Please verify.")]
    AmountTooHigh,

    #[error("Please enter a valid distance (0 or greater)")]
    InvalidDistance,

    #[error("Please select a transaction method")]
    MissingMethod,
}

/// Form fields exactly as the browser submitted them.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TransactionForm {
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub distance: String,
    #[serde(default)]
    pub transaction_type: Option<String>,
}

impl TransactionForm {
    pub fn validate(&self) -> Result<Transaction, ValidationError> {
        let method = self
            .transaction_type
            .as_deref()
            .and_then(|s| s.trim().parse::<i64>().ok());
        Transaction::check(parse_number(&self.amount), parse_number(&self.distance), method)
    }

    /// The selected method, if the raw value names one.
    pub fn selected_method(&self) -> Option<TransactionType> {
        self.transaction_type
            .as_deref()
            .and_then(|s| s.trim().parse::<i64>().ok())
            .and_then(TransactionType::from_wire)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Transaction {
    pub amount: f64,
    pub distance: f64,
    pub transaction_type: TransactionType,
}

impl Transaction {
    /// Applies the form rules in order, stopping at the first one that fails.
    pub fn check(
        amount: Option<f64>,
        distance: Option<f64>,
        method: Option<i64>,
    ) -> Result<Self, ValidationError> {
        let amount = match amount {
            Some(a) if a > 0.0 => a,
            _ => return Err(ValidationError::InvalidAmount),
        };
        if amount > MAX_AMOUNT {
            return Err(ValidationError::AmountTooHigh);
        }

        let distance = match distance {
            Some(d) if d >= 0.0 => d,
            _ => return Err(ValidationError::InvalidDistance),
        };

        let transaction_type = method
            .and_then(TransactionType::from_wire)
            .ok_or(ValidationError::MissingMethod)?;

        Ok(Self {
            amount,
            distance,
            transaction_type,
        })
    }
}

fn parse_number(raw: &str) -> Option<f64> {
    raw.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Width of the distance indicator bar, in percent.
pub fn distance_fill_percent(raw: &str) -> f64 {
    match parse_number(raw) {
        Some(d) if d > 0.0 => (d / DISTANCE_FULL_SCALE_KM * 100.0).min(100.0),
        _ => 0.0,
    }
}
