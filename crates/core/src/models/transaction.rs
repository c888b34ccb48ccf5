use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer};

use super::de;
use crate::errors::CoreError;

/// Income or expense. The sign of a transaction is implied by this kind;
/// amounts are stored non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    Income,
    Expense,
}

impl std::fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionKind::Income => write!(f, "income"),
            TransactionKind::Expense => write!(f, "expense"),
        }
    }
}

/// A single money movement, attached to a hustle or general.
///
/// Decoded leniently: fields the backend omits or mangles become `None`
/// rather than failing the record. The aggregation engine treats a missing
/// amount as zero and skips undated records in time-bucketed views.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    #[serde(default)]
    pub id: Option<i64>,

    #[serde(default, rename = "type", deserialize_with = "kind_lenient")]
    pub kind: Option<TransactionKind>,

    #[serde(default, deserialize_with = "de::opt_amount")]
    pub amount: Option<f64>,

    #[serde(default)]
    pub description: String,

    #[serde(default)]
    pub category: Option<String>,

    #[serde(default)]
    pub notes: Option<String>,

    #[serde(default, deserialize_with = "de::tags")]
    pub tags: Vec<String>,

    /// Transaction date. Some backend revisions emit `created_at`
    /// timestamps instead of a `date` field; both are accepted.
    #[serde(default, alias = "created_at", deserialize_with = "de::opt_date")]
    pub date: Option<NaiveDate>,

    /// Owning hustle; `None` means the transaction is "General".
    #[serde(default)]
    pub hustle_id: Option<i64>,
}

impl Transaction {
    pub fn new(kind: TransactionKind, amount: f64, description: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            id: None,
            kind: Some(kind),
            amount: Some(amount),
            description: description.into(),
            category: None,
            notes: None,
            tags: Vec::new(),
            date: Some(date),
            hustle_id: None,
        }
    }

    pub fn income(amount: f64, description: impl Into<String>, date: NaiveDate) -> Self {
        Self::new(TransactionKind::Income, amount, description, date)
    }

    pub fn expense(amount: f64, description: impl Into<String>, date: NaiveDate) -> Self {
        Self::new(TransactionKind::Expense, amount, description, date)
    }

    /// Attach the transaction to a hustle.
    #[must_use]
    pub fn with_hustle(mut self, hustle_id: i64) -> Self {
        self.hustle_id = Some(hustle_id);
        self
    }
}

fn kind_lenient<'de, D>(deserializer: D) -> Result<Option<TransactionKind>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::String(s)) => match s.trim().to_lowercase().as_str() {
            "income" => Some(TransactionKind::Income),
            "expense" => Some(TransactionKind::Expense),
            _ => None,
        },
        _ => None,
    })
}

/// Body for `POST /transactions` and `PUT /transactions/{id}`.
///
/// Tags travel comma-joined on the wire.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionDraft {
    #[serde(rename = "type")]
    pub kind: TransactionKind,

    pub amount: f64,

    pub description: String,

    pub date: NaiveDate,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    #[serde(
        serialize_with = "join_tags",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub tags: Vec<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hustle_id: Option<i64>,
}

impl TransactionDraft {
    pub fn new(kind: TransactionKind, amount: f64, description: impl Into<String>, date: NaiveDate) -> Self {
        Self {
            kind,
            amount,
            description: description.into(),
            date,
            category: None,
            notes: None,
            tags: Vec::new(),
            hustle_id: None,
        }
    }

    /// Checks applied before any network call. Amounts are non-negative by
    /// construction; sign is carried by the kind, never by the number.
    pub fn validate(&self) -> Result<(), CoreError> {
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(CoreError::Validation(
                "Amount must be a non-negative number".into(),
            ));
        }
        if self.description.trim().is_empty() {
            return Err(CoreError::Validation("Description is required".into()));
        }
        Ok(())
    }
}

fn join_tags<S>(tags: &[String], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&tags.join(","))
}
