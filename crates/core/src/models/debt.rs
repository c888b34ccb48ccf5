use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::de;
use crate::errors::CoreError;

/// Repayment state of a tracked debt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtStatus {
    Pending,
    PartiallyPaid,
    Paid,
}

impl std::fmt::Display for DebtStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DebtStatus::Pending => write!(f, "pending"),
            DebtStatus::PartiallyPaid => write!(f, "partially_paid"),
            DebtStatus::Paid => write!(f, "paid"),
        }
    }
}

/// An amount owed to or by the user. Independent of hustle profit/loss —
/// debts never feed the dashboard aggregation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Debt {
    #[serde(default)]
    pub id: Option<i64>,

    /// Who the money is owed to / by.
    #[serde(default, alias = "name")]
    pub counterparty: String,

    #[serde(default, deserialize_with = "de::opt_amount")]
    pub amount: Option<f64>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default, deserialize_with = "de::opt_date")]
    pub date: Option<NaiveDate>,

    #[serde(default, deserialize_with = "de::opt_date")]
    pub due_date: Option<NaiveDate>,

    #[serde(default)]
    pub status: Option<DebtStatus>,

    #[serde(default)]
    pub hustle_id: Option<i64>,
}

/// Body for `POST /api/debts`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DebtDraft {
    pub counterparty: String,

    pub amount: f64,

    pub description: String,

    pub date: NaiveDate,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,

    pub status: DebtStatus,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hustle_id: Option<i64>,
}

impl DebtDraft {
    pub fn new(
        counterparty: impl Into<String>,
        amount: f64,
        description: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            counterparty: counterparty.into(),
            amount,
            description: description.into(),
            date,
            due_date: None,
            status: DebtStatus::Pending,
            hustle_id: None,
        }
    }

    /// Checks applied before any network call.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.counterparty.trim().is_empty() {
            return Err(CoreError::Validation("Counterparty name is required".into()));
        }
        if !self.amount.is_finite() || self.amount < 0.0 {
            return Err(CoreError::Validation(
                "Amount must be a non-negative number".into(),
            ));
        }
        Ok(())
    }
}

/// Partial body for `PUT /api/debts/{id}` — only the fields present are
/// sent, so a status flip does not clobber the rest of the record.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DebtUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub counterparty: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<DebtStatus>,
}

impl DebtUpdate {
    /// Update carrying only a status change.
    pub fn status(status: DebtStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}

/// Server-side filters for `GET /api/debts`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DebtQuery {
    pub search: Option<String>,
    pub status: Option<DebtStatus>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub hustle_id: Option<i64>,
}

impl DebtQuery {
    /// Render the filters as query parameters, omitting unset ones.
    pub fn params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(search) = &self.search {
            if !search.trim().is_empty() {
                params.push(("search", search.trim().to_string()));
            }
        }
        if let Some(status) = self.status {
            params.push(("status", status.to_string()));
        }
        if let Some(start) = self.start_date {
            params.push(("start_date", start.to_string()));
        }
        if let Some(end) = self.end_date {
            params.push(("end_date", end.to_string()));
        }
        if let Some(id) = self.hustle_id {
            params.push(("hustle_id", id.to_string()));
        }
        params
    }
}
