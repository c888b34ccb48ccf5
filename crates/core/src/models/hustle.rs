use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::de;
use crate::errors::CoreError;

/// Derived health label for a hustle: "active" once it has recorded any
/// income, "needs attention" otherwise.
///
/// Never stored — always recomputed from transactions by
/// [`crate::services::dashboard_service::hustle_performance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HustleStatus {
    Active,
    NeedsAttention,
}

impl std::fmt::Display for HustleStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HustleStatus::Active => write!(f, "active"),
            HustleStatus::NeedsAttention => write!(f, "needs_attention"),
        }
    }
}

/// A user-tracked small business / income stream.
///
/// **Important**: hustles carry no financial fields. Income, expenses,
/// profit, and status are derived from the transaction collection on every
/// view, never persisted on the hustle itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hustle {
    /// Backend-issued identifier. Records without one cannot be attributed
    /// and are excluded from per-hustle rankings.
    #[serde(default)]
    pub id: Option<i64>,

    #[serde(default)]
    pub title: String,

    /// Business type (e.g., "retail", "boda", "salon").
    #[serde(default, rename = "type")]
    pub kind: Option<String>,

    #[serde(default)]
    pub location: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    /// Start date of the hustle.
    #[serde(default, deserialize_with = "de::opt_date")]
    pub date: Option<NaiveDate>,

    #[serde(default)]
    pub user_id: Option<i64>,
}

impl Hustle {
    pub fn new(id: i64, title: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            title: title.into(),
            kind: None,
            location: None,
            description: None,
            date: None,
            user_id: None,
        }
    }
}

/// Body for `POST /hustles`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HustleDraft {
    pub title: String,

    #[serde(rename = "type")]
    pub kind: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    pub description: String,

    pub date: NaiveDate,
}

impl HustleDraft {
    /// Checks applied before any network call.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.title.trim().is_empty() {
            return Err(CoreError::Validation("Hustle title is required".into()));
        }
        if self.kind.trim().is_empty() {
            return Err(CoreError::Validation("Hustle type is required".into()));
        }
        if self.description.trim().is_empty() {
            return Err(CoreError::Validation(
                "Hustle description is required".into(),
            ));
        }
        Ok(())
    }
}
