use async_trait::async_trait;

use crate::errors::CoreError;
use crate::models::dashboard::ServerOverview;
use crate::models::debt::{Debt, DebtDraft, DebtQuery, DebtUpdate};
use crate::models::hustle::{Hustle, HustleDraft};
use crate::models::transaction::{Transaction, TransactionDraft};
use crate::models::user::{SignupProfile, User};

/// Trait abstraction over the remote backend.
///
/// The production implementation is [`super::http::HttpBackend`]; tests
/// substitute in-memory fakes. Implementations normalize response shapes
/// (bare arrays vs. wrapped payloads) so that callers only ever see plain
/// collections, and map HTTP 401 to [`CoreError::Unauthorized`].
#[async_trait]
pub trait Backend: Send + Sync {
    /// Human-readable name of this backend (for logs/errors).
    fn name(&self) -> &str;

    // ── Auth ────────────────────────────────────────────────────────

    /// Exchange credentials for a bearer token.
    async fn login(&self, email: &str, password: &str) -> Result<String, CoreError>;

    /// Register a new account; returns a bearer token on success.
    async fn signup(&self, profile: &SignupProfile) -> Result<String, CoreError>;

    /// Fetch the profile of the token's owner. Rejection of the token
    /// surfaces as [`CoreError::Unauthorized`].
    async fn current_user(&self, token: &str) -> Result<User, CoreError>;

    // ── Hustles ─────────────────────────────────────────────────────

    async fn list_hustles(&self, token: &str) -> Result<Vec<Hustle>, CoreError>;

    async fn get_hustle(&self, token: &str, id: i64) -> Result<Hustle, CoreError>;

    async fn create_hustle(&self, token: &str, draft: &HustleDraft) -> Result<(), CoreError>;

    async fn delete_hustle(&self, token: &str, id: i64) -> Result<(), CoreError>;

    /// Transactions recorded against one hustle.
    async fn hustle_transactions(&self, token: &str, id: i64)
        -> Result<Vec<Transaction>, CoreError>;

    // ── Transactions ────────────────────────────────────────────────

    async fn list_transactions(&self, token: &str) -> Result<Vec<Transaction>, CoreError>;

    async fn create_transaction(
        &self,
        token: &str,
        draft: &TransactionDraft,
    ) -> Result<(), CoreError>;

    async fn update_transaction(
        &self,
        token: &str,
        id: i64,
        draft: &TransactionDraft,
    ) -> Result<(), CoreError>;

    async fn delete_transaction(&self, token: &str, id: i64) -> Result<(), CoreError>;

    // ── Debts ───────────────────────────────────────────────────────

    async fn list_debts(&self, token: &str, query: &DebtQuery) -> Result<Vec<Debt>, CoreError>;

    async fn create_debt(&self, token: &str, draft: &DebtDraft) -> Result<(), CoreError>;

    async fn update_debt(
        &self,
        token: &str,
        id: i64,
        update: &DebtUpdate,
    ) -> Result<(), CoreError>;

    async fn delete_debt(&self, token: &str, id: i64) -> Result<(), CoreError>;

    // ── Dashboard (optional server-side aggregation) ────────────────

    /// Pre-aggregated totals from the backend. The canonical dashboard is
    /// computed client-side; this is an optimization surface only.
    async fn dashboard_overview(&self, token: &str) -> Result<ServerOverview, CoreError>;
}
