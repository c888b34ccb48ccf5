pub mod config;
pub mod errors;
pub mod gateway;
pub mod models;
pub mod services;
pub mod storage;

use chrono::NaiveDate;
use log::{debug, warn};

use config::Config;
use errors::CoreError;
use gateway::http::HttpBackend;
use gateway::traits::Backend;
use models::{
    dashboard::{DashboardSnapshot, HustlePerformance, ServerOverview},
    debt::{Debt, DebtDraft, DebtQuery, DebtUpdate},
    hustle::{Hustle, HustleDraft},
    session::SessionPhase,
    transaction::{Transaction, TransactionDraft},
    user::{SignupProfile, User},
};
use services::{
    dashboard_service::{self, DashboardService},
    refresh::RefreshGuard,
    session_service::SessionService,
};
use storage::token_store::{FileTokenStore, TokenStore};

/// Main entry point for the Mtaa Hustle Manager core library.
///
/// Owns the session, the backend gateway, and the services needed to turn
/// raw collections into dashboard views. The session is writable only
/// through the lifecycle operations here; every other caller reads.
#[must_use]
pub struct HustleManager {
    backend: Box<dyn Backend>,
    tokens: Box<dyn TokenStore>,
    session: SessionService,
    dashboard_service: DashboardService,
    refresh_guard: RefreshGuard,
}

impl std::fmt::Debug for HustleManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HustleManager")
            .field("backend", &self.backend.name())
            .field("phase", &self.session.phase())
            .field("user", &self.session.user().map(|u| u.id))
            .finish()
    }
}

impl HustleManager {
    /// Build a manager over an explicit backend and token store. This is
    /// the injection seam tests use.
    pub fn new(backend: Box<dyn Backend>, tokens: Box<dyn TokenStore>) -> Self {
        Self {
            backend,
            tokens,
            session: SessionService::new(),
            dashboard_service: DashboardService::new(),
            refresh_guard: RefreshGuard::new(),
        }
    }

    /// Build the production manager: HTTP gateway plus the file-backed
    /// token store at its default platform location.
    pub fn from_config(config: &Config) -> Result<Self, CoreError> {
        let store = FileTokenStore::new(FileTokenStore::default_path()?);
        Ok(Self::new(
            Box::new(HttpBackend::new(config)),
            Box::new(store),
        ))
    }

    // ── Session Lifecycle ───────────────────────────────────────────

    /// Restore a persisted session, if any. Must complete before any
    /// protected view renders; see [`SessionService::initialize`].
    pub async fn initialize(&mut self) {
        self.session
            .initialize(self.backend.as_ref(), self.tokens.as_ref())
            .await;
    }

    /// Log in with email and password. `Ok(false)` on bad credentials or
    /// transport failure; `Err` only for pre-network input validation.
    pub async fn login(&mut self, email: &str, password: &str) -> Result<bool, CoreError> {
        self.session
            .login(self.backend.as_ref(), self.tokens.as_ref(), email, password)
            .await
    }

    /// Log in with an already-issued bearer token.
    pub async fn login_with_token(&mut self, token: impl Into<String>) -> Result<bool, CoreError> {
        self.session
            .login_with_token(self.backend.as_ref(), self.tokens.as_ref(), token.into())
            .await
    }

    /// Register a new account and establish a session, like `login`.
    pub async fn signup(&mut self, profile: &SignupProfile) -> Result<bool, CoreError> {
        self.session
            .signup(self.backend.as_ref(), self.tokens.as_ref(), profile)
            .await
    }

    /// Synchronous and idempotent.
    pub fn logout(&mut self) {
        self.session.logout(self.tokens.as_ref());
    }

    pub fn phase(&self) -> SessionPhase {
        self.session.phase()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn current_user(&self) -> Option<&User> {
        self.session.user()
    }

    // ── Dashboard ───────────────────────────────────────────────────

    /// Fetch hustles and transactions concurrently and aggregate them into
    /// a snapshot for today.
    ///
    /// `Ok(None)` means this refresh was superseded by a newer one and its
    /// result was discarded — never rendered over fresher state. Transport
    /// failures degrade to an all-zero snapshot; only a rejected token is
    /// an error (and it clears the session).
    pub async fn refresh_dashboard(&mut self) -> Result<Option<DashboardSnapshot>, CoreError> {
        let token = self.require_token()?;
        let ticket = self.refresh_guard.begin();

        let fetched = tokio::try_join!(
            self.backend.list_hustles(&token),
            self.backend.list_transactions(&token),
        );

        if !self.refresh_guard.is_current(ticket) {
            debug!("dashboard refresh superseded — discarding result");
            return Ok(None);
        }

        let as_of = today();
        match fetched {
            Ok((hustles, transactions)) => Ok(Some(self.dashboard_service.build_snapshot(
                &hustles,
                &transactions,
                as_of,
            ))),
            Err(CoreError::Unauthorized) => {
                self.session.invalidate(self.tokens.as_ref());
                Err(CoreError::Unauthorized)
            }
            Err(e) => {
                warn!("dashboard fetch failed — serving an empty snapshot: {e}");
                Ok(Some(self.dashboard_service.build_snapshot(&[], &[], as_of)))
            }
        }
    }

    /// The backend's own pre-aggregated totals. Optional alternative to
    /// [`Self::refresh_dashboard`]; the client-side computation stays
    /// canonical.
    pub async fn server_overview(&mut self) -> Result<ServerOverview, CoreError> {
        let token = self.require_token()?;
        let result = self.backend.dashboard_overview(&token).await;
        self.forget_session_on_auth_error(result)
    }

    // ── Hustles ─────────────────────────────────────────────────────

    pub async fn hustles(&mut self) -> Result<Vec<Hustle>, CoreError> {
        let token = self.require_token()?;
        let result = self.backend.list_hustles(&token).await;
        self.forget_session_on_auth_error(result)
    }

    pub async fn hustle(&mut self, id: i64) -> Result<Hustle, CoreError> {
        let token = self.require_token()?;
        let result = self.backend.get_hustle(&token, id).await;
        self.forget_session_on_auth_error(result)
    }

    pub async fn create_hustle(&mut self, draft: &HustleDraft) -> Result<(), CoreError> {
        draft.validate()?;
        let token = self.require_token()?;
        let result = self.backend.create_hustle(&token, draft).await;
        self.forget_session_on_auth_error(result)
    }

    pub async fn delete_hustle(&mut self, id: i64) -> Result<(), CoreError> {
        let token = self.require_token()?;
        let result = self.backend.delete_hustle(&token, id).await;
        self.forget_session_on_auth_error(result)
    }

    /// Transactions recorded against one hustle.
    pub async fn hustle_transactions(&mut self, id: i64) -> Result<Vec<Transaction>, CoreError> {
        let token = self.require_token()?;
        let result = self.backend.hustle_transactions(&token, id).await;
        self.forget_session_on_auth_error(result)
    }

    /// Fetch one hustle with its transactions and derive its performance
    /// figures. `Ok(None)` when the record carries no id.
    pub async fn hustle_overview(&mut self, id: i64) -> Result<Option<HustlePerformance>, CoreError> {
        let token = self.require_token()?;
        let fetched = tokio::try_join!(
            self.backend.get_hustle(&token, id),
            self.backend.hustle_transactions(&token, id),
        );
        let (hustle, transactions) = self.forget_session_on_auth_error(fetched)?;
        Ok(dashboard_service::hustle_performance(&hustle, &transactions))
    }

    // ── Transactions ────────────────────────────────────────────────

    pub async fn transactions(&mut self) -> Result<Vec<Transaction>, CoreError> {
        let token = self.require_token()?;
        let result = self.backend.list_transactions(&token).await;
        self.forget_session_on_auth_error(result)
    }

    pub async fn record_transaction(&mut self, draft: &TransactionDraft) -> Result<(), CoreError> {
        draft.validate()?;
        let token = self.require_token()?;
        let result = self.backend.create_transaction(&token, draft).await;
        self.forget_session_on_auth_error(result)
    }

    pub async fn update_transaction(
        &mut self,
        id: i64,
        draft: &TransactionDraft,
    ) -> Result<(), CoreError> {
        draft.validate()?;
        let token = self.require_token()?;
        let result = self.backend.update_transaction(&token, id, draft).await;
        self.forget_session_on_auth_error(result)
    }

    pub async fn delete_transaction(&mut self, id: i64) -> Result<(), CoreError> {
        let token = self.require_token()?;
        let result = self.backend.delete_transaction(&token, id).await;
        self.forget_session_on_auth_error(result)
    }

    // ── Debts ───────────────────────────────────────────────────────

    pub async fn debts(&mut self, query: &DebtQuery) -> Result<Vec<Debt>, CoreError> {
        let token = self.require_token()?;
        let result = self.backend.list_debts(&token, query).await;
        self.forget_session_on_auth_error(result)
    }

    pub async fn record_debt(&mut self, draft: &DebtDraft) -> Result<(), CoreError> {
        draft.validate()?;
        let token = self.require_token()?;
        let result = self.backend.create_debt(&token, draft).await;
        self.forget_session_on_auth_error(result)
    }

    pub async fn update_debt(&mut self, id: i64, update: &DebtUpdate) -> Result<(), CoreError> {
        let token = self.require_token()?;
        let result = self.backend.update_debt(&token, id, update).await;
        self.forget_session_on_auth_error(result)
    }

    pub async fn delete_debt(&mut self, id: i64) -> Result<(), CoreError> {
        let token = self.require_token()?;
        let result = self.backend.delete_debt(&token, id).await;
        self.forget_session_on_auth_error(result)
    }

    // ── Internal ────────────────────────────────────────────────────

    fn require_token(&self) -> Result<String, CoreError> {
        self.session
            .token()
            .map(str::to_string)
            .ok_or(CoreError::Unauthorized)
    }

    /// A 401 on an authenticated call means the token expired server-side:
    /// drop the session so the caller routes back to login.
    fn forget_session_on_auth_error<T>(
        &mut self,
        result: Result<T, CoreError>,
    ) -> Result<T, CoreError> {
        if matches!(result, Err(CoreError::Unauthorized)) {
            self.session.invalidate(self.tokens.as_ref());
        }
        result
    }
}

fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}
