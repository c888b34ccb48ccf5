use log::{debug, warn};

use crate::errors::CoreError;
use crate::gateway::traits::Backend;
use crate::models::session::{Session, SessionPhase};
use crate::models::user::{SignupProfile, User};
use crate::storage::token_store::TokenStore;

/// Owns the authentication lifecycle.
///
/// Holds the only mutable handle to the [`Session`]; everything else reads
/// through the accessors. Network failures during `initialize` and `login`
/// never propagate as errors — they resolve to the unauthenticated side of
/// the state machine so callers can route to a public view.
pub struct SessionService {
    phase: SessionPhase,
    session: Option<Session>,
}

impl SessionService {
    pub fn new() -> Self {
        Self {
            phase: SessionPhase::Uninitialized,
            session: None,
        }
    }

    /// Restore a persisted session on startup.
    ///
    /// Reads the stored token and validates it against the backend's
    /// profile endpoint. Any failure — no token, network error, rejection,
    /// malformed profile — discards the stored token and lands in
    /// `Anonymous`. Completes (one way or the other) before any protected
    /// content should render; the interim phase is `Loading`.
    pub async fn initialize(&mut self, backend: &dyn Backend, store: &dyn TokenStore) {
        self.phase = SessionPhase::Loading;

        let stored = match store.load() {
            Ok(stored) => stored,
            Err(e) => {
                warn!("could not read persisted session: {e}");
                None
            }
        };

        let Some(token) = stored else {
            self.phase = SessionPhase::Anonymous;
            return;
        };

        match backend.current_user(&token).await {
            Ok(user) => {
                self.session = Some(Session { user, token });
                self.phase = SessionPhase::Authenticated;
            }
            Err(e) => {
                debug!("persisted token not accepted: {e}");
                if let Err(e) = store.clear() {
                    warn!("could not discard stale token: {e}");
                }
                self.session = None;
                self.phase = SessionPhase::Anonymous;
            }
        }
    }

    /// Exchange credentials for a token, then establish the session.
    ///
    /// Returns `Ok(false)` on bad credentials or transport failure — the
    /// prior session, if any, is left untouched. Only pre-network input
    /// validation produces an `Err`.
    pub async fn login(
        &mut self,
        backend: &dyn Backend,
        store: &dyn TokenStore,
        email: &str,
        password: &str,
    ) -> Result<bool, CoreError> {
        if email.trim().is_empty() || password.is_empty() {
            return Err(CoreError::Validation(
                "Email and password are required".into(),
            ));
        }

        let token = match backend.login(email, password).await {
            Ok(token) => token,
            Err(CoreError::Unauthorized) => return Ok(false),
            Err(e) => {
                warn!("login request failed: {e}");
                return Ok(false);
            }
        };

        self.login_with_token(backend, store, token).await
    }

    /// Establish a session from an already-issued token.
    ///
    /// Fetches the profile, persists the token, and moves to
    /// `Authenticated`. Returns `Ok(false)` if the backend does not accept
    /// the token; the prior session is left untouched.
    pub async fn login_with_token(
        &mut self,
        backend: &dyn Backend,
        store: &dyn TokenStore,
        token: String,
    ) -> Result<bool, CoreError> {
        match backend.current_user(&token).await {
            Ok(user) => {
                if let Err(e) = store.save(&token) {
                    warn!("could not persist session token: {e}");
                }
                self.session = Some(Session { user, token });
                self.phase = SessionPhase::Authenticated;
                Ok(true)
            }
            Err(e) => {
                debug!("token not accepted: {e}");
                Ok(false)
            }
        }
    }

    /// Register a new account, then behave like `login`.
    pub async fn signup(
        &mut self,
        backend: &dyn Backend,
        store: &dyn TokenStore,
        profile: &SignupProfile,
    ) -> Result<bool, CoreError> {
        profile.validate()?;

        let token = match backend.signup(profile).await {
            Ok(token) => token,
            Err(e) => {
                warn!("signup request failed: {e}");
                return Ok(false);
            }
        };

        self.login_with_token(backend, store, token).await
    }

    /// Clear the persisted token and the in-memory session. Synchronous
    /// and idempotent; storage failures are logged, not raised.
    pub fn logout(&mut self, store: &dyn TokenStore) {
        if let Err(e) = store.clear() {
            warn!("could not clear persisted token: {e}");
        }
        self.session = None;
        self.phase = SessionPhase::Anonymous;
    }

    /// The backend rejected our token mid-flight — drop the session so the
    /// caller can route to the login flow.
    pub fn invalidate(&mut self, store: &dyn TokenStore) {
        warn!("session token rejected by the backend — signing out");
        self.logout(store);
    }

    // ── Accessors ───────────────────────────────────────────────────

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }

    pub fn token(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.token.as_str())
    }

    /// True iff a session with a non-empty token is held.
    pub fn is_authenticated(&self) -> bool {
        self.session
            .as_ref()
            .is_some_and(|s| !s.token.is_empty())
    }
}

impl Default for SessionService {
    fn default() -> Self {
        Self::new()
    }
}
