use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;

use super::normalize::decode_collection;
use super::traits::Backend;
use crate::config::Config;
use crate::errors::CoreError;
use crate::models::dashboard::ServerOverview;
use crate::models::debt::{Debt, DebtDraft, DebtQuery, DebtUpdate};
use crate::models::hustle::{Hustle, HustleDraft};
use crate::models::transaction::{Transaction, TransactionDraft};
use crate::models::user::{SignupProfile, User};

/// Production [`Backend`] speaking JSON over HTTP to the Mtaa Hustle REST
/// API. All authenticated calls carry `Authorization: Bearer <token>`.
pub struct HttpBackend {
    client: Client,
    base_url: String,
}

impl HttpBackend {
    pub fn new(config: &Config) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|_| Client::new());
        Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Map non-success statuses to errors, pulling the backend's
    /// `{"error": "..."}` message through when present.
    async fn checked(resp: Response, endpoint: &str) -> Result<Response, CoreError> {
        let status = resp.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(CoreError::Unauthorized);
        }
        if status == StatusCode::NOT_FOUND {
            return Err(CoreError::NotFound(endpoint.to_string()));
        }
        if !status.is_success() {
            let message = resp
                .json::<Value>()
                .await
                .ok()
                .and_then(|v| v.get("error").and_then(Value::as_str).map(str::to_string))
                .unwrap_or_else(|| format!("unexpected status {status}"));
            return Err(CoreError::Api {
                endpoint: endpoint.to_string(),
                message,
            });
        }
        Ok(resp)
    }

    async fn fetch_collection<T>(
        &self,
        token: &str,
        path: &str,
        wrapper_keys: &[&str],
    ) -> Result<Vec<T>, CoreError>
    where
        T: serde::de::DeserializeOwned,
    {
        debug!("GET {path}");
        let resp = self
            .client
            .get(self.url(path))
            .bearer_auth(token)
            .send()
            .await?;
        let payload: Value = Self::checked(resp, path).await?.json().await?;
        Ok(decode_collection(payload, wrapper_keys))
    }

    /// Fire a write request and discard the body, keeping only the status.
    async fn expect_ok(resp: Response, endpoint: &str) -> Result<(), CoreError> {
        Self::checked(resp, endpoint).await.map(|_| ())
    }
}

// ── Private response shapes ─────────────────────────────────────────

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[async_trait]
impl Backend for HttpBackend {
    fn name(&self) -> &str {
        "http"
    }

    // ── Auth ────────────────────────────────────────────────────────

    async fn login(&self, email: &str, password: &str) -> Result<String, CoreError> {
        let resp = self
            .client
            .post(self.url("/login"))
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;
        let token: TokenResponse = Self::checked(resp, "/login")
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                endpoint: "/login".into(),
                message: format!("malformed token response: {e}"),
            })?;
        Ok(token.access_token)
    }

    async fn signup(&self, profile: &SignupProfile) -> Result<String, CoreError> {
        let resp = self
            .client
            .post(self.url("/users"))
            .json(profile)
            .send()
            .await?;
        let token: TokenResponse = Self::checked(resp, "/users")
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                endpoint: "/users".into(),
                message: format!("malformed token response: {e}"),
            })?;
        Ok(token.access_token)
    }

    async fn current_user(&self, token: &str) -> Result<User, CoreError> {
        let resp = self
            .client
            .get(self.url("/users/me"))
            .bearer_auth(token)
            .send()
            .await?;
        let user: User = Self::checked(resp, "/users/me")
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                endpoint: "/users/me".into(),
                message: format!("malformed user profile: {e}"),
            })?;
        Ok(user)
    }

    // ── Hustles ─────────────────────────────────────────────────────

    async fn list_hustles(&self, token: &str) -> Result<Vec<Hustle>, CoreError> {
        self.fetch_collection(token, "/hustles", &["hustles"]).await
    }

    async fn get_hustle(&self, token: &str, id: i64) -> Result<Hustle, CoreError> {
        let path = format!("/hustles/{id}");
        let resp = self
            .client
            .get(self.url(&path))
            .bearer_auth(token)
            .send()
            .await?;
        let hustle: Hustle = Self::checked(resp, &path)
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                endpoint: path.clone(),
                message: format!("malformed hustle: {e}"),
            })?;
        Ok(hustle)
    }

    async fn create_hustle(&self, token: &str, draft: &HustleDraft) -> Result<(), CoreError> {
        let resp = self
            .client
            .post(self.url("/hustles"))
            .bearer_auth(token)
            .json(draft)
            .send()
            .await?;
        Self::expect_ok(resp, "/hustles").await
    }

    async fn delete_hustle(&self, token: &str, id: i64) -> Result<(), CoreError> {
        let path = format!("/hustles/{id}");
        let resp = self
            .client
            .delete(self.url(&path))
            .bearer_auth(token)
            .send()
            .await?;
        Self::expect_ok(resp, &path).await
    }

    async fn hustle_transactions(
        &self,
        token: &str,
        id: i64,
    ) -> Result<Vec<Transaction>, CoreError> {
        let path = format!("/hustles/{id}/transactions");
        self.fetch_collection(token, &path, &["transactions"]).await
    }

    // ── Transactions ────────────────────────────────────────────────

    async fn list_transactions(&self, token: &str) -> Result<Vec<Transaction>, CoreError> {
        self.fetch_collection(token, "/transactions", &["transactions"])
            .await
    }

    async fn create_transaction(
        &self,
        token: &str,
        draft: &TransactionDraft,
    ) -> Result<(), CoreError> {
        let resp = self
            .client
            .post(self.url("/transactions"))
            .bearer_auth(token)
            .json(draft)
            .send()
            .await?;
        Self::expect_ok(resp, "/transactions").await
    }

    async fn update_transaction(
        &self,
        token: &str,
        id: i64,
        draft: &TransactionDraft,
    ) -> Result<(), CoreError> {
        let path = format!("/transactions/{id}");
        let resp = self
            .client
            .put(self.url(&path))
            .bearer_auth(token)
            .json(draft)
            .send()
            .await?;
        Self::expect_ok(resp, &path).await
    }

    async fn delete_transaction(&self, token: &str, id: i64) -> Result<(), CoreError> {
        let path = format!("/transactions/{id}");
        let resp = self
            .client
            .delete(self.url(&path))
            .bearer_auth(token)
            .send()
            .await?;
        Self::expect_ok(resp, &path).await
    }

    // ── Debts ───────────────────────────────────────────────────────

    async fn list_debts(&self, token: &str, query: &DebtQuery) -> Result<Vec<Debt>, CoreError> {
        debug!("GET /api/debts");
        let resp = self
            .client
            .get(self.url("/api/debts"))
            .query(&query.params())
            .bearer_auth(token)
            .send()
            .await?;
        let payload: Value = Self::checked(resp, "/api/debts").await?.json().await?;
        Ok(decode_collection(payload, &["debts"]))
    }

    async fn create_debt(&self, token: &str, draft: &DebtDraft) -> Result<(), CoreError> {
        let resp = self
            .client
            .post(self.url("/api/debts"))
            .bearer_auth(token)
            .json(draft)
            .send()
            .await?;
        Self::expect_ok(resp, "/api/debts").await
    }

    async fn update_debt(
        &self,
        token: &str,
        id: i64,
        update: &DebtUpdate,
    ) -> Result<(), CoreError> {
        let path = format!("/api/debts/{id}");
        let resp = self
            .client
            .put(self.url(&path))
            .bearer_auth(token)
            .json(update)
            .send()
            .await?;
        Self::expect_ok(resp, &path).await
    }

    async fn delete_debt(&self, token: &str, id: i64) -> Result<(), CoreError> {
        let path = format!("/api/debts/{id}");
        let resp = self
            .client
            .delete(self.url(&path))
            .bearer_auth(token)
            .send()
            .await?;
        Self::expect_ok(resp, &path).await
    }

    // ── Dashboard ───────────────────────────────────────────────────

    async fn dashboard_overview(&self, token: &str) -> Result<ServerOverview, CoreError> {
        let resp = self
            .client
            .get(self.url("/dashboard/overview"))
            .bearer_auth(token)
            .send()
            .await?;
        let overview: ServerOverview = Self::checked(resp, "/dashboard/overview")
            .await?
            .json()
            .await
            .map_err(|e| CoreError::Api {
                endpoint: "/dashboard/overview".into(),
                message: format!("malformed overview: {e}"),
            })?;
        Ok(overview)
    }
}
