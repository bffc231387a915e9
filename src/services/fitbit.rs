// SPDX-License-Identifier: MIT

//! Fitbit API client for the OAuth token lifecycle and sleep data.
//!
//! Handles:
//! - Authorization redirect URL building (PKCE S256)
//! - Authorization-code exchange and refresh at the token endpoint
//! - Paged sleep-list fetching with 401 detection for the retry coordinator

use crate::error::AppError;
use crate::models::{SleepListResponse, SleepLog};
use crate::services::pkce::PkcePair;
use crate::services::session::{SharedSession, TokenPair};
use crate::services::sleep::{fetch_all_pages, with_auth_retry};
use serde::Deserialize;

/// Sleep list page size (the Fitbit API maximum).
pub const PAGE_LIMIT: u32 = 100;

/// Fitbit API client.
#[derive(Clone)]
pub struct FitbitClient {
    http: reqwest::Client,
    api_base_url: String,
    auth_url: String,
    token_url: String,
    client_id: String,
    client_secret: String,
    redirect_uri: String,
}

impl FitbitClient {
    /// Create a new Fitbit client with OAuth credentials.
    pub fn new(client_id: String, client_secret: String, redirect_uri: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_base_url: "https://api.fitbit.com/1.2".to_string(),
            auth_url: "https://www.fitbit.com/oauth2/authorize".to_string(),
            token_url: "https://api.fitbit.com/oauth2/token".to_string(),
            client_id,
            client_secret,
            redirect_uri,
        }
    }

    /// Build the authorization redirect URL for a PKCE challenge.
    pub fn authorize_url(&self, code_challenge: &str) -> String {
        format!(
            "{}?response_type=code&client_id={}&redirect_uri={}&scope=sleep&code_challenge={}&code_challenge_method={}",
            self.auth_url,
            self.client_id,
            urlencoding::encode(&self.redirect_uri),
            code_challenge,
            PkcePair::challenge_method(),
        )
    }

    /// Exchange an authorization code (plus the PKCE verifier) for tokens.
    pub async fn exchange_code(
        &self,
        code: &str,
        verifier: &str,
    ) -> Result<TokenResponse, AppError> {
        let response = self
            .http
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("grant_type", "authorization_code"),
                ("code", code),
                ("code_verifier", verifier),
                ("redirect_uri", self.redirect_uri.as_str()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Authorization(format!("Token exchange request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Fitbit token exchange failed");
            return Err(AppError::Authorization(format!(
                "Token exchange failed with status {}",
                status
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Authorization(format!("Failed to parse token response: {}", e)))
    }

    /// Exchange the refresh token for a renewed token pair.
    pub async fn refresh_token(&self, refresh_token: &str) -> Result<TokenResponse, AppError> {
        let response = self
            .http
            .post(&self.token_url)
            .basic_auth(&self.client_id, Some(&self.client_secret))
            .form(&[
                ("client_id", self.client_id.as_str()),
                ("grant_type", "refresh_token"),
                ("refresh_token", refresh_token),
            ])
            .send()
            .await
            .map_err(|e| AppError::Refresh(format!("Token refresh request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(status = %status, body = %body, "Fitbit token refresh failed");
            return Err(AppError::Refresh(format!(
                "Token refresh failed with status {}",
                status
            )));
        }

        response
            .json()
            .await
            .map_err(|e| AppError::Refresh(format!("Failed to parse token response: {}", e)))
    }

    /// Fetch one page of the sleep list.
    ///
    /// A 401 is surfaced as `AuthExpired` so the retry coordinator can run
    /// the single refresh-and-retry cycle; every other failure is `Fetch`.
    pub async fn list_sleep(
        &self,
        access_token: &str,
        before_date: &str,
        offset: u32,
        limit: u32,
    ) -> Result<Vec<SleepLog>, AppError> {
        let url = format!("{}/user/-/sleep/list.json", self.api_base_url);

        let response = self
            .http
            .get(&url)
            .bearer_auth(access_token)
            .header("Accept-Language", "en_US")
            .query(&[
                ("beforeDate", before_date.to_string()),
                ("sort", "desc".to_string()),
                ("offset", offset.to_string()),
                ("limit", limit.to_string()),
            ])
            .send()
            .await
            .map_err(|e| AppError::Fetch(e.to_string()))?;

        if response.status().as_u16() == 401 {
            tracing::warn!(offset, "Fitbit rejected the access token (401)");
            return Err(AppError::AuthExpired);
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::Fetch(format!("HTTP {}: {}", status, body)));
        }

        let page: SleepListResponse = response
            .json()
            .await
            .map_err(|e| AppError::Fetch(format!("JSON parse error: {}", e)))?;

        Ok(page.sleep)
    }
}

/// Token endpoint response.
///
/// Both fields are required: a payload missing either one fails to
/// deserialize, so a partial pair can never reach the session.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub refresh_token: String,
}

impl From<TokenResponse> for TokenPair {
    fn from(response: TokenResponse) -> Self {
        Self {
            access_token: response.access_token,
            refresh_token: response.refresh_token,
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// SleepService - High-level service with token lifecycle management
// ─────────────────────────────────────────────────────────────────────────────

/// High-level service tying the Fitbit client to the shared session.
///
/// Owns the whole token lifecycle: PKCE generation, code exchange, and the
/// bounded refresh-and-retry cycle around sleep history fetches.
#[derive(Clone)]
pub struct SleepService {
    client: FitbitClient,
    session: SharedSession,
}

impl SleepService {
    pub fn new(client: FitbitClient, session: SharedSession) -> Self {
        Self { client, session }
    }

    /// Start an authorization attempt: generate a PKCE pair, store the
    /// verifier (replacing any outstanding attempt), and return the Fitbit
    /// authorize URL to redirect to.
    pub async fn begin_authorization(&self) -> String {
        let pkce = PkcePair::generate();
        let url = self.client.authorize_url(&pkce.challenge);
        self.session.lock().await.set_verifier(pkce.verifier);
        url
    }

    /// Handle the OAuth callback: exchange the code together with the stored
    /// verifier and install the new token pair.
    ///
    /// The verifier is consumed up front; a failed exchange leaves the token
    /// pair untouched and requires restarting the flow at /auth.
    pub async fn handle_callback(&self, code: &str) -> Result<(), AppError> {
        let verifier = self.session.lock().await.take_verifier().ok_or_else(|| {
            AppError::BadRequest("No authorization attempt in flight; start at /auth".to_string())
        })?;

        let tokens = self.client.exchange_code(code, &verifier).await?;
        self.session.lock().await.set_tokens(tokens.into());

        tracing::info!("Authorization code exchanged, tokens stored");
        Ok(())
    }

    /// Refresh the token pair in place. The stale pair survives a failure so
    /// the caller can surface a clean terminal error.
    pub async fn refresh(&self) -> Result<(), AppError> {
        let refresh_token = self
            .session
            .lock()
            .await
            .refresh_token()
            .map(str::to_owned)
            .ok_or_else(|| AppError::Refresh("No refresh token available".to_string()))?;

        let tokens = self.client.refresh_token(&refresh_token).await?;
        self.session.lock().await.set_tokens(tokens.into());

        tracing::info!("Access token refreshed");
        Ok(())
    }

    /// Fetch the complete sleep history before `before_date` (ISO date),
    /// refreshing the access token at most once if the API reports it
    /// expired mid-fetch.
    pub async fn fetch_sleep_history(&self, before_date: &str) -> Result<Vec<SleepLog>, AppError> {
        with_auth_retry(|| self.fetch_once(before_date), || self.refresh()).await
    }

    /// One full pagination pass with the current access token.
    async fn fetch_once(&self, before_date: &str) -> Result<Vec<SleepLog>, AppError> {
        let access_token = self
            .session
            .lock()
            .await
            .access_token()
            .map(str::to_owned)
            .ok_or_else(|| {
                AppError::Authorization("Not authorized; start at /auth".to_string())
            })?;

        fetch_all_pages(PAGE_LIMIT, |offset| {
            self.client
                .list_sleep(&access_token, before_date, offset, PAGE_LIMIT)
        })
        .await
    }
}
