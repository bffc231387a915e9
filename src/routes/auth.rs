// SPDX-License-Identifier: MIT

//! Fitbit OAuth authorization routes.

use axum::{
    extract::{Query, State},
    response::Redirect,
    routing::get,
    Router,
};
use serde::Deserialize;
use std::sync::Arc;

use crate::error::{AppError, Result};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth", get(auth_start))
        .route("/callback", get(auth_callback))
}

/// Start the OAuth flow: generate a PKCE pair and redirect to Fitbit's
/// authorization page.
async fn auth_start(State(state): State<Arc<AppState>>) -> Redirect {
    let auth_url = state.sleep_service.begin_authorization().await;

    tracing::info!(
        client_id = %state.config.fitbit_client_id,
        "Starting OAuth flow, redirecting to Fitbit"
    );

    Redirect::temporary(&auth_url)
}

#[derive(Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// OAuth callback: exchange the authorization code for tokens.
async fn auth_callback(
    State(state): State<Arc<AppState>>,
    Query(params): Query<CallbackParams>,
) -> Result<&'static str> {
    if let Some(error) = params.error {
        tracing::warn!(error = %error, "OAuth error from Fitbit");
        return Err(AppError::Authorization(format!(
            "Fitbit reported: {}",
            error
        )));
    }

    let code = params
        .code
        .ok_or_else(|| AppError::BadRequest("Missing authorization code".to_string()))?;

    state.sleep_service.handle_callback(&code).await?;

    Ok("Authorization successful! You can now retrieve sleep data at /sleep/export.")
}
