// SPDX-License-Identifier: MIT

//! Fitbit sleep export service.
//!
//! Authorizes against the Fitbit API with OAuth2 + PKCE, pages through the
//! authorized user's complete sleep history, and serves it as a CSV download.

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use config::Config;
use services::SleepService;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub sleep_service: SleepService,
}
