// SPDX-License-Identifier: MIT

//! Application configuration loaded from environment variables.

use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Fitbit OAuth client ID (public)
    pub fitbit_client_id: String,
    /// Fitbit OAuth client secret
    pub fitbit_client_secret: String,
    /// Redirect URI registered with the Fitbit application
    pub redirect_uri: String,
    /// Server port
    pub port: u16,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            fitbit_client_id: "test_client_id".to_string(),
            fitbit_client_secret: "test_secret".to_string(),
            redirect_uri: "http://localhost:8080/callback".to_string(),
            port: 8080,
        }
    }
}

impl Config {
    /// Load configuration from environment variables (and a .env file if
    /// present).
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Ok(Self {
            fitbit_client_id: env::var("FITBIT_CLIENT_ID")
                .map_err(|_| ConfigError::Missing("FITBIT_CLIENT_ID"))?,
            fitbit_client_secret: env::var("FITBIT_CLIENT_SECRET")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("FITBIT_CLIENT_SECRET"))?,
            redirect_uri: env::var("REDIRECT_URI")
                .unwrap_or_else(|_| "http://localhost:8080/callback".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env() {
        // Set required env vars for test
        env::set_var("FITBIT_CLIENT_ID", "test_id");
        env::set_var("FITBIT_CLIENT_SECRET", "test_secret");

        let config = Config::from_env().expect("Config should load");

        assert_eq!(config.fitbit_client_id, "test_id");
        assert_eq!(config.fitbit_client_secret, "test_secret");
        assert_eq!(config.port, 8080);
    }
}
