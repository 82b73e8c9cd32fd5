// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Application configuration loaded from environment variables.
//!
//! Identity providers are registered only when both their client ID and
//! client secret are present.

use crate::services::provider::ProviderConfig;
use std::env;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Public base URL of the site (no trailing slash)
    pub site_url: String,
    /// Server port
    pub port: u16,
    /// Directory served under `/static`
    pub static_dir: String,

    // --- Secrets ---
    /// HS256 key for session cookies (raw bytes)
    pub session_signing_key: Vec<u8>,
    /// HMAC key for the OAuth state parameter
    pub oauth_state_key: Vec<u8>,

    /// Registered social login providers
    pub providers: Vec<ProviderConfig>,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let mut providers = Vec::new();
        if let Some((id, secret)) = client_credentials("GOOGLE") {
            providers.push(ProviderConfig::google(id, secret));
        }
        if let Some((id, secret)) = client_credentials("GITHUB") {
            providers.push(ProviderConfig::github(id, secret));
        }
        if providers.is_empty() {
            tracing::warn!("No identity providers configured, sign-in is disabled");
        }

        Ok(Self {
            site_url: env::var("SITE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .unwrap_or(3000),
            static_dir: env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string()),
            session_signing_key: env::var("SESSION_SIGNING_KEY")
                .map_err(|_| ConfigError::Missing("SESSION_SIGNING_KEY"))?
                .into_bytes(),
            oauth_state_key: env::var("OAUTH_STATE_KEY")
                .map_err(|_| ConfigError::Missing("OAUTH_STATE_KEY"))?
                .into_bytes(),
            providers,
        })
    }

    /// Default config for testing only.
    pub fn test_default() -> Self {
        Self {
            site_url: "http://localhost:3000".to_string(),
            port: 3000,
            static_dir: "static".to_string(),
            session_signing_key: b"test_session_key_32_bytes_min!!!".to_vec(),
            oauth_state_key: b"test_oauth_state_key".to_vec(),
            providers: vec![
                ProviderConfig::google("google_test_id".into(), "google_test_secret".into()),
                ProviderConfig::github("github_test_id".into(), "github_test_secret".into()),
            ],
        }
    }

    /// Cookies get the `Secure` attribute when the site is served over TLS.
    pub fn secure_cookies(&self) -> bool {
        self.site_url.starts_with("https://")
    }
}

fn client_credentials(prefix: &str) -> Option<(String, String)> {
    let id = env::var(format!("{prefix}_CLIENT_ID")).ok()?;
    let secret = env::var(format!("{prefix}_CLIENT_SECRET")).ok()?;
    Some((id.trim().to_string(), secret.trim().to_string()))
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),
}
