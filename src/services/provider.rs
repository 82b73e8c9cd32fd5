// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! OAuth 2.0 identity provider descriptors and HTTP client.
//!
//! Handles:
//! - Authorization URL construction
//! - Authorization code exchange
//! - Profile lookup from the provider's userinfo endpoint

use crate::models::Profile;
use serde::Deserialize;

/// Static description of a social login provider.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Identifier submitted by the sign-in form (`action` field)
    pub id: String,
    /// Human-readable name for buttons
    pub name: String,
    pub authorize_url: String,
    pub token_url: String,
    pub userinfo_url: String,
    pub scope: String,
    pub client_id: String,
    pub client_secret: String,
}

impl ProviderConfig {
    pub fn google(client_id: String, client_secret: String) -> Self {
        Self {
            id: "google".to_string(),
            name: "Google".to_string(),
            authorize_url: "https://accounts.google.com/o/oauth2/v2/auth".to_string(),
            token_url: "https://oauth2.googleapis.com/token".to_string(),
            userinfo_url: "https://openidconnect.googleapis.com/v1/userinfo".to_string(),
            scope: "openid email profile".to_string(),
            client_id,
            client_secret,
        }
    }

    pub fn github(client_id: String, client_secret: String) -> Self {
        Self {
            id: "github".to_string(),
            name: "GitHub".to_string(),
            authorize_url: "https://github.com/login/oauth/authorize".to_string(),
            token_url: "https://github.com/login/oauth/access_token".to_string(),
            userinfo_url: "https://api.github.com/user".to_string(),
            scope: "read:user user:email".to_string(),
            client_id,
            client_secret,
        }
    }

    /// Provider consent page URL for the authorization-code flow.
    pub fn authorization_url(&self, callback_url: &str, state: &str) -> String {
        format!(
            "{}?client_id={}&redirect_uri={}&response_type=code&scope={}&state={}",
            self.authorize_url,
            urlencoding::encode(&self.client_id),
            urlencoding::encode(callback_url),
            urlencoding::encode(&self.scope),
            state
        )
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Provider request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Provider profile is missing an account id")]
    MissingAccountId,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// HTTP client shared by all providers.
#[derive(Clone)]
pub struct ProviderClient {
    http: reqwest::Client,
}

impl ProviderClient {
    pub fn new() -> Result<Self, ProviderError> {
        // GitHub rejects API requests without a User-Agent.
        let http = reqwest::Client::builder()
            .user_agent(concat!("paperhearts/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { http })
    }

    /// Exchange an authorization code for an access token, then fetch the profile.
    pub async fn fetch_profile(
        &self,
        provider: &ProviderConfig,
        code: &str,
        callback_url: &str,
    ) -> Result<Profile, ProviderError> {
        let response = self
            .http
            .post(&provider.token_url)
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&[
                ("client_id", provider.client_id.as_str()),
                ("client_secret", provider.client_secret.as_str()),
                ("code", code),
                ("redirect_uri", callback_url),
                ("grant_type", "authorization_code"),
            ])
            .send()
            .await?;
        let token: TokenResponse = check_response_json(response).await?;

        let response = self
            .http
            .get(&provider.userinfo_url)
            .bearer_auth(&token.access_token)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let userinfo: serde_json::Value = check_response_json(response).await?;

        profile_from_userinfo(&provider.id, &userinfo).ok_or(ProviderError::MissingAccountId)
    }
}

async fn check_response_json<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ProviderError> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(ProviderError::Status {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response.json().await?)
}

/// Map a userinfo document to a profile.
///
/// OIDC providers use `sub`; GitHub uses a numeric `id` and `login`.
pub fn profile_from_userinfo(provider: &str, userinfo: &serde_json::Value) -> Option<Profile> {
    let account_id = match userinfo.get("sub").or_else(|| userinfo.get("id"))? {
        serde_json::Value::String(s) if !s.is_empty() => s.clone(),
        serde_json::Value::Number(n) => n.to_string(),
        _ => return None,
    };

    let name = ["name", "login", "email"]
        .iter()
        .filter_map(|key| userinfo.get(*key).and_then(|v| v.as_str()))
        .find(|v| !v.is_empty())
        .map(str::to_string);

    Some(Profile {
        provider: provider.to_string(),
        account_id,
        name,
    })
}
