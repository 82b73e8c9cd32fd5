// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Identity service: social login through OAuth 2.0 providers.
//!
//! Sign-in redirects to the provider with an HMAC-signed `state` carrying the
//! provider, post-login target and a nonce. The nonce is also set in a
//! short-lived cookie, so only the browser that started the flow can finish
//! it. The callback verifies both, exchanges the code, and stores the session
//! as a signed JWT cookie. Every failure ends in a redirect to `/auth/error`.

use crate::actions::{ActionOutcome, SessionAuthority};
use crate::config::Config;
use crate::middleware::session::{create_session_jwt, SESSION_COOKIE};
use crate::services::provider::{ProviderClient, ProviderConfig, ProviderError};
use crate::time_utils::{unix_millis, Clock};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use hmac::{Hmac, Mac};
use ring::rand::{SecureRandom, SystemRandom};
use serde::Deserialize;
use sha2::Sha256;
use std::sync::Arc;
use subtle::ConstantTimeEq;

// Type alias for HMAC-SHA256
type HmacSha256 = Hmac<Sha256>;

/// Sign-in attempts must come back from the provider within this window.
const STATE_TTL_MS: u64 = 10 * 60 * 1000;

/// Cookie holding the nonce of an in-flight sign-in.
pub const OAUTH_STATE_COOKIE: &str = "paperhearts_oauth_state";

/// Path the state cookie is scoped to.
const OAUTH_STATE_COOKIE_PATH: &str = "/auth/callback";

/// Session lifetime in days.
pub const SESSION_TTL_DAYS: i64 = 30;

/// Error codes understood by the auth error page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthErrorKind {
    /// Unknown or unconfigured provider
    Configuration,
    /// User declined consent at the provider
    AccessDenied,
    /// Missing, tampered or expired state
    Verification,
    /// Code exchange or profile lookup failed
    OAuthCallback,
    Default,
}

impl AuthErrorKind {
    pub fn code(self) -> &'static str {
        match self {
            AuthErrorKind::Configuration => "Configuration",
            AuthErrorKind::AccessDenied => "AccessDenied",
            AuthErrorKind::Verification => "Verification",
            AuthErrorKind::OAuthCallback => "OAuthCallback",
            AuthErrorKind::Default => "Default",
        }
    }

    pub fn from_code(code: &str) -> Self {
        match code {
            "Configuration" => AuthErrorKind::Configuration,
            "AccessDenied" => AuthErrorKind::AccessDenied,
            "Verification" => AuthErrorKind::Verification,
            "OAuthCallback" => AuthErrorKind::OAuthCallback,
            _ => AuthErrorKind::Default,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            AuthErrorKind::Configuration => "That sign-in option is not available right now.",
            AuthErrorKind::AccessDenied => "Sign-in was cancelled.",
            AuthErrorKind::Verification => "Your sign-in link expired. Please try again.",
            AuthErrorKind::OAuthCallback => "We could not complete sign-in with the provider.",
            AuthErrorKind::Default => "Something went wrong while signing in.",
        }
    }

    pub fn redirect(self) -> ActionOutcome {
        ActionOutcome::Redirect(format!("/auth/error?error={}", self.code()))
    }
}

/// Query parameters on the provider callback.
#[derive(Debug, Default, Deserialize)]
pub struct CallbackParams {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Decoded contents of a verified `state` parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedState {
    pub provider: String,
    pub redirect_to: String,
    pub nonce: String,
}

/// Social login backed by OAuth 2.0 providers and a JWT session cookie.
pub struct IdentityService {
    providers: Vec<ProviderConfig>,
    client: ProviderClient,
    site_url: String,
    state_key: Vec<u8>,
    session_key: Vec<u8>,
    secure_cookies: bool,
    clock: Arc<dyn Clock>,
}

impl IdentityService {
    pub fn new(config: &Config, clock: Arc<dyn Clock>) -> Result<Self, ProviderError> {
        Ok(Self {
            providers: config.providers.clone(),
            client: ProviderClient::new()?,
            site_url: config.site_url.clone(),
            state_key: config.oauth_state_key.clone(),
            session_key: config.session_signing_key.clone(),
            secure_cookies: config.secure_cookies(),
            clock,
        })
    }

    /// Registered providers, in sign-in button order.
    pub fn providers(&self) -> &[ProviderConfig] {
        &self.providers
    }

    fn provider(&self, id: &str) -> Option<&ProviderConfig> {
        self.providers.iter().find(|p| p.id == id)
    }

    fn callback_url(&self, provider_id: &str) -> String {
        format!("{}/auth/callback/{}", self.site_url, provider_id)
    }

    /// Encode provider + target + nonce + timestamp into a signed, URL-safe state.
    pub fn sign_state(&self, provider: &str, redirect_to: &str, nonce: &str) -> Option<String> {
        let timestamp = unix_millis(self.clock.now());
        let payload = format!("{}|{}|{}|{:x}", provider, redirect_to, nonce, timestamp);
        let signature = sign(&self.state_key, &payload)?;
        let signed = format!("{}|{}", payload, signature);
        Some(URL_SAFE_NO_PAD.encode(signed.as_bytes()))
    }

    /// Check signature and age of a state produced by [`Self::sign_state`].
    pub fn verify_state(&self, state: &str) -> Option<VerifiedState> {
        let bytes = URL_SAFE_NO_PAD.decode(state).ok()?;
        let state_str = String::from_utf8(bytes).ok()?;

        // Format is "provider|redirect_to|nonce_hex|timestamp_hex|signature_hex"
        let (payload, signature_hex) = state_str.rsplit_once('|')?;
        let expected = sign(&self.state_key, payload)?;
        if !bool::from(expected.as_bytes().ct_eq(signature_hex.as_bytes())) {
            tracing::error!("OAuth state signature mismatch! Potential tampering.");
            return None;
        }

        let (rest, timestamp_hex) = payload.rsplit_once('|')?;
        let (rest, nonce) = rest.rsplit_once('|')?;
        let (provider, redirect_to) = rest.split_once('|')?;
        let issued_at = u64::from_str_radix(timestamp_hex, 16).ok()?;
        let now = unix_millis(self.clock.now());
        if now.saturating_sub(issued_at) > STATE_TTL_MS {
            tracing::warn!(provider, "OAuth state expired");
            return None;
        }

        Some(VerifiedState {
            provider: provider.to_string(),
            redirect_to: local_path(redirect_to).to_string(),
            nonce: nonce.to_string(),
        })
    }

    fn state_cookie(&self, nonce: String) -> Cookie<'static> {
        Cookie::build((OAUTH_STATE_COOKIE, nonce))
            .path(OAUTH_STATE_COOKIE_PATH)
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure_cookies)
            .max_age(time::Duration::milliseconds(STATE_TTL_MS as i64))
            .build()
    }

    fn state_cookie_removal(&self) -> Cookie<'static> {
        Cookie::build((OAUTH_STATE_COOKIE, ""))
            .path(OAUTH_STATE_COOKIE_PATH)
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure_cookies)
            .build()
    }

    fn session_cookie(&self, value: String) -> Cookie<'static> {
        Cookie::build((SESSION_COOKIE, value))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure_cookies)
            .max_age(time::Duration::days(SESSION_TTL_DAYS))
            .build()
    }

    /// Finish a sign-in on return from the provider.
    pub async fn complete_sign_in(
        &self,
        jar: CookieJar,
        provider_id: &str,
        params: &CallbackParams,
    ) -> (CookieJar, ActionOutcome) {
        // The nonce is single use, whatever the outcome.
        let browser_nonce = jar
            .get(OAUTH_STATE_COOKIE)
            .map(|cookie| cookie.value().to_string());
        let jar = jar.remove(self.state_cookie_removal());

        if let Some(error) = &params.error {
            tracing::warn!(provider = provider_id, error = %error, "OAuth error from provider");
            return (jar, AuthErrorKind::AccessDenied.redirect());
        }

        let verified = params.state.as_deref().and_then(|s| self.verify_state(s));
        let Some(verified) = verified.filter(|v| v.provider == provider_id) else {
            return (jar, AuthErrorKind::Verification.redirect());
        };

        let same_browser = browser_nonce
            .as_deref()
            .is_some_and(|nonce| bool::from(nonce.as_bytes().ct_eq(verified.nonce.as_bytes())));
        if !same_browser {
            tracing::warn!(
                provider = provider_id,
                "OAuth state does not belong to this browser"
            );
            return (jar, AuthErrorKind::Verification.redirect());
        }

        let Some(provider) = self.provider(provider_id) else {
            return (jar, AuthErrorKind::Configuration.redirect());
        };

        let Some(code) = params.code.as_deref().filter(|c| !c.is_empty()) else {
            return (jar, AuthErrorKind::OAuthCallback.redirect());
        };

        tracing::info!(provider = provider_id, "Exchanging authorization code");

        let profile = match self
            .client
            .fetch_profile(provider, code, &self.callback_url(provider_id))
            .await
        {
            Ok(profile) => profile,
            Err(e) => {
                tracing::warn!(provider = provider_id, error = %e, "OAuth code exchange failed");
                return (jar, AuthErrorKind::OAuthCallback.redirect());
            }
        };

        let token = match create_session_jwt(&profile, &self.session_key, self.clock.now()) {
            Ok(token) => token,
            Err(e) => {
                tracing::error!(error = %e, "Session token creation failed");
                return (jar, AuthErrorKind::Default.redirect());
            }
        };

        tracing::info!(provider = provider_id, subject = %profile.subject(), "User signed in");

        (
            jar.add(self.session_cookie(token)),
            ActionOutcome::Redirect(verified.redirect_to),
        )
    }
}

impl SessionAuthority for IdentityService {
    fn start_session(
        &self,
        jar: CookieJar,
        provider: &str,
        redirect_to: &str,
    ) -> (CookieJar, ActionOutcome) {
        let Some(config) = self.provider(provider) else {
            tracing::warn!(provider, "Sign-in requested for unknown provider");
            return (jar, AuthErrorKind::Configuration.redirect());
        };

        let Some(nonce) = generate_nonce() else {
            tracing::error!("System random source unavailable");
            return (jar, AuthErrorKind::Default.redirect());
        };

        let Some(state) = self.sign_state(&config.id, local_path(redirect_to), &nonce) else {
            return (jar, AuthErrorKind::Configuration.redirect());
        };

        let auth_url = config.authorization_url(&self.callback_url(&config.id), &state);

        tracing::info!(
            provider = %config.id,
            redirect_to,
            "Redirecting to identity provider"
        );

        (
            jar.add(self.state_cookie(nonce)),
            ActionOutcome::Redirect(auth_url),
        )
    }

    fn end_session(&self, jar: CookieJar, redirect_to: &str) -> (CookieJar, ActionOutcome) {
        let removal = Cookie::build((SESSION_COOKIE, ""))
            .path("/")
            .http_only(true)
            .same_site(SameSite::Lax)
            .secure(self.secure_cookies);

        (
            jar.remove(removal),
            ActionOutcome::Redirect(local_path(redirect_to).to_string()),
        )
    }
}

/// Hex HMAC-SHA256 of `payload`.
fn sign(key: &[u8], payload: &str) -> Option<String> {
    let mut mac = HmacSha256::new_from_slice(key).ok()?;
    mac.update(payload.as_bytes());
    Some(hex::encode(mac.finalize().into_bytes()))
}

/// 128 random bits, hex encoded.
fn generate_nonce() -> Option<String> {
    let mut bytes = [0u8; 16];
    SystemRandom::new().fill(&mut bytes).ok()?;
    Some(hex::encode(bytes))
}

/// Restrict redirect targets to same-site paths.
fn local_path(target: &str) -> &str {
    if target.starts_with('/') && !target.starts_with("//") {
        target
    } else {
        "/"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time_utils::FixedClock;
    use chrono::Duration;

    const NONCE: &str = "00112233445566778899aabbccddeeff";

    fn service_at(clock: FixedClock) -> IdentityService {
        IdentityService::new(&Config::test_default(), Arc::new(clock)).unwrap()
    }

    fn jar_with_nonce(nonce: &str) -> CookieJar {
        CookieJar::new().add(Cookie::new(OAUTH_STATE_COOKIE, nonce.to_string()))
    }

    #[test]
    fn test_state_roundtrip() {
        let service = service_at(FixedClock::new_year(2025));
        let state = service.sign_state("google", "/donate", NONCE).unwrap();

        assert_eq!(
            service.verify_state(&state),
            Some(VerifiedState {
                provider: "google".to_string(),
                redirect_to: "/donate".to_string(),
                nonce: NONCE.to_string(),
            })
        );
    }

    #[test]
    fn test_state_is_url_safe() {
        let service = service_at(FixedClock::new_year(2025));
        let state = service.sign_state("github", "/donate", NONCE).unwrap();

        assert!(!state.contains('+'));
        assert!(!state.contains('/'));
        assert!(!state.contains('='));
    }

    #[test]
    fn test_state_tampered_provider_rejected() {
        let service = service_at(FixedClock::new_year(2025));
        let state = service.sign_state("google", "/donate", NONCE).unwrap();

        let decoded = String::from_utf8(URL_SAFE_NO_PAD.decode(&state).unwrap()).unwrap();
        let forged = URL_SAFE_NO_PAD.encode(decoded.replacen("google", "github", 1));

        assert_eq!(service.verify_state(&forged), None);
    }

    #[test]
    fn test_state_wrong_key_rejected() {
        let service = service_at(FixedClock::new_year(2025));
        let state = service.sign_state("google", "/donate", NONCE).unwrap();

        let mut config = Config::test_default();
        config.oauth_state_key = b"another_key".to_vec();
        let other = IdentityService::new(&config, Arc::new(FixedClock::new_year(2025))).unwrap();

        assert_eq!(other.verify_state(&state), None);
    }

    #[test]
    fn test_state_expires() {
        let issued = FixedClock::new_year(2025);
        let state = service_at(issued)
            .sign_state("google", "/donate", NONCE)
            .unwrap();

        let later = FixedClock(issued.0 + Duration::minutes(11));
        assert_eq!(service_at(later).verify_state(&state), None);

        let soon = FixedClock(issued.0 + Duration::minutes(9));
        assert!(service_at(soon).verify_state(&state).is_some());
    }

    #[test]
    fn test_state_malformed() {
        let service = service_at(FixedClock::new_year(2025));
        assert_eq!(service.verify_state("not base64!!"), None);
        assert_eq!(service.verify_state(&URL_SAFE_NO_PAD.encode("a|b")), None);
    }

    #[test]
    fn test_start_session_known_provider() {
        let service = service_at(FixedClock::new_year(2025));
        let (jar, outcome) = service.start_session(CookieJar::new(), "github", "/donate");

        let target = outcome.target();
        assert!(target.starts_with("https://github.com/login/oauth/authorize?"));
        assert!(target.contains("client_id=github_test_id"));
        assert!(target.contains(
            "redirect_uri=http%3A%2F%2Flocalhost%3A3000%2Fauth%2Fcallback%2Fgithub"
        ));

        let state = target.rsplit_once("state=").unwrap().1;
        let verified = service.verify_state(state).unwrap();
        assert_eq!(verified.redirect_to, "/donate");

        let cookie = jar.get(OAUTH_STATE_COOKIE).expect("state cookie set");
        assert_eq!(cookie.value(), verified.nonce);
        assert_eq!(cookie.value().len(), 32);
        assert_eq!(cookie.path(), Some("/auth/callback"));
        assert_eq!(cookie.http_only(), Some(true));
        assert_eq!(cookie.same_site(), Some(SameSite::Lax));
        assert_eq!(cookie.max_age(), Some(time::Duration::minutes(10)));
    }

    #[test]
    fn test_start_session_nonces_differ() {
        let service = service_at(FixedClock::new_year(2025));
        let (first, _) = service.start_session(CookieJar::new(), "google", "/donate");
        let (second, _) = service.start_session(CookieJar::new(), "google", "/donate");

        assert_ne!(
            first.get(OAUTH_STATE_COOKIE).unwrap().value(),
            second.get(OAUTH_STATE_COOKIE).unwrap().value()
        );
    }

    #[test]
    fn test_start_session_unknown_provider() {
        let service = service_at(FixedClock::new_year(2025));
        let (jar, outcome) = service.start_session(CookieJar::new(), "myspace", "/donate");
        assert_eq!(outcome, AuthErrorKind::Configuration.redirect());
        assert!(jar.get(OAUTH_STATE_COOKIE).is_none());

        let (_, outcome) = service.start_session(CookieJar::new(), "", "/donate");
        assert_eq!(outcome.target(), "/auth/error?error=Configuration");
    }

    #[test]
    fn test_local_path() {
        assert_eq!(local_path("/donate"), "/donate");
        assert_eq!(local_path("//evil.example"), "/");
        assert_eq!(local_path("https://evil.example"), "/");
    }

    #[tokio::test]
    async fn test_callback_provider_error_is_access_denied() {
        let service = service_at(FixedClock::new_year(2025));
        let params = CallbackParams {
            error: Some("access_denied".to_string()),
            ..Default::default()
        };

        let (jar, outcome) = service
            .complete_sign_in(jar_with_nonce(NONCE), "google", &params)
            .await;
        assert_eq!(outcome, AuthErrorKind::AccessDenied.redirect());
        assert!(jar.get(OAUTH_STATE_COOKIE).is_none());
    }

    #[tokio::test]
    async fn test_callback_state_for_other_provider_rejected() {
        let service = service_at(FixedClock::new_year(2025));
        let params = CallbackParams {
            code: Some("code".to_string()),
            state: service.sign_state("github", "/donate", NONCE),
            error: None,
        };

        let (_, outcome) = service
            .complete_sign_in(jar_with_nonce(NONCE), "google", &params)
            .await;
        assert_eq!(outcome, AuthErrorKind::Verification.redirect());
    }

    #[tokio::test]
    async fn test_callback_from_another_browser_rejected() {
        let service = service_at(FixedClock::new_year(2025));
        let (_, outcome) = service.start_session(CookieJar::new(), "google", "/donate");
        let state = outcome.target().rsplit_once("state=").unwrap().1.to_string();
        let params = CallbackParams {
            code: Some("code".to_string()),
            state: Some(state),
            error: None,
        };

        // No state cookie at all.
        let (_, outcome) = service
            .complete_sign_in(CookieJar::new(), "google", &params)
            .await;
        assert_eq!(outcome, AuthErrorKind::Verification.redirect());

        // A state cookie from a different sign-in attempt.
        let (_, outcome) = service
            .complete_sign_in(jar_with_nonce(NONCE), "google", &params)
            .await;
        assert_eq!(outcome, AuthErrorKind::Verification.redirect());
    }

    #[tokio::test]
    async fn test_callback_without_code() {
        let service = service_at(FixedClock::new_year(2025));
        let params = CallbackParams {
            code: None,
            state: service.sign_state("google", "/donate", NONCE),
            error: None,
        };

        let (jar, outcome) = service
            .complete_sign_in(jar_with_nonce(NONCE), "google", &params)
            .await;
        assert_eq!(outcome, AuthErrorKind::OAuthCallback.redirect());
        assert!(jar.get(OAUTH_STATE_COOKIE).is_none());
    }

    #[test]
    fn test_error_kind_codes_roundtrip() {
        for kind in [
            AuthErrorKind::Configuration,
            AuthErrorKind::AccessDenied,
            AuthErrorKind::Verification,
            AuthErrorKind::OAuthCallback,
        ] {
            assert_eq!(AuthErrorKind::from_code(kind.code()), kind);
        }
        assert_eq!(AuthErrorKind::from_code("nonsense"), AuthErrorKind::Default);
    }
}
