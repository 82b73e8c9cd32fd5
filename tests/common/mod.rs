// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::{http::header, response::Response};
use paperhearts::config::Config;
use paperhearts::models::{Profile, SiteMetadata};
use paperhearts::routes::create_router;
use paperhearts::services::IdentityService;
use paperhearts::time_utils::{Clock, FixedClock};
use paperhearts::AppState;
use std::sync::Arc;

/// Create a test app from `config` with time frozen in `year`.
#[allow(dead_code)]
pub fn create_test_app_with(config: Config, year: i32) -> (axum::Router, Arc<AppState>) {
    let clock: Arc<dyn Clock> = Arc::new(FixedClock::new_year(year));
    let identity =
        IdentityService::new(&config, clock.clone()).expect("Failed to build identity service");

    let state = Arc::new(AppState {
        metadata: SiteMetadata::paperhearts(&config.site_url),
        config,
        identity,
        clock,
    });

    (create_router(state.clone()), state)
}

/// Create a test app with default config.
/// Returns the router and the shared state.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>) {
    create_test_app_with(Config::test_default(), 2025)
}

/// Create a test app served from `site_url`.
#[allow(dead_code)]
pub fn create_test_app_with_site_url(site_url: &str) -> (axum::Router, Arc<AppState>) {
    let mut config = Config::test_default();
    config.site_url = site_url.to_string();
    create_test_app_with(config, 2025)
}

/// Session cookie header value for a signed-in test user.
#[allow(dead_code)]
pub fn session_cookie(state: &AppState, name: &str) -> String {
    let profile = Profile {
        provider: "github".to_string(),
        account_id: "583231".to_string(),
        name: Some(name.to_string()),
    };
    let token = paperhearts::middleware::session::create_session_jwt(
        &profile,
        &state.config.session_signing_key,
        chrono::Utc::now(),
    )
    .expect("Failed to create session token");
    format!("paperhearts_session={token}")
}

#[allow(dead_code)]
pub async fn body_string(response: Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("Failed to read body");
    String::from_utf8(bytes.to_vec()).expect("Body is not UTF-8")
}

/// All `Set-Cookie` header values on a response.
#[allow(dead_code)]
pub fn set_cookie_headers(response: &Response) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .map(|value| value.to_str().unwrap().to_string())
        .collect()
}

/// The `Set-Cookie` value for cookie `name`.
#[allow(dead_code)]
pub fn find_cookie(headers: &[String], name: &str) -> String {
    headers
        .iter()
        .find(|value| value.starts_with(&format!("{name}=")))
        .cloned()
        .unwrap_or_else(|| panic!("missing Set-Cookie header for {name}: {headers:?}"))
}

#[allow(dead_code)]
pub fn location(response: &Response) -> String {
    response
        .headers()
        .get(header::LOCATION)
        .expect("missing Location header")
        .to_str()
        .unwrap()
        .to_string()
}
