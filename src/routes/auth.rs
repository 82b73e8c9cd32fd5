// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Identity provider callback, auth error page and session lookup.

use askama::Template;
use axum::{
    extract::{Path, Query, State},
    response::Html,
    routing::get,
    Extension, Json, Router,
};
use axum_extra::extract::cookie::CookieJar;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::actions::ActionOutcome;
use crate::error::Result;
use crate::middleware::CurrentSession;
use crate::routes::pages::render_page;
use crate::services::{AuthErrorKind, CallbackParams};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/auth/callback/{provider}", get(auth_callback))
        .route("/auth/error", get(auth_error))
        .route("/api/session", get(session))
}

/// OAuth callback - exchange code, create session, redirect to the stored target.
async fn auth_callback(
    State(state): State<Arc<AppState>>,
    Path(provider): Path<String>,
    jar: CookieJar,
    Query(params): Query<CallbackParams>,
) -> (CookieJar, ActionOutcome) {
    state.identity.complete_sign_in(jar, &provider, &params).await
}

#[derive(Deserialize)]
pub struct AuthErrorParams {
    #[serde(default)]
    error: Option<String>,
}

#[derive(Template)]
#[template(path = "auth_error.html")]
struct AuthErrorTemplate {
    message: &'static str,
}

async fn auth_error(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<CurrentSession>,
    Query(params): Query<AuthErrorParams>,
) -> Result<Html<String>> {
    let kind = params
        .error
        .as_deref()
        .map_or(AuthErrorKind::Default, AuthErrorKind::from_code);
    tracing::info!(error = kind.code(), "Showing auth error page");

    let body = AuthErrorTemplate {
        message: kind.message(),
    }
    .render()?;
    render_page(&state, &session, Some("Sign-in problem"), body)
}

#[derive(Serialize)]
pub struct SessionResponse {
    pub authenticated: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

/// Current session as seen by the browser.
async fn session(Extension(session): Extension<CurrentSession>) -> Json<SessionResponse> {
    let response = match session.0 {
        Some(user) => SessionResponse {
            authenticated: true,
            name: user.name,
            provider: Some(user.provider),
        },
        None => SessionResponse {
            authenticated: false,
            name: None,
            provider: None,
        },
    };
    Json(response)
}
