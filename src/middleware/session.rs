// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Session cookie middleware.
//!
//! Pages are public, so a missing or invalid session is not an error: the
//! request simply carries `CurrentSession(None)`.

use crate::models::{Claims, Profile, SessionUser};
use crate::services::identity::SESSION_TTL_DAYS;
use crate::AppState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use axum_extra::extract::cookie::CookieJar;
use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::sync::Arc;

/// Name of the session cookie.
pub const SESSION_COOKIE: &str = "paperhearts_session";

/// Session attached to every request by [`attach_session`].
#[derive(Debug, Clone, Default)]
pub struct CurrentSession(pub Option<SessionUser>);

/// Middleware that decodes the session cookie, if any.
pub async fn attach_session(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let user = jar
        .get(SESSION_COOKIE)
        .and_then(|cookie| decode_session(cookie.value(), &state.config.session_signing_key));

    request.extensions_mut().insert(CurrentSession(user));
    next.run(request).await
}

/// Validate a session JWT and extract the user.
pub fn decode_session(token: &str, signing_key: &[u8]) -> Option<SessionUser> {
    let key = DecodingKey::from_secret(signing_key);
    let validation = Validation::new(Algorithm::HS256);

    match decode::<Claims>(token, &key, &validation) {
        Ok(data) => Some(data.claims.into()),
        Err(e) => {
            tracing::debug!(error = %e, "Ignoring invalid session cookie");
            None
        }
    }
}

/// Create a JWT for a user session.
pub fn create_session_jwt(
    profile: &Profile,
    signing_key: &[u8],
    now: DateTime<Utc>,
) -> jsonwebtoken::errors::Result<String> {
    let iat = usize::try_from(now.timestamp()).unwrap_or(0);

    let claims = Claims {
        sub: profile.subject(),
        provider: profile.provider.clone(),
        name: profile.name.clone(),
        iat,
        exp: iat + (SESSION_TTL_DAYS as usize) * 24 * 60 * 60,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(signing_key),
    )
}
