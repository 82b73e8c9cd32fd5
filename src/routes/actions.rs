// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Form endpoints for the sign-in and sign-out actions.

use axum::{extract::State, routing::post, Form, Router};
use axum_extra::extract::cookie::CookieJar;
use std::sync::Arc;

use crate::actions::{self, ActionOutcome, LoginForm};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/actions/login", post(login))
        .route("/actions/logout", post(logout))
}

async fn login(
    State(state): State<Arc<AppState>>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> (CookieJar, ActionOutcome) {
    actions::start_social_login(&state.identity, jar, &form)
}

async fn logout(State(state): State<Arc<AppState>>, jar: CookieJar) -> (CookieJar, ActionOutcome) {
    actions::logout(&state.identity, jar)
}
