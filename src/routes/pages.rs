// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Content pages, each wrapped in the page shell.

use askama::Template;
use axum::{
    extract::State,
    response::Html,
    routing::get,
    Extension, Router,
};
use std::sync::Arc;

use crate::error::Result;
use crate::middleware::CurrentSession;
use crate::shell::{render_shell, NavView, Page, ProviderButton};
use crate::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(home))
        .route("/about", get(about))
        .route("/team", get(team))
        .route("/donate", get(donate))
}

#[derive(Template)]
#[template(path = "home.html")]
struct HomeTemplate;

#[derive(Template)]
#[template(path = "about.html")]
struct AboutTemplate;

#[derive(Template)]
#[template(path = "team.html")]
struct TeamTemplate;

#[derive(Template)]
#[template(path = "donate.html")]
struct DonateTemplate<'a> {
    name: Option<&'a str>,
}

/// Wrap rendered page content in the shell for the current visitor.
pub(crate) fn render_page(
    state: &AppState,
    session: &CurrentSession,
    title: Option<&str>,
    body: String,
) -> Result<Html<String>> {
    let nav = NavView {
        providers: state
            .identity
            .providers()
            .iter()
            .map(ProviderButton::from)
            .collect(),
        user: session.0.clone(),
    };
    let page = Page {
        title: title.map(str::to_string),
        body,
    };

    let html = render_shell(&page, &state.metadata, &nav, state.clock.as_ref())?;
    Ok(Html(html))
}

async fn home(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<CurrentSession>,
) -> Result<Html<String>> {
    render_page(&state, &session, None, HomeTemplate.render()?)
}

async fn about(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<CurrentSession>,
) -> Result<Html<String>> {
    render_page(&state, &session, Some("About Us"), AboutTemplate.render()?)
}

async fn team(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<CurrentSession>,
) -> Result<Html<String>> {
    render_page(&state, &session, Some("Meet the Team"), TeamTemplate.render()?)
}

async fn donate(
    State(state): State<Arc<AppState>>,
    Extension(session): Extension<CurrentSession>,
) -> Result<Html<String>> {
    let body = DonateTemplate {
        name: session.0.as_ref().map(|user| user.display_name()),
    }
    .render()?;
    render_page(&state, &session, Some("Donate"), body)
}
