// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Sign-in and sign-out actions invoked from the page forms.
//!
//! Both actions hand the session over to a [`SessionAuthority`] and always
//! end the request with a redirect. Provider validation belongs to the
//! authority; nothing here inspects the submitted provider identifier.

use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

/// Where the browser lands after a successful sign-in.
pub const POST_LOGIN_REDIRECT: &str = "/donate";
/// Where the browser lands after signing out.
pub const POST_LOGOUT_REDIRECT: &str = "/";

/// Terminal result of an auth action. The request ends here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionOutcome {
    Redirect(String),
}

impl ActionOutcome {
    pub fn target(&self) -> &str {
        match self {
            ActionOutcome::Redirect(target) => target,
        }
    }
}

impl IntoResponse for ActionOutcome {
    fn into_response(self) -> Response {
        match self {
            ActionOutcome::Redirect(target) => Redirect::to(&target).into_response(),
        }
    }
}

/// Owner of the user session. Creates it by sending the browser to an
/// identity provider and destroys it on sign-out.
pub trait SessionAuthority: Send + Sync {
    fn start_session(
        &self,
        jar: CookieJar,
        provider: &str,
        redirect_to: &str,
    ) -> (CookieJar, ActionOutcome);

    fn end_session(&self, jar: CookieJar, redirect_to: &str) -> (CookieJar, ActionOutcome);
}

/// Sign-in form body.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginForm {
    /// Provider identifier from the clicked button
    #[serde(default)]
    pub action: String,
}

/// Start a social login with the provider named in the form.
pub fn start_social_login(
    authority: &dyn SessionAuthority,
    jar: CookieJar,
    form: &LoginForm,
) -> (CookieJar, ActionOutcome) {
    let (jar, outcome) = authority.start_session(jar, &form.action, POST_LOGIN_REDIRECT);
    tracing::info!(provider = %form.action, "Social login started");
    (jar, outcome)
}

/// End the current session.
pub fn logout(authority: &dyn SessionAuthority, jar: CookieJar) -> (CookieJar, ActionOutcome) {
    authority.end_session(jar, POST_LOGOUT_REDIRECT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{header, StatusCode};
    use std::sync::Mutex;

    #[derive(Debug, PartialEq)]
    enum Call {
        Start { provider: String, redirect_to: String },
        End { redirect_to: String },
    }

    #[derive(Default)]
    struct RecordingAuthority {
        calls: Mutex<Vec<Call>>,
    }

    impl SessionAuthority for RecordingAuthority {
        fn start_session(
            &self,
            jar: CookieJar,
            provider: &str,
            redirect_to: &str,
        ) -> (CookieJar, ActionOutcome) {
            self.calls.lock().unwrap().push(Call::Start {
                provider: provider.to_string(),
                redirect_to: redirect_to.to_string(),
            });
            (jar, ActionOutcome::Redirect(format!("https://idp.test/{provider}")))
        }

        fn end_session(&self, jar: CookieJar, redirect_to: &str) -> (CookieJar, ActionOutcome) {
            self.calls.lock().unwrap().push(Call::End {
                redirect_to: redirect_to.to_string(),
            });
            (jar, ActionOutcome::Redirect(redirect_to.to_string()))
        }
    }

    #[test]
    fn test_login_delegates_provider_and_donate_target() {
        let authority = RecordingAuthority::default();

        for provider in ["google", "github"] {
            let form = LoginForm {
                action: provider.to_string(),
            };
            let (_, outcome) = start_social_login(&authority, CookieJar::new(), &form);
            assert_eq!(outcome.target(), format!("https://idp.test/{provider}"));
        }

        assert_eq!(
            *authority.calls.lock().unwrap(),
            vec![
                Call::Start {
                    provider: "google".to_string(),
                    redirect_to: "/donate".to_string()
                },
                Call::Start {
                    provider: "github".to_string(),
                    redirect_to: "/donate".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_login_passes_unknown_provider_through() {
        let authority = RecordingAuthority::default();
        let form = LoginForm {
            action: "myspace".to_string(),
        };

        let _ = start_social_login(&authority, CookieJar::new(), &form);

        assert_eq!(
            *authority.calls.lock().unwrap(),
            vec![Call::Start {
                provider: "myspace".to_string(),
                redirect_to: POST_LOGIN_REDIRECT.to_string()
            }]
        );
    }

    #[test]
    fn test_logout_delegates_root_target() {
        let authority = RecordingAuthority::default();

        let (_, outcome) = logout(&authority, CookieJar::new());

        assert_eq!(outcome, ActionOutcome::Redirect("/".to_string()));
        assert_eq!(
            *authority.calls.lock().unwrap(),
            vec![Call::End {
                redirect_to: "/".to_string()
            }]
        );
    }

    #[test]
    fn test_outcome_is_see_other_redirect() {
        let response = ActionOutcome::Redirect("/donate".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/donate");
    }
}
