// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Signed-in user as carried in the session cookie.

use serde::{Deserialize, Serialize};

/// JWT claims structure.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (`provider:account-id`)
    pub sub: String,
    /// Identity provider that authenticated the user
    pub provider: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Expiration time (Unix timestamp)
    pub exp: usize,
    /// Issued at (Unix timestamp)
    pub iat: usize,
}

/// Profile returned by an identity provider after a successful sign-in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub provider: String,
    pub account_id: String,
    pub name: Option<String>,
}

impl Profile {
    pub fn subject(&self) -> String {
        format!("{}:{}", self.provider, self.account_id)
    }
}

/// Authenticated user extracted from the session cookie.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionUser {
    pub subject: String,
    pub provider: String,
    pub name: Option<String>,
}

impl SessionUser {
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("friend")
    }
}

impl From<Claims> for SessionUser {
    fn from(claims: Claims) -> Self {
        Self {
            subject: claims.sub,
            provider: claims.provider,
            name: claims.name,
        }
    }
}
