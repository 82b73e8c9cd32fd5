// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - identity provider integration.

pub mod identity;
pub mod provider;

pub use identity::{AuthErrorKind, CallbackParams, IdentityService, OAUTH_STATE_COOKIE};
pub use provider::{ProviderClient, ProviderConfig};
