// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Data models for the application.

pub mod metadata;
pub mod session;

pub use metadata::SiteMetadata;
pub use session::{Claims, Profile, SessionUser};
