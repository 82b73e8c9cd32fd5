// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! PaperHearts: handmade art for every heart and community.
//!
//! This crate serves the PaperHearts website: a server-rendered page shell,
//! social login through external identity providers, and the browser-side
//! interaction bindings (compiled to WebAssembly with the `browser` feature).

pub mod interaction;

#[cfg(feature = "server")]
pub mod actions;
#[cfg(feature = "server")]
pub mod config;
#[cfg(feature = "server")]
pub mod error;
#[cfg(feature = "server")]
pub mod middleware;
#[cfg(feature = "server")]
pub mod models;
#[cfg(feature = "server")]
pub mod routes;
#[cfg(feature = "server")]
pub mod services;
#[cfg(feature = "server")]
pub mod shell;
#[cfg(feature = "server")]
pub mod time_utils;

#[cfg(feature = "server")]
pub use state::AppState;

#[cfg(feature = "server")]
mod state {
    use crate::config::Config;
    use crate::models::SiteMetadata;
    use crate::services::IdentityService;
    use crate::time_utils::Clock;
    use std::sync::Arc;

    /// Shared application state.
    pub struct AppState {
        pub config: Config,
        pub metadata: SiteMetadata,
        pub identity: IdentityService,
        pub clock: Arc<dyn Clock>,
    }
}
