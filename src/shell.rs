// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Page shell: the document wrapped around every page.
//!
//! The shell owns the head metadata, navigation bar and footer. Page content
//! is rendered separately and inserted verbatim into `<main>`.

use crate::models::{SessionUser, SiteMetadata};
use crate::services::ProviderConfig;
use crate::time_utils::Clock;
use askama::Template;

/// Link in the navigation bar or footer.
#[derive(Debug, Clone, Copy)]
pub struct NavLink {
    pub href: &'static str,
    pub label: &'static str,
}

/// Footer link to an external profile, rendered as an icon.
#[derive(Debug, Clone, Copy)]
pub struct SocialLink {
    pub href: &'static str,
    /// Accessible name; the icon itself is decorative
    pub label: &'static str,
    pub icon: &'static str,
    /// SVG path data on a 24x24 stroked grid
    pub glyph: &'static str,
    /// Opens in a new tab
    pub external: bool,
}

pub const NAV_LINKS: [NavLink; 4] = [
    NavLink { href: "/", label: "Home" },
    NavLink { href: "/about", label: "About Us" },
    NavLink { href: "/team", label: "Meet the Team" },
    NavLink { href: "/donate", label: "Donate" },
];

pub const FOOTER_LINKS: [NavLink; 3] = [
    NavLink { href: "/", label: "Home" },
    NavLink { href: "/about", label: "About Us" },
    NavLink { href: "/team", label: "Meet the Team" },
];

pub const SOCIAL_LINKS: [SocialLink; 3] = [
    SocialLink {
        href: "https://www.instagram.com/PaperHeartsstudentled/",
        label: "Follow PaperHearts on Instagram",
        icon: "instagram",
        glyph: "M7 2h10a5 5 0 0 1 5 5v10a5 5 0 0 1-5 5H7a5 5 0 0 1-5-5V7a5 5 0 0 1 5-5z\
                M12 8a4 4 0 1 0 0 8a4 4 0 1 0 0-8zM17.5 6.5h.01",
        external: true,
    },
    SocialLink {
        href: "https://www.linkedin.com/company/PaperHearts-inc/",
        label: "Follow PaperHearts on LinkedIn",
        icon: "linkedin",
        glyph: "M16 8a6 6 0 0 1 6 6v7h-4v-7a2 2 0 0 0-4 0v7h-4v-7a6 6 0 0 1 6-6z\
                M2 9h4v12H2zM4 2a2 2 0 1 1 0 4a2 2 0 1 1 0-4z",
        external: true,
    },
    SocialLink {
        href: "mailto:akki.akella@gmail.com",
        label: "Email PaperHearts",
        icon: "mail",
        glyph: "M4 4h16a2 2 0 0 1 2 2v12a2 2 0 0 1-2 2H4a2 2 0 0 1-2-2V6a2 2 0 0 1 2-2zM22 6l-10 7L2 6",
        external: false,
    },
];

/// Sign-in button for one identity provider.
#[derive(Debug, Clone)]
pub struct ProviderButton {
    pub id: String,
    pub label: String,
}

impl From<&ProviderConfig> for ProviderButton {
    fn from(provider: &ProviderConfig) -> Self {
        Self {
            id: provider.id.clone(),
            label: format!("Sign in with {}", provider.name),
        }
    }
}

/// What the navigation bar needs to know about the visitor.
#[derive(Debug, Clone, Default)]
pub struct NavView {
    pub providers: Vec<ProviderButton>,
    pub user: Option<SessionUser>,
}

/// Rendered page content plus its title.
#[derive(Debug, Clone, Default)]
pub struct Page {
    /// Substituted into the title template; `None` uses the site default
    pub title: Option<String>,
    /// Pre-rendered HTML
    pub body: String,
}

#[derive(Template)]
#[template(path = "shell.html")]
struct ShellTemplate<'a> {
    title: String,
    meta: &'a SiteMetadata,
    keywords: String,
    robots: String,
    googlebot: String,
    nav_links: &'a [NavLink],
    providers: &'a [ProviderButton],
    signed_in_as: Option<&'a str>,
    content: &'a str,
    year: i32,
    footer_links: &'a [NavLink],
    social_links: &'a [SocialLink],
}

/// Render a complete HTML document around `page`.
///
/// The copyright year is read from `clock` on every call.
pub fn render_shell(
    page: &Page,
    metadata: &SiteMetadata,
    nav: &NavView,
    clock: &dyn Clock,
) -> askama::Result<String> {
    ShellTemplate {
        title: metadata.resolve_title(page.title.as_deref()),
        meta: metadata,
        keywords: metadata.keywords_content(),
        robots: metadata.robots.content(),
        googlebot: metadata.robots.google_bot.content(),
        nav_links: &NAV_LINKS,
        providers: &nav.providers,
        signed_in_as: nav.user.as_ref().map(SessionUser::display_name),
        content: &page.body,
        year: clock.current_year(),
        footer_links: &FOOTER_LINKS,
        social_links: &SOCIAL_LINKS,
    }
    .render()
}
