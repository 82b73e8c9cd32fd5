// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Browser interaction bindings.
//!
//! Three independent reactions to DOM events:
//! - the hamburger control toggles the `active` class on `.nav-links`
//! - window scroll sets `scrolled` on `.navbar` while at least 50px down
//! - hovering a `.fa-heart` icon plays the `beat` animation
//!
//! Bindings are written against the [`Dom`] trait so they run unchanged in
//! the browser (feature `browser`) and against [`memory::MemoryDom`] in tests.
//! Each binding resolves its own targets; a missing target fails only that
//! binding.

pub mod memory;

#[cfg(feature = "browser")]
pub mod browser;

/// Control that opens the mobile navigation panel.
pub const NAV_TOGGLE_SELECTOR: &str = ".hamburger";
/// Mobile navigation panel.
pub const NAV_PANEL_SELECTOR: &str = ".nav-links";
/// Navigation bar restyled on scroll.
pub const NAVBAR_SELECTOR: &str = ".navbar";
/// Heart icons that beat on hover.
pub const HEART_SELECTOR: &str = ".fa-heart";

pub const ACTIVE_CLASS: &str = "active";
pub const SCROLLED_CLASS: &str = "scrolled";

/// Vertical offset in pixels from which the navbar counts as scrolled.
pub const SCROLL_THRESHOLD_PX: f64 = 50.0;

pub const HEART_ANIMATION: &str = "beat 0.6s";

/// Events the bindings listen for on elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomEvent {
    Click,
    MouseEnter,
    MouseLeave,
}

impl DomEvent {
    pub fn name(self) -> &'static str {
        match self {
            DomEvent::Click => "click",
            DomEvent::MouseEnter => "mouseenter",
            DomEvent::MouseLeave => "mouseleave",
        }
    }
}

/// Minimal element surface the bindings need.
pub trait Element {
    /// Flip `class`, returning whether it is now present.
    fn toggle_class(&self, class: &str) -> bool;
    fn set_class(&self, class: &str, present: bool);
    fn has_class(&self, class: &str) -> bool;
    fn set_style(&self, property: &str, value: &str);
    fn style(&self, property: &str) -> String;
}

/// Document lookups and event registration.
pub trait Dom {
    type Element: Element + Clone + 'static;

    fn query_selector(&self, selector: &str) -> Option<Self::Element>;
    fn query_selector_all(&self, selector: &str) -> Vec<Self::Element>;
    fn listen(&self, target: &Self::Element, event: DomEvent, handler: Box<dyn Fn()>);
    /// Register a window scroll handler receiving the vertical offset.
    fn listen_scroll(&self, handler: Box<dyn Fn(f64)>);
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindingError {
    #[error("no element matches {0}")]
    MissingTarget(&'static str),
}

/// Toggle the navigation panel; returns whether it is now open.
pub fn toggle_nav(panel: &impl Element) -> bool {
    panel.toggle_class(ACTIVE_CLASS)
}

/// Recompute the navbar's scrolled state from the current offset.
pub fn apply_scroll(navbar: &impl Element, scroll_y: f64) {
    navbar.set_class(SCROLLED_CLASS, scroll_y >= SCROLL_THRESHOLD_PX);
}

pub fn start_heartbeat(heart: &impl Element) {
    heart.set_style("animation", HEART_ANIMATION);
}

pub fn stop_heartbeat(heart: &impl Element) {
    heart.set_style("animation", "");
}

fn require<D: Dom>(dom: &D, selector: &'static str) -> Result<D::Element, BindingError> {
    dom.query_selector(selector)
        .ok_or(BindingError::MissingTarget(selector))
}

/// Bind the hamburger control to the navigation panel.
pub fn bind_nav_toggle<D: Dom>(dom: &D) -> Result<(), BindingError> {
    let control = require(dom, NAV_TOGGLE_SELECTOR)?;
    let panel = require(dom, NAV_PANEL_SELECTOR)?;

    dom.listen(
        &control,
        DomEvent::Click,
        Box::new(move || {
            toggle_nav(&panel);
        }),
    );
    Ok(())
}

/// Bind window scroll to the navbar's scrolled state.
pub fn bind_scroll_style<D: Dom>(dom: &D) -> Result<(), BindingError> {
    let navbar = require(dom, NAVBAR_SELECTOR)?;
    dom.listen_scroll(Box::new(move |scroll_y| apply_scroll(&navbar, scroll_y)));
    Ok(())
}

/// Bind hover animation on every heart icon; returns how many were bound.
pub fn bind_heartbeats<D: Dom>(dom: &D) -> usize {
    let hearts = dom.query_selector_all(HEART_SELECTOR);
    for heart in &hearts {
        let entered = heart.clone();
        dom.listen(
            heart,
            DomEvent::MouseEnter,
            Box::new(move || start_heartbeat(&entered)),
        );
        let left = heart.clone();
        dom.listen(
            heart,
            DomEvent::MouseLeave,
            Box::new(move || stop_heartbeat(&left)),
        );
    }
    hearts.len()
}

/// Outcome of [`install_all`], one entry per binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallReport {
    pub nav_toggle: Result<(), BindingError>,
    pub scroll_style: Result<(), BindingError>,
    pub hearts: usize,
}

impl InstallReport {
    pub fn failures(&self) -> impl Iterator<Item = &BindingError> {
        [&self.nav_toggle, &self.scroll_style]
            .into_iter()
            .filter_map(|result| result.as_ref().err())
    }
}

/// Install every binding. Failures are logged and do not stop the others.
pub fn install_all<D: Dom>(dom: &D) -> InstallReport {
    let report = InstallReport {
        nav_toggle: bind_nav_toggle(dom),
        scroll_style: bind_scroll_style(dom),
        hearts: bind_heartbeats(dom),
    };

    for failure in report.failures() {
        tracing::warn!(error = %failure, "Interaction binding skipped");
    }
    tracing::debug!(hearts = report.hearts, "Interaction bindings installed");

    report
}
