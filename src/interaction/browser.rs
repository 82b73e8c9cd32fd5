// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! `web-sys` implementation of the interaction DOM, and the WebAssembly entry point.

use super::{install_all, Dom, DomEvent, Element};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, Window};

#[derive(Clone)]
pub struct BrowserElement(HtmlElement);

impl Element for BrowserElement {
    fn toggle_class(&self, class: &str) -> bool {
        self.0.class_list().toggle(class).unwrap_or(false)
    }

    fn set_class(&self, class: &str, present: bool) {
        let list = self.0.class_list();
        let result = if present {
            list.add_1(class)
        } else {
            list.remove_1(class)
        };
        if result.is_err() {
            web_sys::console::warn_1(&JsValue::from_str(&format!("invalid class token {class}")));
        }
    }

    fn has_class(&self, class: &str) -> bool {
        self.0.class_list().contains(class)
    }

    fn set_style(&self, property: &str, value: &str) {
        // Assigning an empty value removes the inline declaration.
        if self.0.style().set_property(property, value).is_err() {
            web_sys::console::warn_1(&JsValue::from_str(&format!(
                "could not set style {property}: {value}"
            )));
        }
    }

    fn style(&self, property: &str) -> String {
        self.0
            .style()
            .get_property_value(property)
            .unwrap_or_default()
    }
}

/// The live page document.
pub struct BrowserDom {
    window: Window,
    document: Document,
}

impl BrowserDom {
    pub fn new() -> Option<Self> {
        let window = web_sys::window()?;
        let document = window.document()?;
        Some(Self { window, document })
    }
}

impl Dom for BrowserDom {
    type Element = BrowserElement;

    fn query_selector(&self, selector: &str) -> Option<BrowserElement> {
        self.document
            .query_selector(selector)
            .ok()
            .flatten()?
            .dyn_into::<HtmlElement>()
            .ok()
            .map(BrowserElement)
    }

    fn query_selector_all(&self, selector: &str) -> Vec<BrowserElement> {
        let Ok(nodes) = self.document.query_selector_all(selector) else {
            return Vec::new();
        };
        (0..nodes.length())
            .filter_map(|i| nodes.item(i))
            .filter_map(|node| node.dyn_into::<HtmlElement>().ok())
            .map(BrowserElement)
            .collect()
    }

    fn listen(&self, target: &BrowserElement, event: DomEvent, handler: Box<dyn Fn()>) {
        let closure = Closure::wrap(handler);
        if target
            .0
            .add_event_listener_with_callback(event.name(), closure.as_ref().unchecked_ref())
            .is_ok()
        {
            // Listeners live as long as the page.
            closure.forget();
        }
    }

    fn listen_scroll(&self, handler: Box<dyn Fn(f64)>) {
        let window = self.window.clone();
        let closure = Closure::<dyn Fn()>::new(move || {
            handler(window.scroll_y().unwrap_or(0.0));
        });
        if self
            .window
            .add_event_listener_with_callback("scroll", closure.as_ref().unchecked_ref())
            .is_ok()
        {
            closure.forget();
        }
    }
}

/// Module entry point, run once when the bundle loads.
#[wasm_bindgen(start)]
pub fn start() {
    let Some(dom) = BrowserDom::new() else {
        return;
    };

    let report = install_all(&dom);
    for failure in report.failures() {
        web_sys::console::warn_1(&JsValue::from_str(&failure.to_string()));
    }
}
