// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory DOM for exercising the bindings outside a browser.
//!
//! Only class selectors (`.name`) are supported.

use super::{Dom, DomEvent, Element};
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::rc::Rc;

#[derive(Debug, Default)]
struct Node {
    classes: BTreeSet<String>,
    styles: BTreeMap<String, String>,
}

/// Handle to an element in a [`MemoryDom`].
#[derive(Debug, Clone)]
pub struct MemoryElement {
    id: usize,
    node: Rc<RefCell<Node>>,
}

impl MemoryElement {
    fn matches(&self, selector: &str) -> bool {
        selector
            .strip_prefix('.')
            .is_some_and(|class| self.has_class(class))
    }
}

impl Element for MemoryElement {
    fn toggle_class(&self, class: &str) -> bool {
        let mut node = self.node.borrow_mut();
        if node.classes.remove(class) {
            false
        } else {
            node.classes.insert(class.to_string());
            true
        }
    }

    fn set_class(&self, class: &str, present: bool) {
        let mut node = self.node.borrow_mut();
        if present {
            node.classes.insert(class.to_string());
        } else {
            node.classes.remove(class);
        }
    }

    fn has_class(&self, class: &str) -> bool {
        self.node.borrow().classes.contains(class)
    }

    fn set_style(&self, property: &str, value: &str) {
        let mut node = self.node.borrow_mut();
        if value.is_empty() {
            node.styles.remove(property);
        } else {
            node.styles.insert(property.to_string(), value.to_string());
        }
    }

    fn style(&self, property: &str) -> String {
        self.node
            .borrow()
            .styles
            .get(property)
            .cloned()
            .unwrap_or_default()
    }
}

type Listener = (usize, DomEvent, Rc<dyn Fn()>);

/// Document with a flat list of elements and synchronous event dispatch.
#[derive(Default)]
pub struct MemoryDom {
    elements: RefCell<Vec<MemoryElement>>,
    listeners: RefCell<Vec<Listener>>,
    scroll_listeners: RefCell<Vec<Rc<dyn Fn(f64)>>>,
}

impl MemoryDom {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an element carrying `classes`.
    pub fn insert(&self, classes: &[&str]) -> MemoryElement {
        let mut elements = self.elements.borrow_mut();
        let element = MemoryElement {
            id: elements.len(),
            node: Rc::new(RefCell::new(Node {
                classes: classes.iter().map(|c| c.to_string()).collect(),
                styles: BTreeMap::new(),
            })),
        };
        elements.push(element.clone());
        element
    }

    /// The elements the site shell renders for the bindings.
    pub fn with_site_shell(hearts: usize) -> Self {
        let dom = Self::new();
        dom.insert(&["navbar"]);
        dom.insert(&["hamburger"]);
        dom.insert(&["nav-links"]);
        for _ in 0..hearts {
            dom.insert(&["fa-solid", "fa-heart"]);
        }
        dom
    }

    /// Fire `event` on `target`, running its listeners in registration order.
    pub fn dispatch(&self, target: &MemoryElement, event: DomEvent) {
        let handlers: Vec<Rc<dyn Fn()>> = self
            .listeners
            .borrow()
            .iter()
            .filter(|(id, ev, _)| *id == target.id && *ev == event)
            .map(|(_, _, handler)| Rc::clone(handler))
            .collect();

        for handler in handlers {
            handler();
        }
    }

    /// Scroll the window to `scroll_y` and fire the scroll event.
    pub fn scroll_to(&self, scroll_y: f64) {
        let handlers: Vec<Rc<dyn Fn(f64)>> =
            self.scroll_listeners.borrow().iter().map(Rc::clone).collect();

        for handler in handlers {
            handler(scroll_y);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.borrow().len() + self.scroll_listeners.borrow().len()
    }
}

impl Dom for MemoryDom {
    type Element = MemoryElement;

    fn query_selector(&self, selector: &str) -> Option<MemoryElement> {
        self.elements
            .borrow()
            .iter()
            .find(|el| el.matches(selector))
            .cloned()
    }

    fn query_selector_all(&self, selector: &str) -> Vec<MemoryElement> {
        self.elements
            .borrow()
            .iter()
            .filter(|el| el.matches(selector))
            .cloned()
            .collect()
    }

    fn listen(&self, target: &MemoryElement, event: DomEvent, handler: Box<dyn Fn()>) {
        self.listeners
            .borrow_mut()
            .push((target.id, event, Rc::from(handler)));
    }

    fn listen_scroll(&self, handler: Box<dyn Fn(f64)>) {
        self.scroll_listeners.borrow_mut().push(Rc::from(handler));
    }
}
