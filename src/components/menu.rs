use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlElement, KeyboardEvent};

use crate::dom::{ListenOptions, Listener};

const BUTTON_ID: &str = "mobile-menu-button";
const MENU_ID: &str = "mobile-menu";
const HIDDEN_CLASS: &str = "hidden";

#[derive(Clone)]
struct MobileMenuParts {
    document: Document,
    button: Element,
    menu: Element,
}

impl MobileMenuParts {
    fn is_open(&self) -> bool {
        !self.menu.class_list().contains(HIDDEN_CLASS)
    }

    fn set_open(&self, open: bool) {
        let _ = self.menu.class_list().toggle_with_force(HIDDEN_CLASS, !open);
        let _ = self.button.set_attribute("aria-expanded", if open { "true" } else { "false" });

        if let Some(body) = self.document.body() {
            let style = body.style();
            if open {
                let _ = style.set_property("overflow", "hidden");
            } else {
                let _ = style.remove_property("overflow");
            }
        }

        if open {
            if let Some(first) = self
                .menu
                .query_selector("a, button")
                .ok()
                .flatten()
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            {
                let _ = first.focus();
            }
        }
    }

    fn focus_button(&self) {
        if let Some(button) = self.button.dyn_ref::<HtmlElement>() {
            let _ = button.focus();
        }
    }
}

pub struct MobileMenu {
    _listeners: [Listener; 3],
}

impl MobileMenu {
    pub fn attach(document: &Document) -> Option<Self> {
        let (Some(button), Some(menu)) = (
            document.get_element_by_id(BUTTON_ID),
            document.get_element_by_id(MENU_ID),
        ) else {
            debug!("No mobile menu on this page");
            return None;
        };
        let parts = MobileMenuParts {
            document: document.clone(),
            button,
            menu,
        };

        let on_toggle = {
            let menu = parts.clone();
            Listener::new(&parts.button, "click", ListenOptions::default(), move |_| {
                menu.set_open(!menu.is_open());
            })
        };

        let on_escape = {
            let menu = parts.clone();
            Listener::new(document, "keydown", ListenOptions::default(), move |e: Event| {
                let escape = e
                    .dyn_ref::<KeyboardEvent>()
                    .map_or(false, |k| k.key() == "Escape");
                if escape && menu.is_open() {
                    menu.set_open(false);
                    menu.focus_button();
                }
            })
        };

        // Any link inside the menu closes it.
        let on_link = {
            let menu = parts.clone();
            Listener::new(&parts.menu, "click", ListenOptions::default(), move |e: Event| {
                let on_link = e
                    .target()
                    .and_then(|t| t.dyn_into::<Element>().ok())
                    .and_then(|el| el.closest("a").ok().flatten())
                    .is_some();
                if on_link {
                    menu.set_open(false);
                }
            })
        };

        Some(Self {
            _listeners: [on_toggle, on_escape, on_link],
        })
    }
}
