use std::cell::RefCell;

use log::info;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{Event, PageTransitionEvent};

mod app;
mod config;
mod dom;
mod timer;
mod carousel {
    pub mod controller;
    pub mod view;
    pub mod widget;
}
mod components {
    pub mod anchors;
    pub mod images;
    pub mod menu;
    pub mod reveal;
    pub mod scroll;
    pub mod tracking;
    pub mod year;
}

use app::Page;
use config::PageConfig;
use dom::{ListenOptions, Listener};

thread_local! {
    static PAGE: RefCell<Option<Page>> = RefCell::new(None);
}

fn start() -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;

    let config = PageConfig::load(&document);
    let page = Page::assemble(&window, &document, config);
    // Replacing an older page drops it, tearing down its timers and listeners.
    PAGE.with(|slot| *slot.borrow_mut() = Some(page));
    Ok(())
}

fn start_or_report() {
    if let Err(e) = start() {
        gloo_console::error!("Failed to initialize page:", e);
    }
}

fn main() {
    // Initialize console error panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging
    console_log::init_with_level(config::log_level()).expect("error initializing log");

    let Some(window) = web_sys::window() else { return };
    let Some(document) = window.document() else { return };

    if document.ready_state() == "loading" {
        Listener::new(&document, "DOMContentLoaded", ListenOptions::ONCE, |_| start_or_report())
            .forget();
    } else {
        start_or_report();
    }

    Listener::new(&window, "pagehide", ListenOptions::default(), |_| {
        info!("Page hidden, detaching behaviors");
        PAGE.with(|slot| slot.borrow_mut().take());
    })
    .forget();

    // Restored from the back/forward cache: everything was detached on pagehide.
    Listener::new(&window, "pageshow", ListenOptions::default(), |e: Event| {
        let persisted = e
            .dyn_ref::<PageTransitionEvent>()
            .map_or(false, |e| e.persisted());
        if persisted {
            start_or_report();
        }
    })
    .forget();
}
