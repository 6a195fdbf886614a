use wasm_bindgen::JsCast;
use web_sys::{Document, Element, ScrollBehavior, ScrollIntoViewOptions, ScrollLogicalPosition};

use crate::dom::{self, ListenOptions, Listener};

/// Returns the selector an in-page link points at, if it points anywhere.
pub fn fragment_target(href: &str) -> Option<&str> {
    (href.starts_with('#') && href.len() > 1).then_some(href)
}

fn scroll_to(document: &Document, href: &str) {
    let Some(selector) = fragment_target(href) else { return };
    // An id that isn't a valid selector throws; treat it like a missing target.
    let Some(target) = dom::select(document, selector) else { return };

    let opts = ScrollIntoViewOptions::new();
    opts.set_behavior(ScrollBehavior::Smooth);
    opts.set_block(ScrollLogicalPosition::Start);
    target.scroll_into_view_with_scroll_into_view_options(&opts);
}

/// Smooth scrolling for every `a[href^="#"]` on the page.
pub fn attach(document: &Document) -> Vec<Listener> {
    dom::select_all(document, r##"a[href^="#"]"##)
        .into_iter()
        .map(|anchor| {
            let document = document.clone();
            Listener::new(&anchor, "click", ListenOptions::default(), move |e| {
                e.prevent_default();
                let href = e
                    .current_target()
                    .and_then(|t| t.dyn_into::<Element>().ok())
                    .and_then(|el| el.get_attribute("href"));
                if let Some(href) = href {
                    scroll_to(&document, &href);
                }
            })
        })
        .collect()
}
