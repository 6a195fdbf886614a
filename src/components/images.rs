use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlImageElement};

use crate::dom::{self, ListenOptions, Listener};

#[derive(Debug, PartialEq, Eq)]
pub enum FallbackAction {
    Swap(String),
    Hide,
}

const FALLBACK_TRIED: &str = "data-fallback-tried";

/// Decides what a broken image turns into. The fallback gets one chance; if it
/// breaks too the image is hidden.
pub fn fallback_action(fallback: Option<String>, already_tried: bool) -> FallbackAction {
    match fallback {
        Some(fallback) if !fallback.is_empty() && !already_tried => FallbackAction::Swap(fallback),
        _ => FallbackAction::Hide,
    }
}

pub fn attach(document: &Document) -> Vec<Listener> {
    dom::select_all(document, "img")
        .into_iter()
        .filter_map(|el| el.dyn_into::<HtmlImageElement>().ok())
        .map(|img| {
            let target = img.clone();
            Listener::new(&img, "error", ListenOptions::default(), move |_| {
                let tried = target.has_attribute(FALLBACK_TRIED);
                match fallback_action(target.get_attribute("data-fallback"), tried) {
                    FallbackAction::Swap(src) => {
                        let _ = target.set_attribute(FALLBACK_TRIED, "");
                        target.set_src(&src);
                    }
                    FallbackAction::Hide => {
                        let _ = target.style().set_property("display", "none");
                    }
                }
            })
        })
        .collect()
}
