use log::debug;
use serde::Serialize;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::{Function, Reflect};
use web_sys::{Document, Element};

use crate::dom::{self, ListenOptions, Listener};

const LINK_SELECTOR: &str = ".ai-link-discrete";

#[derive(Debug, Serialize, PartialEq)]
pub struct AiClick {
    pub platform: String,
    pub method: &'static str,
}

impl AiClick {
    pub fn from_link_text(text: &str) -> Self {
        Self {
            platform: text.trim().to_string(),
            method: "discrete",
        }
    }
}

/// Sends an event through the page's `gtag`, when analytics is loaded at all.
fn send(event: &str, params: &AiClick) -> Result<(), JsValue> {
    let Some(window) = web_sys::window() else {
        return Ok(());
    };
    let Ok(gtag) = Reflect::get(&window, &JsValue::from_str("gtag"))?.dyn_into::<Function>() else {
        return Ok(());
    };
    let params = serde_wasm_bindgen::to_value(params)?;
    gtag.call3(
        &JsValue::NULL,
        &JsValue::from_str("event"),
        &JsValue::from_str(event),
        &params,
    )?;
    Ok(())
}

pub fn attach(document: &Document) -> Vec<Listener> {
    dom::select_all(document, LINK_SELECTOR)
        .into_iter()
        .map(|link| {
            let target: Element = link.clone();
            Listener::new(&link, "click", ListenOptions::default(), move |_| {
                let click = AiClick::from_link_text(&target.text_content().unwrap_or_default());
                if let Err(e) = send("ai_analysis", &click) {
                    debug!("gtag call failed: {:?}", e);
                }
            })
        })
        .collect()
}
