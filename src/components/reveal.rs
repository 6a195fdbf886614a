//! Lazy image loading and scroll-triggered entrance animations, both driven by
//! one `IntersectionObserver`.

use gloo_timers::callback::Timeout;
use log::{debug, warn};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::js_sys::Array;
use web_sys::{
    Document, Element, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit,
};

use crate::config::PageConfig;
use crate::dom::{self, ListenOptions, Listener};

const TARGET_SELECTOR: &str = "[data-animate], img[data-src]";
const ANIMATED_CLASS: &str = "animate-in";

/// Parses `data-delay`. Anything that isn't a non-negative integer means no delay.
pub fn parse_delay(raw: Option<&str>) -> u32 {
    raw.and_then(|raw| raw.trim().parse().ok()).unwrap_or(0)
}

fn reveal(target: &Element) {
    if let Some(src) = target.get_attribute("data-src") {
        let _ = target.set_attribute("src", &src);
        let _ = target.remove_attribute("data-src");
    }

    if !target.has_attribute("data-animate") {
        return;
    }

    let delay = parse_delay(target.get_attribute("data-delay").as_deref());
    let target = target.clone();
    Timeout::new(delay, move || {
        if let Some(el) = target.dyn_ref::<HtmlElement>() {
            let el_clone = el.clone();
            Listener::new(el, "transitionend", ListenOptions::ONCE, move |_| {
                let _ = el_clone.style().set_property("will-change", "auto");
            })
            .forget();
        }
        let _ = target.class_list().add_1(ANIMATED_CLASS);
    })
    .forget();
}

pub struct Reveal {
    observer: IntersectionObserver,
    _callback: Closure<dyn FnMut(Array, IntersectionObserver)>,
}

impl Reveal {
    pub fn attach(document: &Document, config: &PageConfig) -> Option<Self> {
        let targets = dom::select_all(document, TARGET_SELECTOR);
        if targets.is_empty() {
            return None;
        }

        let callback = Closure::wrap(Box::new(|entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if entry.is_intersecting() {
                    let target = entry.target();
                    reveal(&target);
                    observer.unobserve(&target);
                }
            }
        }) as Box<dyn FnMut(Array, IntersectionObserver)>);

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(config.intersection_threshold));
        init.set_root_margin(&config.root_margin);

        let observer = match IntersectionObserver::new_with_options(
            callback.as_ref().unchecked_ref(),
            &init,
        ) {
            Ok(observer) => observer,
            Err(e) => {
                warn!("IntersectionObserver unavailable, revealing everything: {:?}", e);
                targets.iter().for_each(reveal);
                return None;
            }
        };

        for target in &targets {
            observer.observe(target);
        }
        debug!("Watching {} reveal targets", targets.len());

        Some(Self {
            observer,
            _callback: callback,
        })
    }
}

impl Drop for Reveal {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

#[cfg(test)]
mod tests {
    use super::parse_delay;

    #[test]
    fn delay_defaults_to_zero() {
        assert_eq!(parse_delay(None), 0);
        assert_eq!(parse_delay(Some("")), 0);
        assert_eq!(parse_delay(Some("soon")), 0);
        assert_eq!(parse_delay(Some("-200")), 0);
    }

    #[test]
    fn delay_parses_milliseconds() {
        assert_eq!(parse_delay(Some("200")), 200);
        assert_eq!(parse_delay(Some(" 150 ")), 150);
    }
}
