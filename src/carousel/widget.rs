use std::rc::Rc;

use log::debug;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, KeyboardEvent};

use super::controller::{Attention, Carousel, Direction};
use super::view::DomSlides;
use crate::config::CarouselConfig;
use crate::dom::{ListenOptions, Listener};
use crate::timer::Scheduler;

const CAROUSEL_ID: &str = "treatment-carousel";
const PREV_BUTTON_ID: &str = "prev-btn";
const NEXT_BUTTON_ID: &str = "next-btn";

/// Maps the arrow keys the carousel reacts to.
pub fn arrow_direction(key: &str) -> Option<Direction> {
    match key {
        "ArrowLeft" => Some(Direction::Previous),
        "ArrowRight" => Some(Direction::Next),
        _ => None,
    }
}

/// Clicking a button focuses it too; only focus the browser would draw a ring
/// for counts as the visitor's attention.
fn keyboard_focus(e: &Event) -> bool {
    e.target()
        .and_then(|t| t.dyn_into::<Element>().ok())
        .map_or(true, |el| el.matches(":focus-visible").unwrap_or(true))
}

/// The treatment carousel together with the listeners driving it.
pub struct CarouselWidget {
    carousel: Carousel,
    _listeners: Vec<Listener>,
}

impl CarouselWidget {
    pub fn attach(
        document: &Document,
        config: &CarouselConfig,
        scheduler: Rc<dyn Scheduler>,
    ) -> Option<Self> {
        let Some(root) = document.get_element_by_id(CAROUSEL_ID) else {
            debug!("No #{} on this page", CAROUSEL_ID);
            return None;
        };

        let slides = DomSlides::from_root(&root);
        let indicators = slides.indicators().to_vec();
        let carousel = Carousel::initialize(config.clone(), scheduler, Box::new(slides))?;
        if document.hidden() {
            carousel.on_visibility_change(true);
        }

        let mut listeners = Vec::new();

        let buttons = [(PREV_BUTTON_ID, Direction::Previous), (NEXT_BUTTON_ID, Direction::Next)];
        for (id, direction) in buttons {
            if let Some(button) = document.get_element_by_id(id) {
                let carousel = carousel.clone();
                listeners.push(Listener::new(&button, "click", ListenOptions::default(), move |_| {
                    carousel.on_user_interaction(|c| c.advance(direction));
                }));
            }
        }

        for (index, indicator) in indicators.iter().enumerate() {
            let carousel = carousel.clone();
            listeners.push(Listener::new(indicator, "click", ListenOptions::default(), move |_| {
                carousel.on_user_interaction(|c| c.show_slide(index as isize));
            }));
        }

        let attention = [
            ("mouseenter", Attention::Pointer, true),
            ("mouseleave", Attention::Pointer, false),
            ("focusin", Attention::Focus, true),
            ("focusout", Attention::Focus, false),
        ];
        for (event, source, entering) in attention {
            let carousel = carousel.clone();
            listeners.push(Listener::new(&root, event, ListenOptions::default(), move |e: Event| {
                if source == Attention::Focus && entering && !keyboard_focus(&e) {
                    return;
                }
                if entering {
                    carousel.on_hover_or_focus_enter(source);
                } else {
                    carousel.on_hover_or_focus_exit(source);
                }
            }));
        }

        {
            let carousel = carousel.clone();
            listeners.push(Listener::new(&root, "keydown", ListenOptions::default(), move |e: Event| {
                let Some(key) = e.dyn_ref::<KeyboardEvent>().map(|k| k.key()) else {
                    return;
                };
                if let Some(direction) = arrow_direction(&key) {
                    e.prevent_default();
                    carousel.on_user_interaction(|c| c.advance(direction));
                }
            }));
        }

        {
            let carousel = carousel.clone();
            let doc = document.clone();
            listeners.push(Listener::new(
                document,
                "visibilitychange",
                ListenOptions::default(),
                move |_| carousel.on_visibility_change(doc.hidden()),
            ));
        }

        Some(Self {
            carousel,
            _listeners: listeners,
        })
    }
}

impl Drop for CarouselWidget {
    fn drop(&mut self) {
        self.carousel.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_horizontal_arrows_navigate() {
        assert_eq!(arrow_direction("ArrowLeft"), Some(Direction::Previous));
        assert_eq!(arrow_direction("ArrowRight"), Some(Direction::Next));
        assert_eq!(arrow_direction("ArrowUp"), None);
        assert_eq!(arrow_direction("Enter"), None);
    }
}
