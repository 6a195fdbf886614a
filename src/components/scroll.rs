use log::debug;
use web_sys::{Document, Element, ScrollBehavior, ScrollToOptions, Window};

use crate::config::PageConfig;
use crate::dom::{self, ListenOptions, Listener};
use crate::timer::debounce;

const SCROLL_TO_TOP_ID: &str = "scroll-to-top";

pub fn scroll_button_visible(scroll_y: f64, threshold: f64) -> bool {
    scroll_y >= threshold
}

pub fn nav_scrolled(scroll_y: f64, offset: f64) -> bool {
    scroll_y > offset
}

fn scroll_y(window: &Window) -> f64 {
    window.scroll_y().unwrap_or(0.0)
}

/// Floating button that fades in once the visitor has scrolled down a bit.
pub struct ScrollToTop {
    _listeners: [Listener; 2],
}

impl ScrollToTop {
    pub fn attach(window: &Window, document: &Document, config: &PageConfig) -> Option<Self> {
        let button = document.get_element_by_id(SCROLL_TO_TOP_ID)?;

        let mut toggle = {
            let window = window.clone();
            let button = button.clone();
            let threshold = config.scroll_threshold;
            debounce(config.scroll_debounce_ms, move || {
                let visible = scroll_button_visible(scroll_y(&window), threshold);
                let classes = button.class_list();
                let _ = classes.toggle_with_force("opacity-0", !visible);
                let _ = classes.toggle_with_force("pointer-events-none", !visible);
            })
        };
        let on_scroll = Listener::new(window, "scroll", ListenOptions::PASSIVE, move |_| toggle());

        let on_click = {
            let window = window.clone();
            Listener::new(&button, "click", ListenOptions::default(), move |_| {
                let opts = ScrollToOptions::new();
                opts.set_top(0.0);
                opts.set_behavior(ScrollBehavior::Smooth);
                window.scroll_to_with_scroll_to_options(&opts);
            })
        };

        Some(Self {
            _listeners: [on_scroll, on_click],
        })
    }
}

/// Adds `scrolled` to the top nav once the page leaves the very top.
pub struct StickyNav {
    _listener: Listener,
}

impl StickyNav {
    pub fn attach(window: &Window, document: &Document, config: &PageConfig) -> Option<Self> {
        let Some(nav) = dom::select(document, "nav") else {
            debug!("No nav element, skipping sticky navigation");
            return None;
        };

        let mut update = {
            let window = window.clone();
            let offset = config.sticky_offset;
            debounce(config.sticky_debounce_ms, move || {
                set_scrolled(&nav, nav_scrolled(scroll_y(&window), offset));
            })
        };
        let listener = Listener::new(window, "scroll", ListenOptions::PASSIVE, move |_| update());

        Some(Self { _listener: listener })
    }
}

fn set_scrolled(nav: &Element, scrolled: bool) {
    let _ = nav.class_list().toggle_with_force("scrolled", scrolled);
}
