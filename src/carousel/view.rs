use wasm_bindgen::JsCast;
use web_sys::{Element, HtmlElement};

use super::controller::SlideView;
use crate::dom;

const SLIDE_SELECTOR: &str = ".carousel-slide";
const INDICATOR_SELECTOR: &str = ".carousel-indicator";
const INDICATOR_ACTIVE: &str = "bg-white/80";
const INDICATOR_INACTIVE: &str = "bg-white/50";

/// Slides fade through inline opacity; indicators swap their background class.
pub struct DomSlides {
    slides: Vec<HtmlElement>,
    indicators: Vec<Element>,
}

impl DomSlides {
    pub fn from_root(root: &Element) -> Self {
        let slides = dom::select_within(root, SLIDE_SELECTOR)
            .into_iter()
            .filter_map(|el| el.dyn_into::<HtmlElement>().ok())
            .collect();
        let indicators = dom::select_within(root, INDICATOR_SELECTOR);
        Self { slides, indicators }
    }

    pub fn indicators(&self) -> &[Element] {
        &self.indicators
    }
}

impl SlideView for DomSlides {
    fn slide_count(&self) -> usize {
        self.slides.len()
    }

    fn render(&self, active: usize) {
        for (i, slide) in self.slides.iter().enumerate() {
            let opacity = if i == active { "1" } else { "0" };
            let _ = slide.style().set_property("opacity", opacity);
        }

        for (i, indicator) in self.indicators.iter().enumerate() {
            let classes = indicator.class_list();
            if i == active {
                let _ = classes.remove_1(INDICATOR_INACTIVE);
                let _ = classes.add_1(INDICATOR_ACTIVE);
            } else {
                let _ = classes.remove_1(INDICATOR_ACTIVE);
                let _ = classes.add_1(INDICATOR_INACTIVE);
            }
        }
    }
}
