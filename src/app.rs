use std::rc::Rc;

use log::info;
use web_sys::{Document, Window};

use crate::carousel::widget::CarouselWidget;
use crate::components::{
    anchors, images,
    menu::MobileMenu,
    reveal::Reveal,
    scroll::{ScrollToTop, StickyNav},
    tracking, year,
};
use crate::config::PageConfig;
use crate::dom::Listener;
use crate::timer::BrowserScheduler;

/// Every behavior attached to the current page. Dropping it detaches them all.
pub struct Page {
    _reveal: Option<Reveal>,
    _scroll_to_top: Option<ScrollToTop>,
    _mobile_menu: Option<MobileMenu>,
    _sticky_nav: Option<StickyNav>,
    _carousel: Option<CarouselWidget>,
    _listeners: Vec<Listener>,
}

impl Page {
    pub fn assemble(window: &Window, document: &Document, config: PageConfig) -> Self {
        let scheduler = Rc::new(BrowserScheduler::new());

        let reveal = Reveal::attach(document, &config);
        let scroll_to_top = ScrollToTop::attach(window, document, &config);
        let mobile_menu = MobileMenu::attach(document);
        let sticky_nav = StickyNav::attach(window, document, &config);

        let mut listeners = anchors::attach(document);
        listeners.extend(images::attach(document));
        year::stamp(document);

        let carousel = CarouselWidget::attach(document, &config.carousel, scheduler);
        listeners.extend(tracking::attach(document));

        info!(
            "Page ready (carousel: {}, menu: {}, {} listeners)",
            carousel.is_some(),
            mobile_menu.is_some(),
            listeners.len()
        );

        Self {
            _reveal: reveal,
            _scroll_to_top: scroll_to_top,
            _mobile_menu: mobile_menu,
            _sticky_nav: sticky_nav,
            _carousel: carousel,
            _listeners: listeners,
        }
    }
}
