use log::{warn, Level};
use serde::Deserialize;
use web_sys::Document;

/// Id of the optional `<script type="application/json">` block that overrides
/// the defaults below.
const CONFIG_ELEMENT_ID: &str = "page-config";

#[cfg(debug_assertions)]
pub fn log_level() -> Level {
    Level::Debug // Verbose while developing locally
}

#[cfg(not(debug_assertions))]
pub fn log_level() -> Level {
    Level::Info
}

/// Timing of the treatment carousel.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CarouselConfig {
    /// Period of the auto-advance timer.
    pub slide_period_ms: u32,
    /// Quiet time after a click or arrow key before auto-advance resumes.
    pub interaction_cooldown_ms: u32,
    /// Delay before the first arm, so the carousel doesn't race page load.
    pub startup_delay_ms: u32,
    /// Delay before resuming after the pointer or focus leaves. 0 resumes at once.
    pub hover_grace_ms: u32,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            slide_period_ms: 2_500,
            interaction_cooldown_ms: 6_000,
            startup_delay_ms: 500,
            hover_grace_ms: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PageConfig {
    /// Scroll position past which the scroll-to-top button shows up.
    pub scroll_threshold: f64,
    /// Scroll position past which the nav gets the `scrolled` class.
    pub sticky_offset: f64,
    pub scroll_debounce_ms: u32,
    pub sticky_debounce_ms: u32,
    /// Visible fraction needed before a reveal target counts as intersecting.
    pub intersection_threshold: f64,
    pub root_margin: String,
    pub carousel: CarouselConfig,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            scroll_threshold: 300.0,
            sticky_offset: 50.0,
            scroll_debounce_ms: 100,
            sticky_debounce_ms: 10,
            intersection_threshold: 0.15,
            root_margin: "50px".to_string(),
            carousel: CarouselConfig::default(),
        }
    }
}

impl PageConfig {
    /// Parses a JSON override. Missing fields keep their defaults.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    /// Reads the config block embedded in the page, falling back to the defaults
    /// when it is absent or malformed.
    pub fn load(document: &Document) -> Self {
        let raw = match document
            .get_element_by_id(CONFIG_ELEMENT_ID)
            .and_then(|el| el.text_content())
        {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => return Self::default(),
        };

        match Self::from_json(&raw) {
            Ok(config) => config,
            Err(e) => {
                warn!("Ignoring invalid #{} block: {}", CONFIG_ELEMENT_ID, e);
                Self::default()
            }
        }
    }
}
