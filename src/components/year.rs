use chrono::{Datelike, Local};
use web_sys::Document;

const YEAR_ID: &str = "current-year";

/// Stamps the current year into the footer copyright line.
pub fn stamp(document: &Document) {
    if let Some(el) = document.get_element_by_id(YEAR_ID) {
        el.set_text_content(Some(&Local::now().year().to_string()));
    }
}
