//! Host page lookups

use crate::tuning::Tuning;

/// Id of the optional `<script type="application/json">` holding tuning JSON
pub const TUNING_ELEMENT_ID: &str = "tuning";

/// Read tuning from the host page, falling back to the defaults
pub fn load_tuning() -> Tuning {
    let text = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.get_element_by_id(TUNING_ELEMENT_ID))
        .and_then(|el| el.text_content());

    super::tuning_or_default(text.as_deref())
}

/// Whether the page currently has keyboard focus
pub fn has_focus() -> bool {
    web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.has_focus().ok())
        .unwrap_or(false)
}
