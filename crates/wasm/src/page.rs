//! Document lookup helpers

use dashtable_core::config::CONFIG_ELEMENT_ID;
use dashtable_core::DashtableConfig;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element};

pub fn document() -> Option<Document> {
    web_sys::window().and_then(|w| w.document())
}

/// Elements matching `selector` under `root`; an invalid selector yields none
pub fn select_all(root: &Element, selector: &str) -> Vec<Element> {
    let Ok(list) = root.query_selector_all(selector) else {
        tracing::warn!(selector, "invalid selector");
        return Vec::new();
    };
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Same as [`select_all`] over the whole document
pub fn select_all_in(document: &Document, selector: &str) -> Vec<Element> {
    match document.document_element() {
        Some(root) => select_all(&root, selector),
        None => Vec::new(),
    }
}

pub fn select_one(root: &Element, selector: &str) -> Option<Element> {
    root.query_selector(selector).ok().flatten()
}

/// Read the embedded JSON configuration, if the page has one
pub fn load_config(document: &Document) -> DashtableConfig {
    let json = document
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|el| el.text_content());
    DashtableConfig::load(json.as_deref())
}

/// Navigate the whole page to `url`
pub fn navigate(url: &str) {
    if let Some(window) = web_sys::window() {
        if let Err(e) = window.location().set_href(url) {
            tracing::warn!(url, "navigation failed: {:?}", e);
        }
    }
}
