//! Clickable rows: navigate on click or Enter/Space

use std::rc::Rc;

use dashtable_core::navigation::{id_attribute, ROW_ARIA_LABEL};
use dashtable_core::{is_activation_key, is_interactive_tag, RouteMap, RowInfo};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlAnchorElement, HtmlElement, KeyboardEvent};

use crate::page::{navigate, select_all_in, select_one};

/// Wire every `tr.clickable` on the page; returns how many rows were bound
pub fn init_clickable_rows(document: &Document, routes: RouteMap) -> usize {
    let routes = Rc::new(routes);
    let rows = select_all_in(document, "tr.clickable");
    for row in &rows {
        bind_row(row, routes.clone());
    }
    rows.len()
}

fn bind_row(row: &Element, routes: Rc<RouteMap>) {
    let _ = row.set_attribute("tabindex", "0");
    let _ = row.set_attribute("role", "button");
    let _ = row.set_attribute("aria-label", ROW_ARIA_LABEL);

    {
        let clicked_row = row.clone();
        let onclick = Closure::<dyn FnMut(_)>::new(move |e: Event| {
            if targets_interactive(&e) {
                return;
            }
            let table_id = clicked_row
                .closest("table")
                .ok()
                .flatten()
                .map(|t| t.id())
                .unwrap_or_default();
            let info = row_info(&clicked_row, &table_id);
            match routes.resolve(&table_id, &info) {
                Some(url) => navigate(&url),
                None => tracing::debug!(table = %table_id, "row has no destination"),
            }
        });
        let _ = row.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref());
        onclick.forget();
    }

    {
        let key_row = row.clone();
        let onkeydown = Closure::<dyn FnMut(_)>::new(move |e: KeyboardEvent| {
            if !is_activation_key(&e.key()) {
                return;
            }
            // Keys pressed on a nested link or button keep their own behavior
            if e.target().and_then(|t| t.dyn_into::<Element>().ok()).as_ref() != Some(&key_row) {
                return;
            }
            e.prevent_default();
            if let Some(el) = key_row.dyn_ref::<HtmlElement>() {
                el.click();
            }
        });
        let _ = row.add_event_listener_with_callback("keydown", onkeydown.as_ref().unchecked_ref());
        onkeydown.forget();
    }
}

/// True when the click landed on, or inside, a link or button
fn targets_interactive(e: &Event) -> bool {
    let Some(target) = e.target().and_then(|t| t.dyn_into::<Element>().ok()) else {
        return false;
    };
    is_interactive_tag(&target.tag_name())
        || target.closest("a, button").ok().flatten().is_some()
}

fn row_info(row: &Element, table_id: &str) -> RowInfo {
    let marker_classes = select_one(row, ".icon-circle i")
        .map(|icon| icon.class_name().split_whitespace().map(String::from).collect())
        .unwrap_or_default();
    let first_link = select_one(row, "a")
        .and_then(|a| a.dyn_into::<HtmlAnchorElement>().ok())
        .map(|a| a.href());

    RowInfo {
        data_id: row.get_attribute(&id_attribute(table_id)),
        marker_classes,
        first_link,
    }
}
