//! Header click handlers driving the shared sort engine

use std::cell::RefCell;

use dashtable_core::{is_activation_key, SortEngine, SortState, SortableTable, TableId, TextCollation};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, KeyboardEvent};

use crate::dom_table::DomTable;

thread_local! {
    static ENGINE: RefCell<SortEngine> = RefCell::new(SortEngine::default());
}

/// Switch text collation; tables registered from JavaScript stay bound
pub fn set_collation(collation: TextCollation) {
    ENGINE.with(|engine| engine.borrow_mut().set_collation(collation));
}

pub fn sort_state(id: &TableId) -> Option<SortState> {
    ENGINE.with(|engine| engine.borrow().sort_state(id).cloned())
}

/// Register the table with `id` and attach one handler per accepted header
///
/// Returns the number of sortable columns. A missing table, a table without
/// a body, or one already registered attaches nothing.
pub fn register_table(document: &Document, id: &str) -> usize {
    let table_id = TableId::from(id);
    if ENGINE.with(|engine| engine.borrow().is_registered(&table_id)) {
        tracing::debug!(table = id, "already registered");
        return 0;
    }
    let Some(element) = document.get_element_by_id(id) else {
        tracing::debug!(table = id, "no such table on this page");
        return 0;
    };
    let Some(table) = DomTable::new(element.clone()) else {
        tracing::debug!(table = id, "table has no tbody");
        return 0;
    };

    let descriptors = table.header_columns();
    let accepted = ENGINE.with(|engine| {
        engine
            .borrow_mut()
            .register_sortable_table(table_id.clone(), &table, descriptors)
    });

    let columns: Vec<String> = ENGINE.with(|engine| {
        engine
            .borrow()
            .columns(&table_id)
            .map(|cols| cols.iter().map(|c| c.key.clone()).collect())
            .unwrap_or_default()
    });
    for header in table.headers() {
        let Some(key) = header.get_attribute("data-column") else {
            continue;
        };
        if columns.contains(&key) {
            bind_header(&header, &element, &table_id, &key);
        }
    }
    accepted
}

fn bind_header(header: &Element, table: &Element, id: &TableId, key: &str) {
    if !header.has_attribute("tabindex") {
        let _ = header.set_attribute("tabindex", "0");
    }

    {
        let table = table.clone();
        let table_id = id.clone();
        let key = key.to_string();
        let onclick = Closure::<dyn FnMut(_)>::new(move |e: Event| {
            e.prevent_default();
            activate(&table, &table_id, &key);
        });
        if let Err(e) = header.add_event_listener_with_callback("click", onclick.as_ref().unchecked_ref()) {
            tracing::warn!(table = %id, "failed to bind header click: {:?}", e);
        }
        onclick.forget();
    }

    {
        let table = table.clone();
        let table_id = id.clone();
        let key = key.to_string();
        let onkeydown = Closure::<dyn FnMut(_)>::new(move |e: KeyboardEvent| {
            if is_activation_key(&e.key()) {
                e.prevent_default();
                activate(&table, &table_id, &key);
            }
        });
        if let Err(e) = header.add_event_listener_with_callback("keydown", onkeydown.as_ref().unchecked_ref()) {
            tracing::warn!(table = %id, "failed to bind header keydown: {:?}", e);
        }
        onkeydown.forget();
    }
}

fn activate(table: &Element, id: &TableId, key: &str) {
    let Some(mut dom) = DomTable::new(table.clone()) else {
        return;
    };
    ENGINE.with(|engine| {
        let Ok(mut engine) = engine.try_borrow_mut() else {
            tracing::warn!(table = %id, "sort already in progress");
            return;
        };
        if let Err(e) = engine.activate_sort(id, &mut dom, key) {
            tracing::warn!(table = %id, column = key, "sort skipped: {}", e);
        }
    });
}
