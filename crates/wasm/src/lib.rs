//! Browser binding for dashboard tables
//!
//! On load: sortable headers get click handlers, clickable rows navigate,
//! date and numeric cells are reformatted. Tables rendered later can be
//! registered from JavaScript with `register_sortable_table`.

mod cells;
mod dom_table;
mod page;
mod rows;
mod sorting;

use std::cell::RefCell;

use dashtable_core::{DashtableConfig, TableId};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Event};

/// WASM entry point
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    tracing_wasm::set_as_global_default();

    let Some(document) = page::document() else {
        return Ok(());
    };

    if document.ready_state() == "loading" {
        let doc = document.clone();
        let onready = Closure::<dyn FnMut(_)>::new(move |_e: Event| init_page(&doc));
        document.add_event_listener_with_callback("DOMContentLoaded", onready.as_ref().unchecked_ref())?;
        onready.forget();
    } else {
        init_page(&document);
    }
    Ok(())
}

fn init_page(document: &Document) {
    let config = page::load_config(document);
    sorting::set_collation(config.text_collation);

    let sortable: usize = config
        .sortable_tables
        .iter()
        .map(|id| sorting::register_table(document, id))
        .sum();
    let clickable = rows::init_clickable_rows(document, config.routes.clone());
    let dates = cells::format_date_cells(document, &config.display);
    let numbers = cells::format_numeric_cells(document, &config.display);

    tracing::info!(
        sortable_columns = sortable,
        clickable_rows = clickable,
        date_cells = dates,
        numeric_cells = numbers,
        "dashboard tables initialized"
    );
    remember_config(config);
}

thread_local! {
    static CONFIG: RefCell<DashtableConfig> = RefCell::new(DashtableConfig::default());
}

fn remember_config(config: DashtableConfig) {
    CONFIG.with(|c| *c.borrow_mut() = config);
}

/// Register a table rendered after page load; returns its sortable columns
#[wasm_bindgen]
pub fn register_sortable_table(table_id: &str) -> usize {
    match page::document() {
        Some(document) => sorting::register_table(&document, table_id),
        None => 0,
    }
}

/// Current sort of a table as JSON, or `undefined` if it was never registered
#[wasm_bindgen]
pub fn sort_state(table_id: &str) -> Option<String> {
    let state = sorting::sort_state(&TableId::from(table_id))?;
    serde_json::to_string(&state).ok()
}

/// Re-run date and numeric cell formatting, e.g. after inserting rows
#[wasm_bindgen]
pub fn format_cells() -> usize {
    let Some(document) = page::document() else {
        return 0;
    };
    CONFIG.with(|c| {
        let config = c.borrow();
        cells::format_date_cells(&document, &config.display)
            + cells::format_numeric_cells(&document, &config.display)
    })
}
