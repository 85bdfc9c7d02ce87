//! Browser bindings for `hydrotable-core`.
//!
//! The core crate reports through `tracing`. No subscriber is installed in
//! the browser, so those events are dropped there; anything the page should
//! see is written with `web_sys::console` instead.

mod api;
mod buttons;
mod widget;

pub use api::{
    builtin_preset, fps_data_table, harney_data_table, klamath_data_table, preset_data_table,
    sanitize_cell, style_sheet,
};
pub use widget::{EnhancedTable, WidgetEngine};

use wasm_bindgen::prelude::*;

/// Initialize panic hook for better error messages in browser console
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}
