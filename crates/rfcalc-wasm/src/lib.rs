//! WASM bindings for rfcalc-core
//!
//! This module exposes the immittance view model to JavaScript/WASM.

use wasm_bindgen::prelude::*;

mod view_model;

pub use view_model::WasmViewModel;

/// Get the library version
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
