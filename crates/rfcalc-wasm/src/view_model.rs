//! WASM bindings for the view model

use js_sys::Float64Array;
use num_complex::Complex64;
use rfcalc_core::view_model::fade_step;
use rfcalc_core::{
    CircuitMode, ComplexQuantity, DisplayMode, Quantity, ViewModel, ViewModelConfig,
};
use wasm_bindgen::prelude::*;

fn quantity(name: &str) -> Result<Quantity, JsValue> {
    Quantity::from_name(name).ok_or_else(|| JsValue::from_str(&format!("Unknown quantity: {}", name)))
}

fn complex_quantity(name: &str) -> Result<ComplexQuantity, JsValue> {
    ComplexQuantity::from_name(name)
        .ok_or_else(|| JsValue::from_str(&format!("Unknown complex quantity: {}", name)))
}

/// Flatten complex values as [re0, im0, re1, im1, ...]
fn interleave(values: &[Complex64]) -> Float64Array {
    let flat: Vec<f64> = values.iter().flat_map(|c| [c.re, c.im]).collect();
    Float64Array::from(flat.as_slice())
}

fn pair(value: Complex64) -> Float64Array {
    interleave(&[value])
}

/// Immittance calculator state for WASM
#[wasm_bindgen]
pub struct WasmViewModel {
    inner: ViewModel,
}

#[wasm_bindgen]
impl WasmViewModel {
    /// Create a model in the default state
    ///
    /// @param config - Optional JSON configuration, e.g. `{"tracePersistence":"infinite"}`
    #[wasm_bindgen(constructor)]
    pub fn new(config: Option<String>) -> Result<WasmViewModel, JsValue> {
        let config = parse_config(config.as_deref())?;
        Ok(WasmViewModel {
            inner: ViewModel::with_config(config),
        })
    }

    /// Restore a session from snapshot JSON, falling back to the default state
    #[wasm_bindgen(js_name = restore)]
    pub fn restore(json: &str, config: Option<String>) -> Result<WasmViewModel, JsValue> {
        let config = parse_config(config.as_deref())?;
        Ok(WasmViewModel {
            inner: ViewModel::restore(json, config),
        })
    }

    /// Read a scalar quantity by name (e.g. "swr", "return_loss")
    pub fn get(&self, name: &str) -> Result<f64, JsValue> {
        Ok(self.inner.get(quantity(name)?))
    }

    /// Write a scalar quantity by name
    pub fn set(&mut self, name: &str, value: f64) -> Result<(), JsValue> {
        self.inner.set(quantity(name)?, value);
        Ok(())
    }

    /// Write a scalar quantity by name as an animated sweep
    #[wasm_bindgen(js_name = setRecordingTrace)]
    pub fn set_recording_trace(&mut self, name: &str, value: f64) -> Result<(), JsValue> {
        self.inner.set_recording_trace(quantity(name)?, value);
        Ok(())
    }

    /// Read a complex quantity by name as [re, im]
    #[wasm_bindgen(js_name = getComplex)]
    pub fn get_complex(&self, name: &str) -> Result<Float64Array, JsValue> {
        Ok(pair(self.inner.get_complex(complex_quantity(name)?)))
    }

    /// Write a complex quantity by name
    #[wasm_bindgen(js_name = setComplex)]
    pub fn set_complex(&mut self, name: &str, re: f64, im: f64) -> Result<(), JsValue> {
        self.inner
            .set_complex(complex_quantity(name)?, Complex64::new(re, im));
        Ok(())
    }

    /// Write a complex quantity by name as an animated sweep
    #[wasm_bindgen(js_name = setComplexRecordingTrace)]
    pub fn set_complex_recording_trace(&mut self, name: &str, re: f64, im: f64) -> Result<(), JsValue> {
        self.inner
            .set_complex_recording_trace(complex_quantity(name)?, Complex64::new(re, im));
        Ok(())
    }

    /// Immittance in the current display mode as [re, im]
    #[wasm_bindgen(js_name = displayedImmittance)]
    pub fn displayed_immittance(&self) -> Float64Array {
        pair(self.inner.displayed_immittance())
    }

    /// "impedance" or "admittance"
    #[wasm_bindgen(getter, js_name = displayMode)]
    pub fn display_mode(&self) -> String {
        match self.inner.display_mode() {
            DisplayMode::Impedance => "impedance".to_string(),
            DisplayMode::Admittance => "admittance".to_string(),
        }
    }

    #[wasm_bindgen(setter, js_name = displayMode)]
    pub fn set_display_mode(&mut self, mode: &str) -> Result<(), JsValue> {
        let mode = match mode {
            "impedance" => DisplayMode::Impedance,
            "admittance" => DisplayMode::Admittance,
            other => return Err(JsValue::from_str(&format!("Unknown display mode: {}", other))),
        };
        self.inner.set_display_mode(mode);
        Ok(())
    }

    /// "series" or "parallel"
    #[wasm_bindgen(getter, js_name = circuitMode)]
    pub fn circuit_mode(&self) -> String {
        match self.inner.circuit_mode() {
            CircuitMode::Series => "series".to_string(),
            CircuitMode::Parallel => "parallel".to_string(),
        }
    }

    #[wasm_bindgen(setter, js_name = circuitMode)]
    pub fn set_circuit_mode(&mut self, mode: &str) -> Result<(), JsValue> {
        let mode = match mode {
            "series" => CircuitMode::Series,
            "parallel" => CircuitMode::Parallel,
            other => return Err(JsValue::from_str(&format!("Unknown circuit mode: {}", other))),
        };
        self.inner.set_circuit_mode(mode);
        Ok(())
    }

    /// Make the current position the zero of electrical length
    #[wasm_bindgen(js_name = zeroLength)]
    pub fn zero_length(&mut self) {
        self.inner.zero_length();
    }

    /// Recorded Γ path as interleaved [re, im] pairs, oldest first
    #[wasm_bindgen(getter)]
    pub fn trace(&self) -> Float64Array {
        interleave(self.inner.trace())
    }

    /// Advance the trace fade by `dt_ms` milliseconds
    ///
    /// @param dt_ms - Non-negative step; `Infinity` finishes the fade
    #[wasm_bindgen(js_name = advanceTraceFade)]
    pub fn advance_trace_fade(&mut self, dt_ms: f64) -> Result<(), JsValue> {
        let dt = fade_step(dt_ms / 1000.0)
            .ok_or_else(|| JsValue::from_str(&format!("Invalid fade step: {} ms", dt_ms)))?;
        self.inner.advance_trace_fade(dt);
        Ok(())
    }

    #[wasm_bindgen(js_name = clearTrace)]
    pub fn clear_trace(&mut self) {
        self.inner.clear_trace();
    }

    #[wasm_bindgen(getter, js_name = canUndo)]
    pub fn can_undo(&self) -> bool {
        self.inner.can_undo()
    }

    pub fn undo(&mut self) {
        self.inner.undo();
    }

    /// Serialize the state to snapshot JSON
    #[wasm_bindgen(js_name = toJson)]
    pub fn to_json(&self) -> Result<String, JsValue> {
        self.inner
            .to_json()
            .map_err(|e| JsValue::from_str(&format!("Snapshot error: {}", e)))
    }
}

impl WasmViewModel {
    /// Get the inner ViewModel reference
    pub fn inner(&self) -> &ViewModel {
        &self.inner
    }
}

fn parse_config(config: Option<&str>) -> Result<ViewModelConfig, JsValue> {
    match config {
        None => Ok(ViewModelConfig::default()),
        Some(json) => ViewModelConfig::from_json(json)
            .map_err(|e| JsValue::from_str(&format!("Invalid configuration: {}", e))),
    }
}
