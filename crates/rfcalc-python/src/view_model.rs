//! Python bindings for the view model

use num_complex::Complex64;
use numpy::{PyArray1, ToPyArray};
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use rfcalc_core::view_model::fade_step;
use rfcalc_core::{
    CircuitMode, ComplexQuantity, DisplayMode, Immittance, Quantity, ViewModel, ViewModelConfig,
};

fn quantity(name: &str) -> PyResult<Quantity> {
    Quantity::from_name(name)
        .ok_or_else(|| PyValueError::new_err(format!("Unknown quantity: {}", name)))
}

fn complex_quantity(name: &str) -> PyResult<ComplexQuantity> {
    ComplexQuantity::from_name(name)
        .ok_or_else(|| PyValueError::new_err(format!("Unknown complex quantity: {}", name)))
}

fn parse_config(config: Option<&str>) -> PyResult<ViewModelConfig> {
    match config {
        None => Ok(ViewModelConfig::default()),
        Some(json) => ViewModelConfig::from_json(json)
            .map_err(|e| PyValueError::new_err(format!("Invalid configuration: {}", e))),
    }
}

/// Python wrapper for ViewModel
#[pyclass(name = "ViewModel")]
pub struct PyViewModel {
    inner: ViewModel,
}

#[pymethods]
impl PyViewModel {
    /// Create a model in the default state (50 Ω load, 50 Ω reference, 100 MHz)
    ///
    /// Args:
    ///     config: Optional JSON configuration string
    #[new]
    #[pyo3(signature = (config=None))]
    pub fn new(config: Option<&str>) -> PyResult<Self> {
        Ok(Self {
            inner: ViewModel::with_config(parse_config(config)?),
        })
    }

    /// Restore a session from snapshot JSON; unreadable input gives the default state
    #[staticmethod]
    #[pyo3(signature = (json, config=None))]
    pub fn restore(json: &str, config: Option<&str>) -> PyResult<Self> {
        Ok(Self {
            inner: ViewModel::restore(json, parse_config(config)?),
        })
    }

    /// Read a scalar quantity by name, e.g. "swr" or "quality_factor"
    pub fn get(&self, name: &str) -> PyResult<f64> {
        Ok(self.inner.get(quantity(name)?))
    }

    /// Write a scalar quantity by name; out-of-domain values are ignored
    pub fn set(&mut self, name: &str, value: f64) -> PyResult<()> {
        self.inner.set(quantity(name)?, value);
        Ok(())
    }

    /// Write a scalar quantity by name, recording the swept Γ path
    pub fn set_recording_trace(&mut self, name: &str, value: f64) -> PyResult<()> {
        self.inner.set_recording_trace(quantity(name)?, value);
        Ok(())
    }

    /// Read a complex quantity by name
    pub fn get_complex(&self, name: &str) -> PyResult<Complex64> {
        Ok(self.inner.get_complex(complex_quantity(name)?))
    }

    /// Write a complex quantity by name
    pub fn set_complex(&mut self, name: &str, value: Complex64) -> PyResult<()> {
        self.inner.set_complex(complex_quantity(name)?, value);
        Ok(())
    }

    /// Impedance Z (Ω)
    #[getter]
    pub fn impedance(&self) -> Complex64 {
        self.inner.impedance()
    }

    #[setter]
    pub fn set_impedance(&mut self, z: Complex64) {
        self.inner.set_impedance(z);
    }

    /// Admittance Y (S)
    #[getter]
    pub fn admittance(&self) -> Complex64 {
        self.inner.admittance()
    }

    #[setter]
    pub fn set_admittance(&mut self, y: Complex64) {
        self.inner.set_admittance(y);
    }

    /// Reflection coefficient Γ
    #[getter]
    pub fn reflection_coefficient(&self) -> Complex64 {
        self.inner.reflection_coefficient()
    }

    #[setter]
    pub fn set_reflection_coefficient(&mut self, gamma: Complex64) {
        self.inner.set_reflection_coefficient(gamma);
    }

    /// Reference impedance Z₀ (Ω)
    #[getter]
    pub fn reference_impedance(&self) -> f64 {
        self.inner.reference_impedance()
    }

    #[setter]
    pub fn set_reference_impedance(&mut self, z0: f64) {
        self.inner.set_reference_immittance(Immittance::resistance(z0));
    }

    /// Frequency in Hz
    #[getter]
    pub fn frequency(&self) -> f64 {
        self.inner.frequency()
    }

    #[setter]
    pub fn set_frequency(&mut self, frequency: f64) {
        self.inner.set_frequency(frequency);
    }

    /// "series" or "parallel"
    #[getter]
    pub fn circuit_mode(&self) -> &'static str {
        match self.inner.circuit_mode() {
            CircuitMode::Series => "series",
            CircuitMode::Parallel => "parallel",
        }
    }

    #[setter]
    pub fn set_circuit_mode(&mut self, mode: &str) -> PyResult<()> {
        let mode = match mode {
            "series" => CircuitMode::Series,
            "parallel" => CircuitMode::Parallel,
            other => return Err(PyValueError::new_err(format!("Unknown circuit mode: {}", other))),
        };
        self.inner.set_circuit_mode(mode);
        Ok(())
    }

    /// "impedance" or "admittance"
    #[getter]
    pub fn display_mode(&self) -> &'static str {
        match self.inner.display_mode() {
            DisplayMode::Impedance => "impedance",
            DisplayMode::Admittance => "admittance",
        }
    }

    #[setter]
    pub fn set_display_mode(&mut self, mode: &str) -> PyResult<()> {
        let mode = match mode {
            "impedance" => DisplayMode::Impedance,
            "admittance" => DisplayMode::Admittance,
            other => return Err(PyValueError::new_err(format!("Unknown display mode: {}", other))),
        };
        self.inner.set_display_mode(mode);
        Ok(())
    }

    /// Recorded Γ path as a complex numpy array, oldest first
    #[getter]
    pub fn trace<'py>(&self, py: Python<'py>) -> Bound<'py, PyArray1<Complex64>> {
        self.inner.trace().to_pyarray(py)
    }

    /// Advance the trace fade clock by `seconds`
    ///
    /// Raises ValueError for negative or NaN steps; `inf` finishes the fade.
    pub fn advance_trace_fade(&mut self, seconds: f64) -> PyResult<()> {
        let dt = fade_step(seconds)
            .ok_or_else(|| PyValueError::new_err(format!("Invalid fade step: {} s", seconds)))?;
        self.inner.advance_trace_fade(dt);
        Ok(())
    }

    pub fn zero_length(&mut self) {
        self.inner.zero_length();
    }

    #[getter]
    pub fn can_undo(&self) -> bool {
        self.inner.can_undo()
    }

    pub fn undo(&mut self) {
        self.inner.undo();
    }

    /// Serialize the state to snapshot JSON
    pub fn to_json(&self) -> PyResult<String> {
        self.inner
            .to_json()
            .map_err(|e| PyValueError::new_err(format!("Snapshot error: {}", e)))
    }

    fn __repr__(&self) -> String {
        let z = self.inner.impedance();
        format!(
            "ViewModel(z={}{:+}j Ω, z0={} Ω, f={} Hz)",
            z.re,
            z.im,
            self.inner.reference_impedance(),
            self.inner.frequency()
        )
    }
}
