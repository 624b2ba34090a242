//! Python bindings for rfcalc-core
//!
//! This module exposes the immittance view model to Python via PyO3.
//!
//! ## Classes
//!
//! - `ViewModel` - Immittance state with derived RF quantities, trace and undo

use pyo3::prelude::*;

mod view_model;

pub use view_model::PyViewModel;

/// rfcalc_python - Python bindings for the rfcalc immittance calculator
///
/// Example:
///     >>> import rfcalc_python as rfcalc
///     >>> vm = rfcalc.ViewModel()
///     >>> vm.impedance = complex(100, 0)
///     >>> vm.get("swr")
///     2.0
#[pymodule]
fn rfcalc_python(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_class::<PyViewModel>()?;
    m.add("__version__", env!("CARGO_PKG_VERSION"))?;
    Ok(())
}
