//! rfcalc-core: Immittance state model for an interactive Smith chart calculator
//!
//! Derives every RF quantity (reflection coefficient, SWR, return loss,
//! equivalent L/C, electrical length) from one impedance or admittance and
//! keeps them consistent as any of them is edited.
//!
//! ## Modules
//!
//! - `math` - Complex helpers and dB conversions
//! - `immittance` - Impedance/admittance tagged value
//! - `interpolation` - Interpolation laws for animated edits
//! - `view_model` - The quantity network, trace recorder, hold mode and undo
//! - `config` - Preferences threaded into the view model
//!
//! ```
//! use num_complex::Complex64;
//! use rfcalc_core::ViewModel;
//!
//! let mut vm = ViewModel::new();
//! vm.set_impedance(Complex64::new(100.0, 0.0));
//! assert!((vm.swr() - 2.0).abs() < 1e-12);
//! ```

pub mod config;
pub mod constants;
pub mod immittance;
pub mod interpolation;
pub mod math;
pub mod view_model;

pub use config::{TracePersistence, ViewModelConfig};
pub use immittance::{Immittance, ImmittanceKind};
pub use interpolation::{Interpolate, Interpolation};
pub use view_model::{
    AngleOrientation, CircuitMode, ComplexQuantity, CursorConstraints, DisplayMode, Hold,
    Quantity, Snapshot, SnapshotError, ViewModel,
};
