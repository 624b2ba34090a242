//! Numerical constants for RF calculations
//!
//! Provides the tolerances and fixed sizes shared by the state model,
//! the trace recorder and the checkpoint history.

use std::time::Duration;

/// Tolerance for detecting a reflection coefficient of unit length.
/// Guards SWR and transmitted power against division by near-zero.
pub const NEAR_ZERO: f64 = 1e-15;

/// Absolute threshold below which exposed impedance/admittance parts are
/// reported as exactly zero, hiding noise from reciprocal round-trips.
pub const ZERO_CORRECTION: f64 = 1e-10;

/// Propagation speed used for wavelength calculations (m/s).
pub const SPEED_OF_LIGHT: f64 = 3e8;

/// Number of interpolation steps in a trace sweep. A sweep visits
/// `TRACE_RECORD_LENGTH + 1` states, both endpoints included.
pub const TRACE_RECORD_LENGTH: usize = 100;

/// Maximum number of undo checkpoints retained.
pub const CHECKPOINT_CAPACITY: usize = 32;

/// Time the trace takes to shrink to nothing once fading starts.
pub const TRACE_FADE_DURATION: Duration = Duration::from_millis(500);

/// Delay before fading starts under [`TracePersistence::Pause`](crate::config::TracePersistence).
pub const TRACE_FADE_PAUSE: Duration = Duration::from_millis(1500);
