//! Core ViewModel struct and primary state
//!
//! Holds only the primary fields; every RF quantity is derived on read.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use std::ops::{Deref, DerefMut};
use tracing::debug;

use super::checkpoint::Checkpoints;
use super::hold::Hold;
use super::trace::TraceFade;
use crate::config::ViewModelConfig;
use crate::constants::SPEED_OF_LIGHT;
use crate::immittance::{Immittance, ImmittanceKind};
use crate::math::zero_corrected_complex;

/// Which representation the user is looking at
pub type DisplayMode = ImmittanceKind;

/// Which representation defines inductance and capacitance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CircuitMode {
    /// L and C from the reactance of the impedance
    #[default]
    Series,
    /// L and C from the susceptance of the admittance
    Parallel,
}

/// Direction in which electrical length increases on the chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AngleOrientation {
    /// Towards the generator
    #[default]
    Clockwise,
    /// Towards the load
    Counterclockwise,
}

impl AngleOrientation {
    /// Sign applied to `phase(Γ) - refAngle`
    pub fn sign(&self) -> f64 {
        match self {
            AngleOrientation::Clockwise => -1.0,
            AngleOrientation::Counterclockwise => 1.0,
        }
    }
}

/// Cursor lock toggles. Independent flags, no cross-invariants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CursorConstraints {
    pub constant_resistance: bool,
    pub constant_reactance: bool,
    pub constant_conductance: bool,
    pub constant_susceptance: bool,
}

/// The immittance state model
///
/// One consistent tuple of (immittance, reference, frequency, velocity
/// factor, circuit mode, reference angle, angle orientation) from which
/// every RF quantity is computed. Out-of-domain writes are ignored; read the
/// quantity back to see whether a write took effect.
#[derive(Debug, Clone)]
pub struct ViewModel {
    pub(crate) config: ViewModelConfig,
    pub(crate) display_mode: DisplayMode,
    pub(crate) circuit_mode: CircuitMode,
    pub(crate) immittance: Immittance,
    pub(crate) reference: Immittance,
    pub(crate) frequency: f64,
    pub(crate) velocity_factor: f64,
    pub(crate) ref_angle: f64,
    pub(crate) angle_orientation: AngleOrientation,
    pub(crate) cursor: CursorConstraints,
    pub(crate) hold: Hold,
    pub(crate) trace: Vec<Complex64>,
    pub(crate) fade: Option<TraceFade>,
    pub(crate) checkpoints: Checkpoints,
    pub(crate) trace_recording_enabled: bool,
    pub(crate) checkpoints_enabled: bool,
}

impl ViewModel {
    /// Default state (50 Ω matched load at 100 MHz) with default configuration
    pub fn new() -> Self {
        Self::with_config(ViewModelConfig::default())
    }

    /// Default state with the given configuration. The initial state is
    /// recorded as the first checkpoint.
    pub fn with_config(config: ViewModelConfig) -> Self {
        let mut model = Self::bare(config);
        model.add_checkpoint();
        model
    }

    /// Default state with an empty checkpoint history
    pub(crate) fn bare(config: ViewModelConfig) -> Self {
        let checkpoints = Checkpoints::new(config.checkpoint_capacity);
        Self {
            config,
            display_mode: DisplayMode::Impedance,
            circuit_mode: CircuitMode::Series,
            immittance: Immittance::resistance(50.0),
            reference: Immittance::resistance(50.0),
            frequency: 100e6,
            velocity_factor: 1.0,
            ref_angle: 0.0,
            angle_orientation: AngleOrientation::Clockwise,
            cursor: CursorConstraints::default(),
            hold: Hold::None,
            trace: Vec::new(),
            fade: None,
            checkpoints,
            trace_recording_enabled: true,
            checkpoints_enabled: true,
        }
    }

    pub fn config(&self) -> &ViewModelConfig {
        &self.config
    }

    // ------------------------------------------------------------------
    // Immittance
    // ------------------------------------------------------------------

    /// The stored immittance
    pub fn immittance(&self) -> Immittance {
        self.immittance
    }

    /// Set the working immittance. Clears hold and records a checkpoint.
    pub fn set_immittance(&mut self, immittance: Immittance) {
        if !self.write_immittance(immittance) {
            return;
        }
        self.hold = Hold::None;
        self.add_checkpoint();
    }

    /// Impedance (Ω), zero-corrected
    pub fn impedance(&self) -> Complex64 {
        zero_corrected_complex(self.immittance.impedance())
    }

    pub fn set_impedance(&mut self, z: Complex64) {
        self.set_immittance(Immittance::Impedance(z));
    }

    /// Admittance (S), zero-corrected
    pub fn admittance(&self) -> Complex64 {
        zero_corrected_complex(self.immittance.admittance())
    }

    pub fn set_admittance(&mut self, y: Complex64) {
        self.set_immittance(Immittance::Admittance(y));
    }

    /// Immittance in the current display representation
    pub fn displayed_immittance(&self) -> Complex64 {
        zero_corrected_complex(self.immittance.as_kind(self.display_mode))
    }

    /// Store an immittance with its real part clamped non-negative.
    /// Returns false (and leaves the state untouched) for NaN input.
    pub(crate) fn write_immittance(&mut self, immittance: Immittance) -> bool {
        let value = immittance.value();
        if value.re.is_nan() || value.im.is_nan() {
            debug!(?immittance, "rejected immittance write: NaN component");
            return false;
        }
        self.immittance = immittance.with_positive_real();
        true
    }

    // ------------------------------------------------------------------
    // Reference
    // ------------------------------------------------------------------

    pub fn reference_immittance(&self) -> Immittance {
        self.reference
    }

    /// Set the reference. Must be a pure positive real value, else ignored.
    pub fn set_reference_immittance(&mut self, reference: Immittance) {
        if !reference.is_valid_reference() {
            debug!(?reference, "rejected reference write: not a positive real value");
            return;
        }
        self.reference = reference;
        self.add_checkpoint();
    }

    /// Reference impedance Z₀ (Ω)
    pub fn reference_impedance(&self) -> f64 {
        self.reference.impedance().re
    }

    /// Reference admittance Y₀ (S)
    pub fn reference_admittance(&self) -> f64 {
        self.reference.admittance().re
    }

    // ------------------------------------------------------------------
    // Frequency and line parameters
    // ------------------------------------------------------------------

    /// Frequency (Hz)
    pub fn frequency(&self) -> f64 {
        self.frequency
    }

    /// Angular frequency ω = 2πf (rad/s)
    pub fn omega(&self) -> f64 {
        std::f64::consts::TAU * self.frequency
    }

    pub fn velocity_factor(&self) -> f64 {
        self.velocity_factor
    }

    /// Set the velocity factor, ignored outside (0, 1]
    pub fn set_velocity_factor(&mut self, velocity_factor: f64) {
        if !(velocity_factor > 0.0 && velocity_factor <= 1.0) {
            debug!(velocity_factor, "rejected velocity factor write: outside (0, 1]");
            return;
        }
        self.velocity_factor = velocity_factor;
        self.add_checkpoint();
    }

    /// Wavelength on the line (m)
    pub fn wavelength(&self) -> f64 {
        self.velocity_factor * SPEED_OF_LIGHT / self.frequency
    }

    /// Set the frequency through the wavelength it produces on the line
    pub fn set_wavelength(&mut self, wavelength: f64) {
        if !(wavelength > 0.0 && wavelength.is_finite()) {
            debug!(wavelength, "rejected wavelength write: not positive and finite");
            return;
        }
        self.set_frequency(self.velocity_factor * SPEED_OF_LIGHT / wavelength);
    }

    /// Reference phase angle for electrical-length zeroing (rad)
    pub fn ref_angle(&self) -> f64 {
        self.ref_angle
    }

    pub fn set_ref_angle(&mut self, ref_angle: f64) {
        if !ref_angle.is_finite() {
            debug!(ref_angle, "rejected reference angle write: not finite");
            return;
        }
        self.ref_angle = ref_angle;
        self.add_checkpoint();
    }

    pub fn angle_orientation(&self) -> AngleOrientation {
        self.angle_orientation
    }

    pub fn set_angle_orientation(&mut self, orientation: AngleOrientation) {
        self.angle_orientation = orientation;
        self.add_checkpoint();
    }

    // ------------------------------------------------------------------
    // Modes and toggles
    // ------------------------------------------------------------------

    pub fn circuit_mode(&self) -> CircuitMode {
        self.circuit_mode
    }

    pub fn set_circuit_mode(&mut self, mode: CircuitMode) {
        self.circuit_mode = mode;
        self.add_checkpoint();
    }

    pub fn display_mode(&self) -> DisplayMode {
        self.display_mode
    }

    pub fn set_display_mode(&mut self, mode: DisplayMode) {
        self.display_mode = mode;
        self.add_checkpoint();
    }

    pub fn cursor_constraints(&self) -> CursorConstraints {
        self.cursor
    }

    pub fn set_cursor_constraints(&mut self, cursor: CursorConstraints) {
        self.cursor = cursor;
        self.add_checkpoint();
    }

    // ------------------------------------------------------------------
    // Re-entrancy guards
    // ------------------------------------------------------------------

    /// Disable checkpoint recording until the guard drops
    pub(crate) fn suppress_checkpoints(&mut self) -> Suppressed<'_> {
        Suppressed::new(self, false)
    }

    /// Disable trace recording and checkpoints until the guard drops
    pub(crate) fn suppress_recording(&mut self) -> Suppressed<'_> {
        Suppressed::new(self, true)
    }
}

impl Default for ViewModel {
    fn default() -> Self {
        Self::new()
    }
}

/// Scoped suppression of checkpoint (and optionally trace) recording.
///
/// Prior flag values are restored on drop, on every exit path.
pub(crate) struct Suppressed<'a> {
    model: &'a mut ViewModel,
    trace_recording: bool,
    checkpoints: bool,
}

impl<'a> Suppressed<'a> {
    fn new(model: &'a mut ViewModel, suppress_trace: bool) -> Self {
        let trace_recording = model.trace_recording_enabled;
        let checkpoints = model.checkpoints_enabled;
        model.checkpoints_enabled = false;
        if suppress_trace {
            model.trace_recording_enabled = false;
        }
        Self {
            model,
            trace_recording,
            checkpoints,
        }
    }

    /// Re-enable checkpoints early, before the guard drops
    pub(crate) fn restore_checkpoints(&mut self) {
        self.model.checkpoints_enabled = self.checkpoints;
    }
}

impl Deref for Suppressed<'_> {
    type Target = ViewModel;

    fn deref(&self) -> &ViewModel {
        self.model
    }
}

impl DerefMut for Suppressed<'_> {
    fn deref_mut(&mut self) -> &mut ViewModel {
        self.model
    }
}

impl Drop for Suppressed<'_> {
    fn drop(&mut self) {
        self.model.trace_recording_enabled = self.trace_recording;
        self.model.checkpoints_enabled = self.checkpoints;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state() {
        let vm = ViewModel::new();
        assert_eq!(vm.impedance(), Complex64::new(50.0, 0.0));
        assert_eq!(vm.reference_impedance(), 50.0);
        assert_eq!(vm.frequency(), 100e6);
        assert_eq!(vm.velocity_factor(), 1.0);
        assert_eq!(vm.checkpoint_count(), 1);
    }

    #[test]
    fn test_guard_restores_flags() {
        let mut vm = ViewModel::new();
        {
            let guard = vm.suppress_recording();
            assert!(!guard.checkpoints_enabled);
            assert!(!guard.trace_recording_enabled);
        }
        assert!(vm.checkpoints_enabled);
        assert!(vm.trace_recording_enabled);
    }

    #[test]
    fn test_nested_guards_keep_outer_suppression() {
        let mut vm = ViewModel::new();
        let mut outer = vm.suppress_checkpoints();
        {
            let inner = outer.suppress_checkpoints();
            drop(inner);
        }
        assert!(!outer.checkpoints_enabled);
        drop(outer);
        assert!(vm.checkpoints_enabled);
    }

    #[test]
    fn test_negative_real_is_clamped() {
        let mut vm = ViewModel::new();
        vm.set_impedance(Complex64::new(-10.0, 25.0));
        assert_eq!(vm.impedance(), Complex64::new(0.0, 25.0));
    }

    #[test]
    fn test_nan_immittance_is_rejected() {
        let mut vm = ViewModel::new();
        vm.set_impedance(Complex64::new(f64::NAN, 1.0));
        assert_eq!(vm.impedance(), Complex64::new(50.0, 0.0));
        assert_eq!(vm.checkpoint_count(), 1);
    }

    #[test]
    fn test_velocity_factor_domain() {
        let mut vm = ViewModel::new();
        vm.set_velocity_factor(0.66);
        assert_eq!(vm.velocity_factor(), 0.66);
        vm.set_velocity_factor(0.0);
        vm.set_velocity_factor(1.5);
        vm.set_velocity_factor(f64::NAN);
        assert_eq!(vm.velocity_factor(), 0.66);
    }

    #[test]
    fn test_reference_rejects_non_real() {
        let mut vm = ViewModel::new();
        vm.set_reference_immittance(Immittance::Impedance(Complex64::new(75.0, 5.0)));
        vm.set_reference_immittance(Immittance::resistance(-75.0));
        assert_eq!(vm.reference_impedance(), 50.0);

        vm.set_reference_immittance(Immittance::Admittance(Complex64::new(0.02, 0.0)));
        assert!((vm.reference_impedance() - 50.0).abs() < 1e-12);
        assert_eq!(vm.reference_admittance(), 0.02);
    }

    #[test]
    fn test_wavelength() {
        let mut vm = ViewModel::new();
        assert!((vm.wavelength() - 3.0).abs() < 1e-12);
        vm.set_wavelength(1.5);
        assert!((vm.frequency() - 200e6).abs() < 1e-3);
        vm.set_wavelength(0.0);
        assert!((vm.frequency() - 200e6).abs() < 1e-3);
    }
}
