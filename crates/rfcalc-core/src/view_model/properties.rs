//! Derived RF quantities
//!
//! Resistive/reactive parts, reflection and transmission coefficients,
//! SWR, return loss, dissipation/quality factor and electrical length.
//! Every getter is a pure function of the primary state; every setter
//! rewrites the immittance and lets everything else follow.

use num_complex::Complex64;
use std::f64::consts::TAU;
use tracing::debug;

use super::core::ViewModel;
use super::hold::Hold;
use crate::constants::NEAR_ZERO;
use crate::immittance::{Immittance, ImmittanceKind};
use crate::math::{
    db10_2_power, db_2_magnitude, divide, is_infinite, magnitude_2_db, normalize_angle,
    power_2_db10,
};

/// True when `|Γ|` is 1 within [`NEAR_ZERO`]
#[inline]
fn is_total_reflection(magnitude: f64) -> bool {
    (magnitude - 1.0).abs() < NEAR_ZERO
}

/// `reference * ratio` for a pure real reference, keeping ∞ canonical
#[inline]
fn scale(reference: f64, ratio: Complex64) -> Complex64 {
    if is_infinite(ratio) {
        ratio
    } else {
        ratio * reference
    }
}

impl ViewModel {
    // ------------------------------------------------------------------
    // Rectangular parts
    // ------------------------------------------------------------------

    /// Resistance R = Re(Z) (Ω)
    pub fn resistance(&self) -> f64 {
        self.impedance().re
    }

    /// Set R, keeping the current reactance
    pub fn set_resistance(&mut self, resistance: f64) {
        let reactance = self.reactance();
        self.set_impedance(Complex64::new(resistance, reactance));
    }

    /// Reactance X = Im(Z) (Ω)
    pub fn reactance(&self) -> f64 {
        self.impedance().im
    }

    /// Set X, keeping the current resistance
    pub fn set_reactance(&mut self, reactance: f64) {
        let resistance = self.resistance();
        self.set_impedance(Complex64::new(resistance, reactance));
    }

    /// Conductance G = Re(Y) (S)
    pub fn conductance(&self) -> f64 {
        self.admittance().re
    }

    /// Set G, keeping the current susceptance
    pub fn set_conductance(&mut self, conductance: f64) {
        let susceptance = self.susceptance();
        self.set_admittance(Complex64::new(conductance, susceptance));
    }

    /// Susceptance B = Im(Y) (S)
    pub fn susceptance(&self) -> f64 {
        self.admittance().im
    }

    /// Set B, keeping the current conductance
    pub fn set_susceptance(&mut self, susceptance: f64) {
        let conductance = self.conductance();
        self.set_admittance(Complex64::new(conductance, susceptance));
    }

    // ------------------------------------------------------------------
    // Reflection coefficient
    // ------------------------------------------------------------------

    /// Reflection coefficient Γ
    ///
    /// `(Z - Z₀)/(Z + Z₀)` for a stored impedance, `(Y₀ - Y)/(Y₀ + Y)` for a
    /// stored admittance. An infinite stored value gives exactly `1` or `-1`.
    pub fn reflection_coefficient(&self) -> Complex64 {
        match self.immittance {
            Immittance::Impedance(z) => {
                if is_infinite(z) {
                    Complex64::new(1.0, 0.0)
                } else {
                    let z0 = self.reference_impedance();
                    divide(z - z0, z + z0)
                }
            }
            Immittance::Admittance(y) => {
                if is_infinite(y) {
                    Complex64::new(-1.0, 0.0)
                } else {
                    let y0 = self.reference_admittance();
                    divide(y0 - y, y0 + y)
                }
            }
        }
    }

    /// Set Γ, keeping the stored immittance kind
    pub fn set_reflection_coefficient(&mut self, gamma: Complex64) {
        if gamma.re.is_nan() || gamma.im.is_nan() {
            debug!(%gamma, "rejected reflection coefficient write: NaN");
            return;
        }
        let one = Complex64::new(1.0, 0.0);
        let immittance = match self.immittance.kind() {
            ImmittanceKind::Impedance => Immittance::Impedance(scale(
                self.reference_impedance(),
                divide(one + gamma, one - gamma),
            )),
            ImmittanceKind::Admittance => Immittance::Admittance(scale(
                self.reference_admittance(),
                divide(one - gamma, one + gamma),
            )),
        };
        self.set_immittance(immittance);
    }

    /// |Γ|
    pub fn reflection_magnitude(&self) -> f64 {
        self.reflection_coefficient().norm()
    }

    /// Set |Γ|, keeping its phase
    pub fn set_reflection_magnitude(&mut self, magnitude: f64) {
        let phase = self.reflection_phase();
        if !(magnitude >= 0.0) || phase.is_nan() {
            debug!(magnitude, phase, "rejected reflection magnitude write");
            return;
        }
        self.set_reflection_coefficient(Complex64::from_polar(magnitude, phase));
    }

    /// Phase of Γ in (-π, π]
    pub fn reflection_phase(&self) -> f64 {
        self.reflection_coefficient().arg()
    }

    /// Set the phase of Γ, keeping |Γ|
    pub fn set_reflection_phase(&mut self, phase: f64) {
        let magnitude = self.reflection_magnitude();
        if !phase.is_finite() || magnitude.is_nan() {
            debug!(magnitude, phase, "rejected reflection phase write");
            return;
        }
        self.set_reflection_coefficient(Complex64::from_polar(magnitude, phase));
    }

    // ------------------------------------------------------------------
    // Standing wave ratio and losses
    // ------------------------------------------------------------------

    /// SWR = (1 + |Γ|)/(1 - |Γ|), +∞ at total reflection
    pub fn swr(&self) -> f64 {
        let magnitude = self.reflection_magnitude();
        if is_total_reflection(magnitude) {
            f64::INFINITY
        } else {
            (1.0 + magnitude) / (1.0 - magnitude)
        }
    }

    /// Set SWR (≥ 1), keeping the phase of Γ
    pub fn set_swr(&mut self, swr: f64) {
        if !(swr >= 1.0) {
            debug!(swr, "rejected SWR write: below 1");
            return;
        }
        let magnitude = if swr.is_infinite() {
            1.0
        } else {
            (swr - 1.0) / (swr + 1.0)
        };
        self.set_reflection_magnitude(magnitude);
    }

    /// SWR in dB, 20·log10(SWR)
    pub fn swr_db(&self) -> f64 {
        magnitude_2_db(self.swr())
    }

    pub fn set_swr_db(&mut self, swr_db: f64) {
        if !(swr_db >= 0.0) {
            debug!(swr_db, "rejected SWR dB write: negative");
            return;
        }
        self.set_swr(db_2_magnitude(swr_db));
    }

    /// Return loss −20·log10|Γ| (dB), 0 at total reflection
    pub fn return_loss(&self) -> f64 {
        let magnitude = self.reflection_magnitude();
        if is_total_reflection(magnitude) {
            0.0
        } else {
            -magnitude_2_db(magnitude)
        }
    }

    /// Set return loss (≥ 0 dB), keeping the phase of Γ
    pub fn set_return_loss(&mut self, return_loss: f64) {
        if !(return_loss >= 0.0) {
            debug!(return_loss, "rejected return loss write: negative");
            return;
        }
        self.set_reflection_magnitude(db_2_magnitude(-return_loss));
    }

    /// Transmission coefficient T = 1 + Γ
    pub fn transmission_coefficient(&self) -> Complex64 {
        1.0 + self.reflection_coefficient()
    }

    pub fn set_transmission_coefficient(&mut self, transmission: Complex64) {
        self.set_reflection_coefficient(transmission - 1.0);
    }

    /// Transmitted power fraction 1 − |Γ|², exactly 0 at total reflection
    pub fn transmission_power(&self) -> f64 {
        let magnitude = self.reflection_magnitude();
        if is_total_reflection(magnitude) {
            0.0
        } else {
            1.0 - magnitude * magnitude
        }
    }

    /// Set the transmitted power fraction in [0, 1], keeping the phase of Γ
    pub fn set_transmission_power(&mut self, power: f64) {
        if !(0.0..=1.0).contains(&power) {
            debug!(power, "rejected transmission power write: outside [0, 1]");
            return;
        }
        self.set_reflection_magnitude((1.0 - power).sqrt());
    }

    /// Reflection (mismatch) loss −10·log10(1 − |Γ|²) (dB), +∞ at total reflection
    pub fn reflection_loss(&self) -> f64 {
        -power_2_db10(self.transmission_power())
    }

    pub fn set_reflection_loss(&mut self, loss: f64) {
        if !(loss >= 0.0) {
            debug!(loss, "rejected reflection loss write: negative");
            return;
        }
        self.set_transmission_power(db10_2_power(-loss));
    }

    // ------------------------------------------------------------------
    // Dissipation and quality factor
    // ------------------------------------------------------------------

    /// D = real/|imag| of the stored immittance
    pub fn dissipation_factor(&self) -> f64 {
        let v = self.immittance.value();
        v.re / v.im.abs()
    }

    /// Q = |imag|/real of the stored immittance
    pub fn quality_factor(&self) -> f64 {
        let v = self.immittance.value();
        v.im.abs() / v.re
    }

    /// Set D on the stored immittance.
    ///
    /// With an L or C hold the imaginary part is kept and the real part
    /// follows; without a hold the magnitude is kept and the phase rotates.
    /// Hold is left as it was.
    pub fn set_dissipation_factor(&mut self, dissipation: f64) {
        if !(dissipation >= 0.0) {
            debug!(dissipation, "rejected dissipation factor write: negative or NaN");
            return;
        }
        let value = self.immittance.value();
        let updated = match self.hold {
            Hold::Inductance | Hold::Capacitance => {
                let real = dissipation * value.im.abs();
                if value.im == 0.0 || !real.is_finite() {
                    debug!(dissipation, "dissipation factor undetermined for held reactance");
                    return;
                }
                Complex64::new(real, value.im)
            }
            Hold::None => {
                let magnitude = value.norm();
                if !magnitude.is_finite() {
                    debug!(dissipation, "dissipation factor undetermined for infinite immittance");
                    return;
                }
                let angle = 1.0_f64.atan2(dissipation);
                let sign = if value.im < 0.0 { -1.0 } else { 1.0 };
                Complex64::new(magnitude * angle.cos(), sign * magnitude * angle.sin())
            }
        };
        if self.write_immittance(Immittance::new(self.immittance.kind(), updated)) {
            self.add_checkpoint();
        }
    }

    /// Set Q; equivalent to setting D = 1/Q
    pub fn set_quality_factor(&mut self, quality: f64) {
        if !(quality >= 0.0) {
            debug!(quality, "rejected quality factor write: negative or NaN");
            return;
        }
        self.set_dissipation_factor(1.0 / quality);
    }

    // ------------------------------------------------------------------
    // Electrical length
    // ------------------------------------------------------------------

    /// Electrical length from the reference plane, in wavelengths [0, 0.5)
    pub fn electrical_length(&self) -> f64 {
        let sign = self.angle_orientation.sign();
        normalize_angle(sign * (self.reflection_phase() - self.ref_angle)) / (2.0 * TAU)
    }

    /// Rotate Γ to the given electrical length, keeping |Γ|
    pub fn set_electrical_length(&mut self, wavelengths: f64) {
        if !wavelengths.is_finite() {
            debug!(wavelengths, "rejected electrical length write: not finite");
            return;
        }
        let sign = self.angle_orientation.sign();
        self.set_reflection_phase(self.ref_angle + sign * wavelengths * 2.0 * TAU);
    }

    /// Physical distance on the line (m)
    pub fn distance(&self) -> f64 {
        self.electrical_length() * self.wavelength()
    }

    pub fn set_distance(&mut self, distance: f64) {
        self.set_electrical_length(distance / self.wavelength());
    }

    /// Make the current position the zero of electrical length
    pub fn zero_length(&mut self) {
        let phase = self.reflection_phase();
        if phase.is_nan() {
            debug!("zero length ignored: reflection phase undefined");
            return;
        }
        self.ref_angle = phase;
        self.add_checkpoint();
    }
}
