//! Immittance - impedance or admittance as one quantity
//!
//! Exactly one representation is stored; the other is derived through
//! [`reciprocal`], so `0 Ω` reads back as an infinite admittance and vice versa.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};

use crate::math::{ensure_positive_real, is_infinite, reciprocal};

/// Which representation an [`Immittance`] stores.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ImmittanceKind {
    #[default]
    Impedance,
    Admittance,
}

/// An impedance (Ω) or admittance (S).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Immittance {
    Impedance(Complex64),
    Admittance(Complex64),
}

impl Immittance {
    /// Build from a kind tag and the stored value
    pub fn new(kind: ImmittanceKind, value: Complex64) -> Self {
        match kind {
            ImmittanceKind::Impedance => Immittance::Impedance(value),
            ImmittanceKind::Admittance => Immittance::Admittance(value),
        }
    }

    /// Pure resistance `r` (Ω) as an impedance
    pub fn resistance(r: f64) -> Self {
        Immittance::Impedance(Complex64::new(r, 0.0))
    }

    pub fn kind(&self) -> ImmittanceKind {
        match self {
            Immittance::Impedance(_) => ImmittanceKind::Impedance,
            Immittance::Admittance(_) => ImmittanceKind::Admittance,
        }
    }

    /// The stored value, whichever kind it is
    pub fn value(&self) -> Complex64 {
        match *self {
            Immittance::Impedance(z) => z,
            Immittance::Admittance(y) => y,
        }
    }

    pub fn impedance(&self) -> Complex64 {
        match *self {
            Immittance::Impedance(z) => z,
            Immittance::Admittance(y) => reciprocal(y),
        }
    }

    pub fn admittance(&self) -> Complex64 {
        match *self {
            Immittance::Impedance(z) => reciprocal(z),
            Immittance::Admittance(y) => y,
        }
    }

    /// View in the requested representation
    pub fn as_kind(&self, kind: ImmittanceKind) -> Complex64 {
        match kind {
            ImmittanceKind::Impedance => self.impedance(),
            ImmittanceKind::Admittance => self.admittance(),
        }
    }

    /// True when the stored value has infinite length
    pub fn is_infinite(&self) -> bool {
        is_infinite(self.value())
    }

    /// Same kind with the stored real part clamped to be non-negative
    pub fn with_positive_real(self) -> Self {
        Immittance::new(self.kind(), ensure_positive_real(self.value()))
    }

    /// A valid reference is a pure, positive, finite real value
    pub fn is_valid_reference(&self) -> bool {
        let v = self.value();
        v.re > 0.0 && v.re.is_finite() && v.im == 0.0
    }
}

impl Default for Immittance {
    fn default() -> Self {
        Immittance::resistance(50.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_derived_view_is_reciprocal() {
        let imm = Immittance::Impedance(Complex64::new(50.0, 50.0));
        let y = imm.admittance();
        assert_relative_eq!(y.re, 0.01, epsilon = 1e-12);
        assert_relative_eq!(y.im, -0.01, epsilon = 1e-12);
        assert_eq!(imm.impedance(), Complex64::new(50.0, 50.0));
    }

    #[test]
    fn test_short_circuit_is_infinite_admittance() {
        let imm = Immittance::Impedance(Complex64::new(0.0, 0.0));
        assert!(is_infinite(imm.admittance()));
        assert!(!imm.is_infinite());
    }

    #[test]
    fn test_equality_includes_kind() {
        let z = Immittance::Impedance(Complex64::new(1.0, 0.0));
        let y = Immittance::Admittance(Complex64::new(1.0, 0.0));
        assert_ne!(z, y);
        assert_eq!(z.impedance(), y.impedance());
    }

    #[test]
    fn test_reference_validation() {
        assert!(Immittance::resistance(50.0).is_valid_reference());
        assert!(Immittance::Admittance(Complex64::new(0.02, 0.0)).is_valid_reference());
        assert!(!Immittance::resistance(0.0).is_valid_reference());
        assert!(!Immittance::resistance(-50.0).is_valid_reference());
        assert!(!Immittance::Impedance(Complex64::new(50.0, 1.0)).is_valid_reference());
        assert!(!Immittance::resistance(f64::INFINITY).is_valid_reference());
    }

    #[test]
    fn test_with_positive_real() {
        let imm = Immittance::Admittance(Complex64::new(-0.1, 0.2)).with_positive_real();
        assert_eq!(imm, Immittance::Admittance(Complex64::new(0.0, 0.2)));
    }
}
