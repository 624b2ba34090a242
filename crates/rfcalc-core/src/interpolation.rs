//! Interpolation laws
//!
//! A sweep turns a jump `from -> to` into intermediate values sampled at
//! `fraction` in `[0, 1]`. The law decides the path: straight lines for
//! rectangular/linear, constant ratio for logarithmic, and shortest arcs
//! for polar.

use num_complex::Complex64;
use std::f64::consts::TAU;

use crate::math::remainder;

/// Interpolation law used by a trace sweep
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interpolation {
    /// `a + (b - a) * f`
    Linear,
    /// Magnitude interpolated in log space, sign snapped to the endpoints
    Logarithmic,
    /// Linear length, shortest signed path on phase
    Polar,
    /// Real and imaginary parts interpolated independently
    Rectangular,
}

/// Values a sweep can interpolate
pub trait Interpolate: Copy {
    /// Law used when the caller does not pick one
    const DEFAULT_INTERPOLATION: Interpolation;

    fn interpolate(from: Self, to: Self, fraction: f64, method: Interpolation) -> Self;
}

impl Interpolate for f64 {
    const DEFAULT_INTERPOLATION: Interpolation = Interpolation::Logarithmic;

    /// Complex-only laws fall back to linear for scalars.
    fn interpolate(from: f64, to: f64, fraction: f64, method: Interpolation) -> f64 {
        match method {
            Interpolation::Logarithmic => logarithmic(from, to, fraction),
            Interpolation::Linear | Interpolation::Polar | Interpolation::Rectangular => {
                linear(from, to, fraction)
            }
        }
    }
}

impl Interpolate for Complex64 {
    const DEFAULT_INTERPOLATION: Interpolation = Interpolation::Rectangular;

    /// `Linear` behaves as `Rectangular`; `Logarithmic` follows the polar
    /// path with the length interpolated logarithmically.
    fn interpolate(from: Complex64, to: Complex64, fraction: f64, method: Interpolation) -> Complex64 {
        match method {
            Interpolation::Rectangular | Interpolation::Linear => rectangular(from, to, fraction),
            Interpolation::Polar => polar(from, to, fraction, linear),
            Interpolation::Logarithmic => polar(from, to, fraction, logarithmic),
        }
    }
}

#[inline]
pub fn linear(a: f64, b: f64, fraction: f64) -> f64 {
    a + (b - a) * fraction
}

/// Constant-ratio interpolation between two values of the same sign.
///
/// Infinite endpoints are replaced by `f64::MAX` carrying the finite
/// endpoint's sign. Endpoints that straddle or touch zero interpolate
/// linearly; a non-finite log result falls back to the arithmetic mean.
pub fn logarithmic(a: f64, b: f64, fraction: f64) -> f64 {
    if a == b {
        return a;
    }
    if a.is_nan() || b.is_nan() {
        return f64::NAN;
    }

    let (a, b) = match (a.is_infinite(), b.is_infinite()) {
        (true, true) => return if fraction >= 1.0 { b } else { a },
        (true, false) => (b.signum() * f64::MAX, b),
        (false, true) => (a, a.signum() * f64::MAX),
        (false, false) => (a, b),
    };

    if a == 0.0 || b == 0.0 || a.signum() != b.signum() {
        return linear(a, b, fraction);
    }

    let magnitude = linear(a.abs().ln(), b.abs().ln(), fraction).exp();
    let value = a.signum() * magnitude;
    if value.is_finite() {
        value
    } else {
        (a + b) / 2.0
    }
}

pub fn rectangular(a: Complex64, b: Complex64, fraction: f64) -> Complex64 {
    Complex64::new(linear(a.re, b.re, fraction), linear(a.im, b.im, fraction))
}

/// Polar path: `length_law` on the length, shortest signed arc on the phase.
/// An undefined phase step (NaN) is treated as no rotation.
pub fn polar(
    a: Complex64,
    b: Complex64,
    fraction: f64,
    length_law: fn(f64, f64, f64) -> f64,
) -> Complex64 {
    let length = length_law(a.norm(), b.norm(), fraction);
    let start = a.arg();
    let mut delta = remainder(b.arg() - start, TAU);
    if delta.is_nan() {
        delta = 0.0;
    }
    Complex64::from_polar(length, start + delta * fraction)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use std::f64::consts::PI;

    #[test]
    fn test_linear() {
        assert_eq!(f64::interpolate(2.0, 4.0, 0.5, Interpolation::Linear), 3.0);
        assert_eq!(f64::interpolate(2.0, 4.0, 0.0, Interpolation::Linear), 2.0);
        assert_eq!(f64::interpolate(2.0, 4.0, 1.0, Interpolation::Linear), 4.0);
    }

    #[test]
    fn test_logarithmic_geometric_midpoint() {
        assert_relative_eq!(logarithmic(1.0, 100.0, 0.5), 10.0, epsilon = 1e-9);
        assert_relative_eq!(logarithmic(-1.0, -100.0, 0.5), -10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_logarithmic_sign_change_is_linear() {
        assert_eq!(logarithmic(-10.0, 10.0, 0.5), 0.0);
        assert_eq!(logarithmic(0.0, 10.0, 0.25), 2.5);
    }

    #[test]
    fn test_logarithmic_infinite_endpoint() {
        let v = logarithmic(10.0, f64::INFINITY, 0.5);
        assert!(v.is_finite());
        assert!(v > 10.0);

        assert_eq!(logarithmic(f64::INFINITY, f64::NEG_INFINITY, 0.5), f64::INFINITY);
        assert_eq!(logarithmic(f64::INFINITY, f64::NEG_INFINITY, 1.0), f64::NEG_INFINITY);
    }

    #[test]
    fn test_rectangular() {
        let mid = Complex64::interpolate(
            Complex64::new(0.0, 0.0),
            Complex64::new(2.0, -4.0),
            0.5,
            Interpolation::Rectangular,
        );
        assert_eq!(mid, Complex64::new(1.0, -2.0));
    }

    #[test]
    fn test_polar_takes_short_arc() {
        let a = Complex64::from_polar(1.0, 170f64.to_radians());
        let b = Complex64::from_polar(1.0, -170f64.to_radians());
        let mid = Complex64::interpolate(a, b, 0.5, Interpolation::Polar);
        assert_relative_eq!(mid.norm(), 1.0, epsilon = 1e-12);
        assert_relative_eq!(mid.arg().abs(), PI, epsilon = 1e-9);
    }

    #[test]
    fn test_polar_from_origin() {
        let b = Complex64::from_polar(0.5, 1.0);
        let mid = polar(Complex64::new(0.0, 0.0), b, 0.5, linear);
        assert_relative_eq!(mid.norm(), 0.25, epsilon = 1e-12);
        assert_relative_eq!(mid.arg(), 0.5, epsilon = 1e-12);
    }

    #[test]
    fn test_polar_nan_phase_is_no_rotation() {
        let a = Complex64::new(1.0, 0.0);
        let b = Complex64::new(f64::NAN, f64::NAN);
        let v = polar(a, b, 0.5, |_, _, _| 1.0);
        assert_eq!(v, Complex64::new(1.0, 0.0));
    }
}
