//! Complex helpers
//!
//! `Complex64` from `num-complex` supplies the arithmetic. The functions here
//! add the conventions the immittance model relies on: a canonical infinite
//! value for `1/0`, a symmetric remainder for shortest-path angles, and zero
//! correction for display.

use num_complex::Complex64;
use std::f64::consts::TAU;

use crate::constants::ZERO_CORRECTION;

/// The canonical "infinite" complex value, length `+inf` and phase 0.
pub const INFINITE: Complex64 = Complex64::new(f64::INFINITY, 0.0);

/// True when the value has infinite length.
#[inline]
pub fn is_infinite(z: Complex64) -> bool {
    z.re.is_infinite() || z.im.is_infinite()
}

/// Reciprocal with `0 -> inf` and `inf -> 0`.
pub fn reciprocal(z: Complex64) -> Complex64 {
    if is_infinite(z) {
        Complex64::new(0.0, 0.0)
    } else if z.re == 0.0 && z.im == 0.0 {
        INFINITE
    } else {
        z.inv()
    }
}

/// Division with a zero divisor mapped to [`INFINITE`].
pub fn divide(a: Complex64, b: Complex64) -> Complex64 {
    if b.re == 0.0 && b.im == 0.0 {
        if a.re == 0.0 && a.im == 0.0 {
            Complex64::new(f64::NAN, f64::NAN)
        } else {
            INFINITE
        }
    } else {
        a / b
    }
}

/// IEEE-754 remainder: `x - n*y` where `n` is `x/y` rounded half to even.
///
/// The result lies in `[-|y|/2, |y|/2]`, which makes `remainder(b - a, 2π)`
/// the shortest signed angular step from `a` to `b`.
///
/// ```
/// use rfcalc_core::math::remainder;
/// assert_eq!(remainder(10.0, 3.0), 1.0);
/// assert_eq!(remainder(-10.0, 3.0), -1.0);
/// assert!(remainder(1.0, 0.0).is_nan());
/// ```
pub fn remainder(x: f64, y: f64) -> f64 {
    if x.is_nan() || y.is_nan() || x.is_infinite() || y == 0.0 {
        return f64::NAN;
    }
    if y.is_infinite() {
        return x;
    }
    let n = (x / y).round_ties_even();
    x - n * y
}

/// Map an angle into `[0, 2π)`.
pub fn normalize_angle(angle: f64) -> f64 {
    let r = remainder(angle, TAU);
    if r >= 0.0 {
        return r;
    }
    // tiny negative remainders round up to exactly 2π
    let shifted = r + TAU;
    if shifted >= TAU {
        0.0
    } else {
        shifted
    }
}

/// Report values within [`ZERO_CORRECTION`] of zero as exactly zero.
#[inline]
pub fn zero_corrected(x: f64) -> f64 {
    if x.abs() < ZERO_CORRECTION {
        0.0
    } else {
        x
    }
}

/// Zero-correct both parts of a complex value.
#[inline]
pub fn zero_corrected_complex(z: Complex64) -> Complex64 {
    Complex64::new(zero_corrected(z.re), zero_corrected(z.im))
}

/// Clamp the real part to be non-negative, keeping the imaginary part.
#[inline]
pub fn ensure_positive_real(z: Complex64) -> Complex64 {
    if z.re < 0.0 {
        Complex64::new(0.0, z.im)
    } else {
        z
    }
}
