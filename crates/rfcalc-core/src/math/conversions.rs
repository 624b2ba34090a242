//! Unit conversion functions
//!
//! Conversions between linear and logarithmic representations of the
//! scalar RF quantities (SWR, return loss, transmitted power).

/// Convert magnitude to dB (20*log10(mag))
pub fn magnitude_2_db(mag: f64) -> f64 {
    20.0 * mag.log10()
}

/// Convert dB to magnitude (10^(dB/20))
pub fn db_2_magnitude(db: f64) -> f64 {
    10.0_f64.powf(db / 20.0)
}

/// Convert a power ratio to dB (10*log10(p))
pub fn power_2_db10(power: f64) -> f64 {
    10.0 * power.log10()
}

/// Convert dB to a power ratio (10^(dB/10))
pub fn db10_2_power(db: f64) -> f64 {
    10.0_f64.powf(db / 10.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_magnitude_2_db() {
        assert_relative_eq!(magnitude_2_db(10.0), 20.0, epsilon = 1e-10);
        assert_eq!(magnitude_2_db(0.0), f64::NEG_INFINITY);
    }

    #[test]
    fn test_db_2_magnitude() {
        assert_relative_eq!(db_2_magnitude(20.0), 10.0, epsilon = 1e-10);
        assert_relative_eq!(db_2_magnitude(-6.0), 0.501187, epsilon = 1e-6);
    }

    #[test]
    fn test_power_db10() {
        assert_relative_eq!(power_2_db10(0.5), -3.0103, epsilon = 1e-4);
        assert_relative_eq!(db10_2_power(-10.0), 0.1, epsilon = 1e-12);
    }
}
