//! Equivalent inductance and capacitance
//!
//! Series mode reads L and C from the reactance, parallel mode from the
//! susceptance. Writing either marks it as held across frequency changes.

use num_complex::Complex64;
use tracing::debug;

use super::core::{CircuitMode, ViewModel};
use super::hold::Hold;
use crate::immittance::Immittance;

impl ViewModel {
    /// Equivalent inductance (H)
    pub fn inductance(&self) -> f64 {
        let omega = self.omega();
        match self.circuit_mode {
            CircuitMode::Series => self.reactance() / omega,
            CircuitMode::Parallel => -1.0 / (omega * self.susceptance()),
        }
    }

    /// Equivalent capacitance (F)
    pub fn capacitance(&self) -> f64 {
        let omega = self.omega();
        match self.circuit_mode {
            CircuitMode::Series => -1.0 / (omega * self.reactance()),
            CircuitMode::Parallel => self.susceptance() / omega,
        }
    }

    /// Set the inductance and hold it across frequency changes
    pub fn set_inductance(&mut self, inductance: f64) {
        let omega = self.omega();
        let written = match self.circuit_mode {
            CircuitMode::Series => self.write_reactance(omega * inductance),
            CircuitMode::Parallel => self.write_susceptance(-1.0 / (omega * inductance)),
        };
        if !written {
            debug!(inductance, mode = ?self.circuit_mode, "rejected inductance write");
            return;
        }
        self.hold = Hold::Inductance;
        self.add_checkpoint();
    }

    /// Set the capacitance and hold it across frequency changes
    pub fn set_capacitance(&mut self, capacitance: f64) {
        let omega = self.omega();
        let written = match self.circuit_mode {
            CircuitMode::Series => self.write_reactance(-1.0 / (omega * capacitance)),
            CircuitMode::Parallel => self.write_susceptance(omega * capacitance),
        };
        if !written {
            debug!(capacitance, mode = ?self.circuit_mode, "rejected capacitance write");
            return;
        }
        self.hold = Hold::Capacitance;
        self.add_checkpoint();
    }

    fn write_reactance(&mut self, reactance: f64) -> bool {
        if !reactance.is_finite() {
            return false;
        }
        let resistance = self.resistance();
        self.write_immittance(Immittance::Impedance(Complex64::new(resistance, reactance)))
    }

    fn write_susceptance(&mut self, susceptance: f64) -> bool {
        if !susceptance.is_finite() {
            return false;
        }
        let conductance = self.conductance();
        self.write_immittance(Immittance::Admittance(Complex64::new(conductance, susceptance)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewModelConfig;
    use approx::assert_relative_eq;
    use std::f64::consts::TAU;

    fn model() -> ViewModel {
        ViewModel::with_config(ViewModelConfig::without_animations())
    }

    #[test]
    fn test_series_components() {
        let mut vm = model();
        vm.set_impedance(Complex64::new(50.0, 100.0));
        let omega = TAU * 100e6;
        assert_relative_eq!(vm.inductance(), 100.0 / omega, epsilon = 1e-18);
        assert_relative_eq!(vm.capacitance(), -1.0 / (omega * 100.0), epsilon = 1e-18);
    }

    #[test]
    fn test_parallel_components() {
        let mut vm = model();
        vm.set_circuit_mode(CircuitMode::Parallel);
        vm.set_admittance(Complex64::new(0.02, 0.01));
        let omega = TAU * 100e6;
        assert_relative_eq!(vm.capacitance(), 0.01 / omega, epsilon = 1e-18);
        assert_relative_eq!(vm.inductance(), -1.0 / (omega * 0.01), epsilon = 1e-15);
    }

    #[test]
    fn test_set_inductance_series() {
        let mut vm = model();
        vm.set_impedance(Complex64::new(25.0, 0.0));
        vm.set_inductance(1e-7);
        assert_relative_eq!(vm.reactance(), TAU * 100e6 * 1e-7, epsilon = 1e-9);
        assert_relative_eq!(vm.resistance(), 25.0, epsilon = 1e-12);
        assert_eq!(vm.hold(), Hold::Inductance);
    }

    #[test]
    fn test_set_capacitance_parallel() {
        let mut vm = model();
        vm.set_circuit_mode(CircuitMode::Parallel);
        vm.set_capacitance(1e-12);
        assert_relative_eq!(vm.susceptance(), TAU * 100e6 * 1e-12, epsilon = 1e-15);
        assert_relative_eq!(vm.conductance(), 0.02, epsilon = 1e-15);
        assert_eq!(vm.hold(), Hold::Capacitance);
    }

    #[test]
    fn test_zero_parallel_inductance_rejected() {
        let mut vm = model();
        vm.set_circuit_mode(CircuitMode::Parallel);
        vm.set_inductance(0.0);
        assert_eq!(vm.hold(), Hold::None);
        assert_eq!(vm.impedance(), Complex64::new(50.0, 0.0));
    }

    #[test]
    fn test_direct_write_clears_hold() {
        let mut vm = model();
        vm.set_capacitance(1e-12);
        assert_eq!(vm.hold(), Hold::Capacitance);
        vm.set_resistance(75.0);
        assert_eq!(vm.hold(), Hold::None);
    }
}
