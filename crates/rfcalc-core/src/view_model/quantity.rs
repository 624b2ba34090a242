//! Quantity dispatch
//!
//! Closed enumerations of the settable quantities, so a widget (or a
//! binding) can address any knob by value and animate edits to it without
//! knowing which setter to call.

use num_complex::Complex64;

use super::core::ViewModel;
use crate::immittance::Immittance;
use crate::interpolation::{Interpolate, Interpolation};

/// Scalar quantities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Quantity {
    Resistance,
    Reactance,
    Conductance,
    Susceptance,
    Inductance,
    Capacitance,
    QualityFactor,
    DissipationFactor,
    Swr,
    SwrDb,
    ReturnLoss,
    ReflectionLoss,
    TransmissionPower,
    ReflectionMagnitude,
    ReflectionPhase,
    ElectricalLength,
    Distance,
    Wavelength,
    Frequency,
    VelocityFactor,
    ReferenceResistance,
}

impl Quantity {
    pub const ALL: [Quantity; 21] = [
        Quantity::Resistance,
        Quantity::Reactance,
        Quantity::Conductance,
        Quantity::Susceptance,
        Quantity::Inductance,
        Quantity::Capacitance,
        Quantity::QualityFactor,
        Quantity::DissipationFactor,
        Quantity::Swr,
        Quantity::SwrDb,
        Quantity::ReturnLoss,
        Quantity::ReflectionLoss,
        Quantity::TransmissionPower,
        Quantity::ReflectionMagnitude,
        Quantity::ReflectionPhase,
        Quantity::ElectricalLength,
        Quantity::Distance,
        Quantity::Wavelength,
        Quantity::Frequency,
        Quantity::VelocityFactor,
        Quantity::ReferenceResistance,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Quantity::Resistance => "resistance",
            Quantity::Reactance => "reactance",
            Quantity::Conductance => "conductance",
            Quantity::Susceptance => "susceptance",
            Quantity::Inductance => "inductance",
            Quantity::Capacitance => "capacitance",
            Quantity::QualityFactor => "quality_factor",
            Quantity::DissipationFactor => "dissipation_factor",
            Quantity::Swr => "swr",
            Quantity::SwrDb => "swr_db",
            Quantity::ReturnLoss => "return_loss",
            Quantity::ReflectionLoss => "reflection_loss",
            Quantity::TransmissionPower => "transmission_power",
            Quantity::ReflectionMagnitude => "reflection_magnitude",
            Quantity::ReflectionPhase => "reflection_phase",
            Quantity::ElectricalLength => "electrical_length",
            Quantity::Distance => "distance",
            Quantity::Wavelength => "wavelength",
            Quantity::Frequency => "frequency",
            Quantity::VelocityFactor => "velocity_factor",
            Quantity::ReferenceResistance => "reference_resistance",
        }
    }

    /// Parse from a snake_case name (case-insensitive)
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_lowercase();
        Self::ALL.iter().copied().find(|q| q.name() == name)
    }

    /// Law used when a widget animates an edit to this quantity
    pub fn default_interpolation(&self) -> Interpolation {
        match self {
            Quantity::ReflectionMagnitude | Quantity::ReflectionPhase => Interpolation::Polar,
            Quantity::ElectricalLength | Quantity::Distance | Quantity::VelocityFactor => {
                Interpolation::Linear
            }
            _ => f64::DEFAULT_INTERPOLATION,
        }
    }
}

/// Complex quantities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ComplexQuantity {
    Impedance,
    Admittance,
    ReflectionCoefficient,
    TransmissionCoefficient,
}

impl ComplexQuantity {
    pub const ALL: [ComplexQuantity; 4] = [
        ComplexQuantity::Impedance,
        ComplexQuantity::Admittance,
        ComplexQuantity::ReflectionCoefficient,
        ComplexQuantity::TransmissionCoefficient,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ComplexQuantity::Impedance => "impedance",
            ComplexQuantity::Admittance => "admittance",
            ComplexQuantity::ReflectionCoefficient => "reflection_coefficient",
            ComplexQuantity::TransmissionCoefficient => "transmission_coefficient",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.to_lowercase();
        Self::ALL.iter().copied().find(|q| q.name() == name)
    }

    pub fn default_interpolation(&self) -> Interpolation {
        Complex64::DEFAULT_INTERPOLATION
    }
}

impl ViewModel {
    /// Read a scalar quantity
    pub fn get(&self, quantity: Quantity) -> f64 {
        match quantity {
            Quantity::Resistance => self.resistance(),
            Quantity::Reactance => self.reactance(),
            Quantity::Conductance => self.conductance(),
            Quantity::Susceptance => self.susceptance(),
            Quantity::Inductance => self.inductance(),
            Quantity::Capacitance => self.capacitance(),
            Quantity::QualityFactor => self.quality_factor(),
            Quantity::DissipationFactor => self.dissipation_factor(),
            Quantity::Swr => self.swr(),
            Quantity::SwrDb => self.swr_db(),
            Quantity::ReturnLoss => self.return_loss(),
            Quantity::ReflectionLoss => self.reflection_loss(),
            Quantity::TransmissionPower => self.transmission_power(),
            Quantity::ReflectionMagnitude => self.reflection_magnitude(),
            Quantity::ReflectionPhase => self.reflection_phase(),
            Quantity::ElectricalLength => self.electrical_length(),
            Quantity::Distance => self.distance(),
            Quantity::Wavelength => self.wavelength(),
            Quantity::Frequency => self.frequency(),
            Quantity::VelocityFactor => self.velocity_factor(),
            Quantity::ReferenceResistance => self.reference_impedance(),
        }
    }

    /// Write a scalar quantity through its setter
    pub fn set(&mut self, quantity: Quantity, value: f64) {
        match quantity {
            Quantity::Resistance => self.set_resistance(value),
            Quantity::Reactance => self.set_reactance(value),
            Quantity::Conductance => self.set_conductance(value),
            Quantity::Susceptance => self.set_susceptance(value),
            Quantity::Inductance => self.set_inductance(value),
            Quantity::Capacitance => self.set_capacitance(value),
            Quantity::QualityFactor => self.set_quality_factor(value),
            Quantity::DissipationFactor => self.set_dissipation_factor(value),
            Quantity::Swr => self.set_swr(value),
            Quantity::SwrDb => self.set_swr_db(value),
            Quantity::ReturnLoss => self.set_return_loss(value),
            Quantity::ReflectionLoss => self.set_reflection_loss(value),
            Quantity::TransmissionPower => self.set_transmission_power(value),
            Quantity::ReflectionMagnitude => self.set_reflection_magnitude(value),
            Quantity::ReflectionPhase => self.set_reflection_phase(value),
            Quantity::ElectricalLength => self.set_electrical_length(value),
            Quantity::Distance => self.set_distance(value),
            Quantity::Wavelength => self.set_wavelength(value),
            Quantity::Frequency => self.set_frequency(value),
            Quantity::VelocityFactor => self.set_velocity_factor(value),
            Quantity::ReferenceResistance => {
                self.set_reference_immittance(Immittance::resistance(value))
            }
        }
    }

    /// Read a complex quantity
    pub fn get_complex(&self, quantity: ComplexQuantity) -> Complex64 {
        match quantity {
            ComplexQuantity::Impedance => self.impedance(),
            ComplexQuantity::Admittance => self.admittance(),
            ComplexQuantity::ReflectionCoefficient => self.reflection_coefficient(),
            ComplexQuantity::TransmissionCoefficient => self.transmission_coefficient(),
        }
    }

    /// Write a complex quantity through its setter
    pub fn set_complex(&mut self, quantity: ComplexQuantity, value: Complex64) {
        match quantity {
            ComplexQuantity::Impedance => self.set_impedance(value),
            ComplexQuantity::Admittance => self.set_admittance(value),
            ComplexQuantity::ReflectionCoefficient => self.set_reflection_coefficient(value),
            ComplexQuantity::TransmissionCoefficient => self.set_transmission_coefficient(value),
        }
    }

    /// Animate an edit of a scalar quantity from its current value.
    ///
    /// Edits of |Γ| or its phase sweep Γ along a polar path so the trace
    /// follows the chart's circles; other quantities sweep their own value.
    pub fn set_recording_trace(&mut self, quantity: Quantity, value: f64) {
        let from = self.get(quantity);
        if from.is_nan() || value.is_nan() {
            self.set(quantity, value);
            return;
        }
        match quantity {
            Quantity::ReflectionMagnitude | Quantity::ReflectionPhase
                if value.is_finite() && (quantity == Quantity::ReflectionPhase || value >= 0.0) =>
            {
                let gamma = self.reflection_coefficient();
                let (magnitude, phase) = gamma.to_polar();
                let target = match quantity {
                    Quantity::ReflectionMagnitude => Complex64::from_polar(value, phase),
                    _ => Complex64::from_polar(magnitude, value),
                };
                self.set_value_recording_trace(
                    gamma,
                    target,
                    move |model: &mut ViewModel, v: Complex64| {
                        model.set_reflection_coefficient(v)
                    },
                    quantity.default_interpolation(),
                );
            }
            Quantity::ReflectionMagnitude | Quantity::ReflectionPhase => self.set(quantity, value),
            _ => self.set_value_recording_trace(
                from,
                value,
                move |model: &mut ViewModel, v: f64| model.set(quantity, v),
                quantity.default_interpolation(),
            ),
        }
    }

    /// Animate an edit of a complex quantity from its current value
    pub fn set_complex_recording_trace(&mut self, quantity: ComplexQuantity, value: Complex64) {
        let from = self.get_complex(quantity);
        self.set_value_recording_trace(
            from,
            value,
            move |model: &mut ViewModel, v: Complex64| model.set_complex(quantity, v),
            quantity.default_interpolation(),
        );
    }
}
