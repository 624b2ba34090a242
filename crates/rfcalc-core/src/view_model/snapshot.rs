//! Snapshot format
//!
//! The serialized state record used for undo checkpoints and session
//! persistence. Field names are camelCase on the wire. Non-finite floats
//! (open and short circuits produce infinite immittances) are written as the
//! strings `"inf"`, `"-inf"` and `"nan"` so every snapshot round-trips.

use num_complex::Complex64;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use super::core::{AngleOrientation, CircuitMode, CursorConstraints, DisplayMode, ViewModel};
use super::hold::Hold;
use crate::config::{TracePersistence, ViewModelConfig};
use crate::immittance::{Immittance, ImmittanceKind};

/// Snapshot decoding errors
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid snapshot: {0}")]
    Invalid(String),
}

/// An immittance on the wire
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImmittanceRecord {
    pub kind: ImmittanceKind,
    #[serde(with = "non_finite")]
    pub real: f64,
    #[serde(with = "non_finite")]
    pub imaginary: f64,
}

impl From<Immittance> for ImmittanceRecord {
    fn from(immittance: Immittance) -> Self {
        let value = immittance.value();
        Self {
            kind: immittance.kind(),
            real: value.re,
            imaginary: value.im,
        }
    }
}

impl From<ImmittanceRecord> for Immittance {
    fn from(record: ImmittanceRecord) -> Self {
        Immittance::new(record.kind, Complex64::new(record.real, record.imaginary))
    }
}

/// A trace point on the wire
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointRecord {
    #[serde(with = "non_finite")]
    pub real: f64,
    #[serde(with = "non_finite")]
    pub imaginary: f64,
}

/// Full state record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub display_mode: DisplayMode,
    pub circuit_mode: CircuitMode,
    pub immittance: ImmittanceRecord,
    pub reference_immittance: ImmittanceRecord,
    pub frequency: f64,
    pub velocity_factor: f64,
    pub ref_angle: f64,
    pub angle_orientation: AngleOrientation,
    #[serde(default)]
    pub trace: Vec<PointRecord>,
    #[serde(flatten)]
    pub cursor: CursorConstraints,
}

impl Snapshot {
    /// Decode and validate a JSON snapshot
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        let snapshot: Snapshot = serde_json::from_str(json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        Ok(serde_json::to_string(self)?)
    }

    /// Check the invariants the model relies on
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if !(self.frequency > 0.0 && self.frequency.is_finite()) {
            return Err(SnapshotError::Invalid(format!(
                "frequency must be positive and finite, got {}",
                self.frequency
            )));
        }
        if !(self.velocity_factor > 0.0 && self.velocity_factor <= 1.0) {
            return Err(SnapshotError::Invalid(format!(
                "velocity factor must be in (0, 1], got {}",
                self.velocity_factor
            )));
        }
        if !Immittance::from(self.reference_immittance).is_valid_reference() {
            return Err(SnapshotError::Invalid(
                "reference immittance must be a positive real value".to_string(),
            ));
        }
        if self.immittance.real.is_nan() || self.immittance.imaginary.is_nan() {
            return Err(SnapshotError::Invalid("immittance has a NaN component".to_string()));
        }
        if !self.ref_angle.is_finite() {
            return Err(SnapshotError::Invalid("reference angle must be finite".to_string()));
        }
        Ok(())
    }
}

impl ViewModel {
    /// Capture the persisted part of the state
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            display_mode: self.display_mode,
            circuit_mode: self.circuit_mode,
            immittance: self.immittance.into(),
            reference_immittance: self.reference.into(),
            frequency: self.frequency,
            velocity_factor: self.velocity_factor,
            ref_angle: self.ref_angle,
            angle_orientation: self.angle_orientation,
            trace: self
                .trace
                .iter()
                .map(|p| PointRecord {
                    real: p.re,
                    imaginary: p.im,
                })
                .collect(),
            cursor: self.cursor,
        }
    }

    pub fn to_json(&self) -> Result<String, SnapshotError> {
        self.snapshot().to_json()
    }

    /// Replace the whole aggregate from a snapshot.
    ///
    /// Hold is cleared and any fade cancelled. The trace is restored only
    /// under [`TracePersistence::Infinite`]. Records no checkpoint.
    pub fn update_from(&mut self, snapshot: &Snapshot) {
        self.display_mode = snapshot.display_mode;
        self.circuit_mode = snapshot.circuit_mode;
        self.immittance = Immittance::from(snapshot.immittance).with_positive_real();
        self.reference = snapshot.reference_immittance.into();
        self.frequency = snapshot.frequency;
        self.velocity_factor = snapshot.velocity_factor;
        self.ref_angle = snapshot.ref_angle;
        self.angle_orientation = snapshot.angle_orientation;
        self.cursor = snapshot.cursor;
        self.hold = Hold::None;
        self.fade = None;
        self.trace = match self.config.trace_persistence {
            TracePersistence::Infinite => snapshot
                .trace
                .iter()
                .map(|p| Complex64::new(p.real, p.imaginary))
                .collect(),
            TracePersistence::Immediate | TracePersistence::Pause => Vec::new(),
        };
    }

    /// Build a model from a snapshot, starting a fresh history
    pub fn from_snapshot(snapshot: &Snapshot, config: ViewModelConfig) -> Self {
        let mut model = Self::bare(config);
        model.update_from(snapshot);
        model.add_checkpoint();
        model
    }

    /// Restore a persisted session; unreadable payloads give the default state
    pub fn restore(json: &str, config: ViewModelConfig) -> Self {
        match Snapshot::from_json(json) {
            Ok(snapshot) => Self::from_snapshot(&snapshot, config),
            Err(e) => {
                warn!("session not restored, using defaults: {}", e);
                Self::with_config(config)
            }
        }
    }
}

/// Serde adapter writing non-finite floats as strings
mod non_finite {
    use serde::de::Error;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
        if value.is_finite() {
            serializer.serialize_f64(*value)
        } else if value.is_nan() {
            serializer.serialize_str("nan")
        } else if *value > 0.0 {
            serializer.serialize_str("inf")
        } else {
            serializer.serialize_str("-inf")
        }
    }

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(f64),
        Text(String),
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
        match Repr::deserialize(deserializer)? {
            Repr::Number(v) => Ok(v),
            Repr::Text(s) => match s.as_str() {
                "inf" => Ok(f64::INFINITY),
                "-inf" => Ok(f64::NEG_INFINITY),
                "nan" => Ok(f64::NAN),
                other => Err(D::Error::custom(format!("invalid number {:?}", other))),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_field_names() {
        let vm = ViewModel::with_config(ViewModelConfig::without_animations());
        let value: serde_json::Value = serde_json::from_str(&vm.to_json().unwrap()).unwrap();
        for key in [
            "displayMode",
            "circuitMode",
            "immittance",
            "referenceImmittance",
            "frequency",
            "velocityFactor",
            "refAngle",
            "angleOrientation",
            "trace",
            "constantResistance",
            "constantReactance",
            "constantConductance",
            "constantSusceptance",
        ] {
            assert!(value.get(key).is_some(), "missing {}", key);
        }
        assert_eq!(value["immittance"]["kind"], "impedance");
        assert_eq!(value["circuitMode"], "series");
    }

    #[test]
    fn test_infinite_immittance_round_trips() {
        let mut vm = ViewModel::with_config(ViewModelConfig::without_animations());
        vm.set_impedance(crate::math::INFINITE);
        let json = vm.to_json().unwrap();
        assert!(json.contains("\"inf\""));

        let snapshot = Snapshot::from_json(&json).unwrap();
        assert_eq!(snapshot.immittance.real, f64::INFINITY);
    }

    #[test]
    fn test_integer_numbers_accepted() {
        let vm = ViewModel::new();
        let mut value: serde_json::Value = serde_json::from_str(&vm.to_json().unwrap()).unwrap();
        value["frequency"] = serde_json::json!(1000);
        value["immittance"]["real"] = serde_json::json!(75);
        let snapshot = Snapshot::from_json(&value.to_string()).unwrap();
        assert_eq!(snapshot.frequency, 1000.0);
        assert_eq!(snapshot.immittance.real, 75.0);
    }

    #[test]
    fn test_invalid_snapshot_rejected() {
        let vm = ViewModel::new();
        let mut value: serde_json::Value = serde_json::from_str(&vm.to_json().unwrap()).unwrap();
        value["frequency"] = serde_json::json!(-5.0);
        let err = Snapshot::from_json(&value.to_string()).unwrap_err();
        assert!(matches!(err, SnapshotError::Invalid(_)));

        let err = Snapshot::from_json("{not json").unwrap_err();
        assert!(matches!(err, SnapshotError::Json(_)));
    }

    #[test]
    fn test_bad_float_text_rejected() {
        let vm = ViewModel::new();
        let json = vm.to_json().unwrap().replace("\"kind\":\"impedance\",\"real\":50.0", "\"kind\":\"impedance\",\"real\":\"big\"");
        assert!(Snapshot::from_json(&json).is_err());
    }
}
