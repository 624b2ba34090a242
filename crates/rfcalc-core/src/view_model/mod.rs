//! View model module - the RF quantity network
//!
//! Provides the ViewModel aggregate and its derived quantities, trace
//! recorder, hold mode and checkpoint history.

mod checkpoint;
mod components;
mod core;
mod hold;
mod properties;
mod quantity;
mod snapshot;
mod trace;

pub use self::core::{AngleOrientation, CircuitMode, CursorConstraints, DisplayMode, ViewModel};
pub use hold::Hold;
pub use quantity::{ComplexQuantity, Quantity};
pub use snapshot::{ImmittanceRecord, PointRecord, Snapshot, SnapshotError};
pub use trace::{fade_step, smoothstep, TraceFade};
