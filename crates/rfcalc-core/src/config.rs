//! View model configuration
//!
//! Preferences threaded into [`ViewModel::with_config`](crate::ViewModel::with_config).

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::constants::{CHECKPOINT_CAPACITY, TRACE_FADE_PAUSE, TRACE_RECORD_LENGTH};

/// How long a recorded trace stays on screen before fading
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TracePersistence {
    /// Fade starts as soon as the sweep completes
    Immediate,
    /// Fade starts after [`TRACE_FADE_PAUSE`]
    #[default]
    Pause,
    /// Never fades; also kept across restore
    Infinite,
}

impl TracePersistence {
    /// Delay before fading, `None` when the trace never fades
    pub fn fade_delay(&self) -> Option<Duration> {
        match self {
            TracePersistence::Immediate => Some(Duration::ZERO),
            TracePersistence::Pause => Some(TRACE_FADE_PAUSE),
            TracePersistence::Infinite => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ViewModelConfig {
    /// When false, trace-recorded writes apply the final value directly
    pub animations_enabled: bool,
    pub trace_persistence: TracePersistence,
    /// Interpolation steps per sweep (a sweep records one more point)
    pub trace_record_length: usize,
    pub checkpoint_capacity: usize,
}

impl Default for ViewModelConfig {
    fn default() -> Self {
        Self {
            animations_enabled: true,
            trace_persistence: TracePersistence::default(),
            trace_record_length: TRACE_RECORD_LENGTH,
            checkpoint_capacity: CHECKPOINT_CAPACITY,
        }
    }
}

impl ViewModelConfig {
    /// Configuration with sweeps short-circuited, for tests and startup
    pub fn without_animations() -> Self {
        Self {
            animations_enabled: false,
            ..Self::default()
        }
    }

    /// Parse a configuration; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
