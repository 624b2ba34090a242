//! Trace recording
//!
//! A sweep replays an edit as `trace_record_length + 1` intermediate states
//! through the real setters and keeps the visited reflection coefficients
//! for path rendering. Afterwards the trace fades, oldest points first.

use num_complex::Complex64;
use std::time::Duration;
use tracing::trace;

use super::core::ViewModel;
use crate::constants::TRACE_FADE_DURATION;
use crate::interpolation::{Interpolate, Interpolation};

/// Eased ramp `3t² - 2t³` on [0, 1]
#[inline]
pub fn smoothstep(t: f64) -> f64 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// One trace fade episode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TraceFade {
    delay: Duration,
    duration: Duration,
    elapsed: Duration,
}

impl TraceFade {
    pub fn new(delay: Duration, duration: Duration) -> Self {
        Self {
            delay,
            duration,
            elapsed: Duration::ZERO,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    pub fn advance(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    /// Eased interpolator: 1 until the delay passes, then down to 0
    pub fn visible_fraction(&self) -> f64 {
        if self.elapsed <= self.delay {
            return 1.0;
        }
        let progress = if self.duration.is_zero() {
            1.0
        } else {
            ((self.elapsed - self.delay).as_secs_f64() / self.duration.as_secs_f64()).min(1.0)
        };
        smoothstep(1.0 - progress)
    }

    /// True while the pause before fading is still running
    pub fn is_paused(&self) -> bool {
        self.elapsed <= self.delay
    }

    pub fn is_finished(&self) -> bool {
        self.elapsed >= self.delay.saturating_add(self.duration)
    }
}

/// Convert a caller-supplied fade step in seconds.
///
/// `None` for negative or NaN input; steps too large for a [`Duration`]
/// (including +∞) saturate to [`Duration::MAX`].
pub fn fade_step(seconds: f64) -> Option<Duration> {
    if !(seconds >= 0.0) {
        return None;
    }
    Some(Duration::try_from_secs_f64(seconds).unwrap_or(Duration::MAX))
}

impl ViewModel {
    /// Apply `operation(to)` as an animated sweep from `from`.
    ///
    /// Each intermediate value runs through `operation` so every dependent
    /// quantity is consistent at each step; the reflection coefficient after
    /// each step becomes the trace. Intermediate steps never checkpoint; the
    /// final `operation(to)` runs with the caller's checkpoint setting so it
    /// records the edit once. Nested calls, and models configured without
    /// animations, apply `operation(to)` directly.
    pub fn set_value_recording_trace<T, F>(
        &mut self,
        from: T,
        to: T,
        operation: F,
        method: Interpolation,
    ) where
        T: Interpolate,
        F: Fn(&mut ViewModel, T),
    {
        if !self.trace_recording_enabled || !self.config.animations_enabled {
            operation(self, to);
            return;
        }

        let steps = self.config.trace_record_length.max(1);
        trace!(steps, ?method, "trace sweep start");

        {
            let mut model = self.suppress_recording();
            let mut points = Vec::with_capacity(steps + 1);
            for step in 0..=steps {
                let fraction = step as f64 / steps as f64;
                operation(&mut *model, T::interpolate(from, to, fraction, method));
                points.push(model.reflection_coefficient());
            }
            model.trace = points;

            model.restore_checkpoints();
            operation(&mut *model, to);
        }

        self.schedule_trace_fade();
        trace!(points = self.trace.len(), "trace sweep end");
    }

    /// Reflection coefficients visited by the last sweep, oldest first
    pub fn trace(&self) -> &[Complex64] {
        &self.trace
    }

    /// The in-flight fade episode, if any
    pub fn trace_fade(&self) -> Option<&TraceFade> {
        self.fade.as_ref()
    }

    /// Drop the trace and any pending fade
    pub fn clear_trace(&mut self) {
        self.trace.clear();
        self.fade = None;
    }

    /// Advance the fade clock by `dt` and shrink the trace to match.
    ///
    /// The trace is untouched during the pause; afterwards it keeps its
    /// newest `floor(trace_record_length × eased)` points.
    pub fn advance_trace_fade(&mut self, dt: Duration) {
        let Some(fade) = self.fade.as_mut() else {
            return;
        };
        fade.advance(dt);
        if fade.is_paused() {
            return;
        }

        let fraction = fade.visible_fraction();
        let finished = fade.is_finished();
        let keep = (self.config.trace_record_length as f64 * fraction).floor() as usize;
        if self.trace.len() > keep {
            let drop = self.trace.len() - keep;
            self.trace.drain(..drop);
        }
        if finished {
            self.trace.clear();
            self.fade = None;
        }
    }

    /// Start a new fade episode, replacing any in flight
    fn schedule_trace_fade(&mut self) {
        self.fade = self
            .config
            .trace_persistence
            .fade_delay()
            .map(|delay| TraceFade::new(delay, TRACE_FADE_DURATION));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{TracePersistence, ViewModelConfig};
    use approx::assert_relative_eq;

    fn model(persistence: TracePersistence) -> ViewModel {
        ViewModel::with_config(ViewModelConfig {
            trace_persistence: persistence,
            ..ViewModelConfig::default()
        })
    }

    #[test]
    fn test_smoothstep() {
        assert_eq!(smoothstep(0.0), 0.0);
        assert_eq!(smoothstep(1.0), 1.0);
        assert_eq!(smoothstep(0.5), 0.5);
        assert!(smoothstep(0.25) < 0.25);
    }

    #[test]
    fn test_fade_fraction() {
        let mut fade = TraceFade::new(Duration::from_millis(100), Duration::from_millis(400));
        assert_eq!(fade.visible_fraction(), 1.0);
        fade.advance(Duration::from_millis(300));
        assert_relative_eq!(fade.visible_fraction(), 0.5, epsilon = 1e-12);
        assert!(!fade.is_finished());
        fade.advance(Duration::from_millis(200));
        assert_eq!(fade.visible_fraction(), 0.0);
        assert!(fade.is_finished());
    }

    #[test]
    fn test_sweep_records_endpoints() {
        let mut vm = model(TracePersistence::Pause);
        let from = vm.impedance();
        let to = Complex64::new(75.0, 30.0);
        vm.set_value_recording_trace(from, to, ViewModel::set_impedance, Interpolation::Rectangular);

        assert_eq!(vm.trace().len(), 101);
        assert_eq!(vm.impedance(), to);
        assert_eq!(vm.checkpoint_count(), 2);
        assert!(vm.trace_fade().is_some());
    }

    #[test]
    fn test_nested_sweep_applies_directly() {
        let mut vm = model(TracePersistence::Pause);
        let from = vm.resistance();
        vm.set_value_recording_trace(
            from,
            100.0,
            |m: &mut ViewModel, r: f64| {
                // a traced quantity touched from inside a sweep
                let x = m.reactance();
                m.set_value_recording_trace(x, r / 10.0, ViewModel::set_reactance, Interpolation::Linear);
                m.set_resistance(r);
            },
            Interpolation::Linear,
        );
        assert_eq!(vm.trace().len(), 101);
        assert_relative_eq!(vm.resistance(), 100.0, epsilon = 1e-12);
        assert_relative_eq!(vm.reactance(), 10.0, epsilon = 1e-12);
    }

    #[test]
    fn test_fade_drops_oldest_points() {
        let mut vm = model(TracePersistence::Immediate);
        vm.set_value_recording_trace(
            vm.impedance(),
            Complex64::new(100.0, 0.0),
            ViewModel::set_impedance,
            Interpolation::Rectangular,
        );
        let newest = *vm.trace().last().unwrap();

        vm.advance_trace_fade(TRACE_FADE_DURATION / 2);
        assert_eq!(vm.trace().len(), 50);
        assert_eq!(*vm.trace().last().unwrap(), newest);

        vm.advance_trace_fade(TRACE_FADE_DURATION);
        assert!(vm.trace().is_empty());
        assert!(vm.trace_fade().is_none());
    }

    #[test]
    fn test_pause_keeps_every_point() {
        let mut vm = model(TracePersistence::Pause);
        vm.set_value_recording_trace(50.0, 150.0, ViewModel::set_resistance, Interpolation::Linear);
        assert_eq!(vm.trace().len(), 101);

        vm.advance_trace_fade(Duration::from_millis(1));
        assert_eq!(vm.trace().len(), 101);
        vm.advance_trace_fade(Duration::from_millis(1498));
        assert_eq!(vm.trace().len(), 101);
        assert!(vm.trace_fade().unwrap().is_paused());
    }

    #[test]
    fn test_fade_step_conversion() {
        assert_eq!(fade_step(0.25), Some(Duration::from_millis(250)));
        assert_eq!(fade_step(f64::INFINITY), Some(Duration::MAX));
        assert_eq!(fade_step(1e300), Some(Duration::MAX));
        assert_eq!(fade_step(-1.0), None);
        assert_eq!(fade_step(f64::NAN), None);
    }

    #[test]
    fn test_saturated_step_finishes_fade() {
        let mut vm = model(TracePersistence::Pause);
        vm.set_value_recording_trace(1.0, 2.0, ViewModel::set_resistance, Interpolation::Linear);
        vm.advance_trace_fade(Duration::from_secs(1));
        vm.advance_trace_fade(Duration::MAX);
        assert!(vm.trace().is_empty());
        assert!(vm.trace_fade().is_none());
    }

    #[test]
    fn test_infinite_persistence_never_fades() {
        let mut vm = model(TracePersistence::Infinite);
        vm.set_value_recording_trace(
            vm.impedance(),
            Complex64::new(10.0, 0.0),
            ViewModel::set_impedance,
            Interpolation::Rectangular,
        );
        assert!(vm.trace_fade().is_none());
        vm.advance_trace_fade(Duration::from_secs(60));
        assert_eq!(vm.trace().len(), 101);
    }

    #[test]
    fn test_new_sweep_restarts_fade() {
        let mut vm = model(TracePersistence::Pause);
        vm.set_value_recording_trace(1.0, 2.0, ViewModel::set_resistance, Interpolation::Linear);
        vm.advance_trace_fade(Duration::from_secs(1));
        vm.set_value_recording_trace(2.0, 3.0, ViewModel::set_resistance, Interpolation::Linear);
        assert_eq!(vm.trace_fade().unwrap().elapsed(), Duration::ZERO);
        assert_eq!(vm.trace().len(), 101);
    }

    #[test]
    fn test_disabled_animations_apply_directly() {
        let mut vm = ViewModel::with_config(ViewModelConfig::without_animations());
        vm.set_value_recording_trace(50.0, 80.0, ViewModel::set_resistance, Interpolation::Logarithmic);
        assert!(vm.trace().is_empty());
        assert_eq!(vm.resistance(), 80.0);
        assert_eq!(vm.checkpoint_count(), 2);
    }
}
