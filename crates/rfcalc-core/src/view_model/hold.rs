//! Hold mode
//!
//! Decides which reactive component survives a frequency change. The held
//! value is read before the new frequency lands and written back after, so
//! the reactance or susceptance is recomputed against the new ω.

use tracing::debug;

use super::core::ViewModel;

/// Component kept constant when the frequency changes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Hold {
    /// Reactance/susceptance stays fixed; L and C drift with frequency
    #[default]
    None,
    Inductance,
    Capacitance,
}

impl ViewModel {
    pub fn hold(&self) -> Hold {
        self.hold
    }

    /// Set the frequency (Hz), ignored unless positive and finite.
    ///
    /// A held inductance or capacitance is re-applied at the new frequency.
    /// The compound edit records a single checkpoint.
    pub fn set_frequency(&mut self, frequency: f64) {
        if !(frequency > 0.0 && frequency.is_finite()) {
            debug!(frequency, "rejected frequency write: not positive and finite");
            return;
        }

        let reapply: Option<(fn(&mut ViewModel, f64), f64)> = match self.hold {
            Hold::None => None,
            Hold::Inductance => Some((ViewModel::set_inductance, self.inductance())),
            Hold::Capacitance => Some((ViewModel::set_capacitance, self.capacitance())),
        };

        {
            let mut model = self.suppress_checkpoints();
            model.frequency = frequency;
            if let Some((set_held, value)) = reapply {
                set_held(&mut *model, value);
            }
        }

        self.add_checkpoint();
    }
}
