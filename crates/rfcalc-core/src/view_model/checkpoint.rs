//! Checkpoint history and undo
//!
//! Every committing edit serializes the whole aggregate. The newest
//! checkpoint is "now"; undo drops it and restores the one before.

use std::collections::VecDeque;
use tracing::warn;

use super::core::ViewModel;
use super::snapshot::Snapshot;

/// Bounded history of serialized snapshots, oldest evicted first
#[derive(Debug, Clone, Default)]
pub(crate) struct Checkpoints {
    entries: VecDeque<String>,
    capacity: usize,
}

impl Checkpoints {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
        }
    }

    pub(crate) fn push(&mut self, checkpoint: String) {
        while self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(checkpoint);
    }

    pub(crate) fn pop(&mut self) -> Option<String> {
        self.entries.pop_back()
    }

    pub(crate) fn last(&self) -> Option<&str> {
        self.entries.back().map(String::as_str)
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }
}

impl ViewModel {
    /// Record the current state as a checkpoint.
    ///
    /// No-op while checkpoints are suppressed (mid-sweep, mid-undo, or
    /// inside a compound edit).
    pub fn add_checkpoint(&mut self) {
        if !self.checkpoints_enabled {
            return;
        }
        match self.to_json() {
            Ok(json) => self.checkpoints.push(json),
            Err(e) => warn!("checkpoint not recorded: {}", e),
        }
    }

    /// True when a state before "now" is available
    pub fn can_undo(&self) -> bool {
        self.checkpoints.len() > 1
    }

    /// Return to the previous checkpoint
    pub fn undo(&mut self) {
        if !self.can_undo() {
            return;
        }
        self.checkpoints.pop();
        let Some(json) = self.checkpoints.last().map(str::to_owned) else {
            return;
        };
        match Snapshot::from_json(&json) {
            Ok(snapshot) => {
                let mut model = self.suppress_checkpoints();
                model.update_from(&snapshot);
            }
            Err(e) => warn!("undo failed, checkpoint unreadable: {}", e),
        }
    }

    /// Number of retained checkpoints
    pub fn checkpoint_count(&self) -> usize {
        self.checkpoints.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ViewModelConfig;

    #[test]
    fn test_ring_evicts_oldest() {
        let mut ring = Checkpoints::new(3);
        for i in 0..5 {
            ring.push(i.to_string());
        }
        assert_eq!(ring.len(), 3);
        assert_eq!(ring.last(), Some("4"));
        assert_eq!(ring.pop().as_deref(), Some("4"));
        assert_eq!(ring.pop().as_deref(), Some("3"));
        assert_eq!(ring.pop().as_deref(), Some("2"));
        assert_eq!(ring.len(), 0);
        assert_eq!(ring.pop(), None);
    }

    #[test]
    fn test_undo_single_edit() {
        let mut vm = ViewModel::with_config(ViewModelConfig::without_animations());
        assert!(!vm.can_undo());
        vm.set_resistance(75.0);
        assert!(vm.can_undo());
        vm.undo();
        assert_eq!(vm.resistance(), 50.0);
        assert!(!vm.can_undo());
        assert_eq!(vm.checkpoint_count(), 1);
    }

    #[test]
    fn test_undo_does_not_record() {
        let mut vm = ViewModel::with_config(ViewModelConfig::without_animations());
        vm.set_resistance(75.0);
        vm.set_resistance(100.0);
        vm.undo();
        assert_eq!(vm.checkpoint_count(), 2);
        assert_eq!(vm.resistance(), 75.0);
    }
}
