//! Deriving child streams from a parent.
//!
//! A child is initialized from the parent's seeds and its current spawn
//! index; the parent's spawn index is then doubled so the next spawn takes
//! a different branch of the tree.

use crate::error::LOG_TARGET;
use crate::init;
use crate::state::StreamState;

impl StreamState {
    /// Derive a new independent stream. Mutates `self` so that the next call
    /// yields yet another distinct child.
    pub fn spawn(&mut self) -> StreamState {
        let mut child = StreamState::blank(self.params());
        init::phase1(&mut child, &self.spawn_index, self.seed, self.init_seed);
        init::phase2(&mut child);
        child.generator_id = self.generator_id;

        self.spawn_index.double();
        tracing::debug!(
            target: LOG_TARGET,
            parent = self.diagnostic_id(),
            child = child.diagnostic_id(),
            "spawned stream"
        );
        child
    }

    /// Spawn `count` children in sequence.
    pub fn spawn_many(&mut self, count: usize) -> Vec<StreamState> {
        (0..count).map(|_| self.spawn()).collect()
    }
}

/// Free-function form of [`StreamState::spawn`].
pub fn spawn(parent: &mut StreamState) -> StreamState {
    parent.spawn()
}
