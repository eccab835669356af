//! Proptest strategies for crates that test against stream states.

use proptest::prelude::*;

use crate::factory::{StreamFactory, MAX_STREAMS};
use crate::params::ParameterSet;
use crate::state::StreamState;

pub fn parameter_set() -> impl Strategy<Value = ParameterSet> {
    prop_oneof![Just(ParameterSet::L17K5), Just(ParameterSet::L31K6)]
}

/// Initialized states: a top-level stream, optionally a few spawns deep and a
/// few draws in.
pub fn stream_state() -> impl Strategy<Value = StreamState> {
    (
        parameter_set(),
        0..MAX_STREAMS,
        any::<u32>(),
        0usize..4,
        0usize..64,
    )
        .prop_map(|(params, index, seed, depth, draws)| {
            let mut state = StreamFactory::new(params).create(index, seed);
            for _ in 0..depth {
                state = state.spawn();
            }
            for _ in 0..draws {
                state.draw();
            }
            state
        })
}
