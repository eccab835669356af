//! Two-phase stream initialization shared by the factory and the spawner.

use crate::fill::fill;
use crate::spawn_index::SpawnIndex;
use crate::state::StreamState;

/// Passes that keep related generators from looking alike in their first
/// outputs.
pub const RUNUP: u32 = 64;

/// Warm-up passes when only the low spawn-index word is populated.
pub const SHORT_WARM_UP: u32 = 8;

/// Warm-up passes when higher spawn-index words are populated.
pub const LONG_WARM_UP: u32 = 2 * RUNUP;

/// Phase 1: reset the history index, record the seeds, and store the
/// node-start vector one doubling ahead so a later spawn has room.
pub fn phase1(state: &mut StreamState, node_start: &SpawnIndex, seed: u32, init_seed: u32) {
    let params = state.params();
    state.hidx = (params.register_len() - 1) as u32;
    state.seed = seed;
    state.init_seed = init_seed;
    state.spawn_index = node_start.doubled();
}

/// Phase 2: fill both registers from the stored spawn index and mix them.
pub fn phase2(state: &mut StreamState) {
    let params = state.params();
    let seed = state.seed;

    fill(params, state.spawn_index.as_slice(), seed, &mut state.r0);
    state.spawn_index.increment_low();
    fill(params, state.spawn_index.as_slice(), seed, &mut state.r1);

    let passes = if state.spawn_index.has_high_words() {
        LONG_WARM_UP
    } else {
        SHORT_WARM_UP
    };
    warm_up(state, passes);
}

/// Run `passes` full sweeps of the recurrence over both registers, the same
/// as drawing `L * passes` values from a freshly filled stream. Only valid
/// while the history index is still `L - 1`; it is left there afterwards.
pub fn warm_up(state: &mut StreamState, passes: u32) {
    let params = state.params();
    let len = params.register_len();
    let lag = params.lag();
    debug_assert_eq!(state.hidx as usize, len - 1);

    tracing::trace!(target: crate::error::LOG_TARGET, passes, "warming up stream");
    for _ in 0..passes {
        for hidx in (0..len).rev() {
            let lidx = (hidx + lag) % len;
            state.r0[hidx] = state.r0[hidx].wrapping_add(state.r0[lidx]);
            state.r1[hidx] = state.r1[hidx].wrapping_add(state.r1[lidx]);
        }
    }
}
