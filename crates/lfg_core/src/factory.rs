//! Top-level stream creation.
//!
//! Streams created by one factory with the same seed and distinct indices are
//! independent. Each factory remembers the first seed it was used with and
//! warns when a later creation disagrees; [`StreamFactory::shared`] gives the
//! process-wide instance for that check.

use std::ops::Range;
use std::sync::OnceLock;

use crate::error::{report, Warning, LOG_TARGET};
use crate::fill::GS0;
use crate::init;
use crate::params::ParameterSet;
use crate::spawn_index::SpawnIndex;
use crate::state::StreamState;

/// Largest generator index for which independence is guaranteed.
pub const MAX_STREAMS: u32 = 0x7fff_ffff;

/// Only the low 31 bits of a seed are used.
pub const SEED_MASK: u32 = 0x7fff_ffff;

/// Top-level spawn indices are pushed at least this high, leaving the range
/// below to the initial generation of streams.
const RESERVED_LOW_RANGE: u32 = 1_000_000_000;

/// Init-once record of the seed streams are created from.
#[derive(Debug, Default)]
pub struct SeedCache {
    seed: OnceLock<u32>,
}

impl SeedCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// A cache already holding `seed`, e.g. from configuration.
    pub fn preset(seed: u32) -> Self {
        let cache = Self::new();
        let _ = cache.seed.set(seed & SEED_MASK);
        cache
    }

    pub fn get(&self) -> Option<u32> {
        self.seed.get().copied()
    }

    /// Record `seed` if nothing is cached yet; otherwise compare it with the
    /// cached value and describe any mismatch. Never fails.
    pub fn check(&self, seed: u32) -> Option<Warning> {
        let previous = *self.seed.get_or_init(|| seed);
        (previous != seed).then_some(Warning::SeedChanged {
            previous,
            requested: seed,
        })
    }
}

/// A stream between the two creation phases. The spawn index and seed may be
/// adjusted before [`StreamFactory::create_phase2`] fills the registers.
#[derive(Clone, Debug)]
pub struct PendingStream {
    state: StreamState,
}

impl PendingStream {
    pub fn params(&self) -> ParameterSet {
        self.state.params()
    }

    pub fn generator_id(&self) -> u32 {
        self.state.generator_id()
    }

    pub fn spawn_index(&self) -> &[u32] {
        self.state.spawn_index()
    }

    pub fn spawn_index_mut(&mut self) -> &mut [u32] {
        self.state.spawn_index.as_mut_slice()
    }

    pub fn seed(&self) -> u32 {
        self.state.seed
    }

    pub fn set_seed(&mut self, seed: u32) {
        self.state.seed = seed;
    }
}

/// Creates top-level streams for one parameter set.
///
/// The seed check covers only streams created through the same factory:
/// two factories built with [`StreamFactory::new`] each keep their own
/// [`SeedCache`] and never compare seeds with each other. Use
/// [`StreamFactory::shared`], or hand one factory around by reference or
/// `Arc`, when every creation in the process must be checked against one
/// seed.
#[derive(Debug, Default)]
pub struct StreamFactory {
    params: ParameterSet,
    seeds: SeedCache,
}

impl StreamFactory {
    pub fn new(params: ParameterSet) -> Self {
        Self::with_seed_cache(params, SeedCache::new())
    }

    /// The process-wide factory for `params`. Every caller gets the same
    /// instance and therefore the same seed cache.
    pub fn shared(params: ParameterSet) -> &'static StreamFactory {
        static L17K5: OnceLock<StreamFactory> = OnceLock::new();
        static L31K6: OnceLock<StreamFactory> = OnceLock::new();
        let cell = match params {
            ParameterSet::L17K5 => &L17K5,
            ParameterSet::L31K6 => &L31K6,
        };
        cell.get_or_init(|| StreamFactory::new(params))
    }

    pub fn with_seed_cache(params: ParameterSet, seeds: SeedCache) -> Self {
        Self { params, seeds }
    }

    pub fn params(&self) -> ParameterSet {
        self.params
    }

    /// Word count of every state this factory produces.
    pub fn size(&self) -> usize {
        self.params.size()
    }

    pub fn cached_seed(&self) -> Option<u32> {
        self.seeds.get()
    }

    /// Create the top-level stream `index` from `seed`.
    pub fn create(&self, index: u32, seed: u32) -> StreamState {
        let pending = self.create_phase1(index, seed);
        self.create_phase2(pending)
    }

    /// Create streams `indices` from one seed, in order.
    pub fn create_range(&self, indices: Range<u32>, seed: u32) -> Vec<StreamState> {
        indices.map(|index| self.create(index, seed)).collect()
    }

    /// First creation phase: validate the index, check the seed, and record
    /// the node-start vector. The registers are still empty.
    pub fn create_phase1(&self, index: u32, seed: u32) -> PendingStream {
        if index >= MAX_STREAMS {
            report(&Warning::TooManyStreams {
                index,
                max: MAX_STREAMS,
            });
        }

        let seed = seed & SEED_MASK;
        if let Some(warning) = self.seeds.check(seed) {
            report(&warning);
        }

        tracing::debug!(target: LOG_TARGET, index, seed, params = %self.params, "creating stream");

        let mut state = StreamState::blank(self.params);
        state.generator_id = index;
        let node_start = SpawnIndex::node_start(self.params, index);
        init::phase1(&mut state, &node_start, seed ^ GS0, seed);
        PendingStream { state }
    }

    /// Second creation phase: fill and warm up the registers, then push the
    /// spawn index above the range reserved for top-level streams.
    pub fn create_phase2(&self, pending: PendingStream) -> StreamState {
        debug_assert_eq!(pending.params(), self.params);
        let mut state = pending.state;
        init::phase2(&mut state);

        let spawn_index = &mut state.spawn_index;
        while spawn_index.low() != 0
            && spawn_index.low() < RESERVED_LOW_RANGE
            && spawn_index.as_slice()[1] == 0
        {
            spawn_index.double();
        }
        state
    }
}
