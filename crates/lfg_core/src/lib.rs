//! Parallel lagged-Fibonacci random number streams.
//!
//! Every stream is a pair of additive lagged-Fibonacci registers whose
//! outputs are combined into uniform doubles. Top-level streams are created
//! from a generator index and a seed; any stream can spawn children whose
//! spawn indices occupy disjoint branches of a binary tree, so workers obtain
//! private, reproducible streams without coordinating at runtime.
//!
//! A [`StreamState`] packs into a fixed number of `u32` words (see
//! [`StreamState::to_words`]); that image is the restart format and is stable
//! for a given [`ParameterSet`].

pub mod config;
pub mod draw;
pub mod error;
pub mod factory;
pub mod fill;
pub mod init;
pub mod params;
pub mod register;
pub mod spawn;
pub mod spawn_index;
pub mod state;
#[cfg(any(test, feature = "proptest-support"))]
pub mod strategy;

pub use config::GeneratorConfig;
pub use error::{StateError, Warning};
pub use factory::{PendingStream, SeedCache, StreamFactory};
pub use params::ParameterSet;
pub use state::StreamState;

/// Packed word count of a stream under the default parameter set.
pub fn size() -> usize {
    ParameterSet::default().size()
}
