//! Spawn-index arithmetic.
//!
//! A spawn index is a wide binary counter spread over `L - 1` words. Each
//! word tracks its low [`MAX_BIT`] bits; doubling shifts every word left by
//! one and carries bit [`MAX_BIT`] into the next more significant word.
//! Repeated doubling walks a binary tree, which is how every descendant of a
//! stream receives an index disjoint from its siblings.

use crate::error::{report, Warning};
use crate::params::ParameterSet;

/// Highest bit position a spawn-index word may carry out of.
pub const MAX_BIT: u32 = 30;

const CARRY_BIT: u32 = 1 << MAX_BIT;
const TRACKED_MASK: u32 = CARRY_BIT - 1;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SpawnIndex(Vec<u32>);

impl SpawnIndex {
    /// Node-start vector `{index, 0, 0, ...}` of a top-level stream.
    pub fn node_start(params: ParameterSet, index: u32) -> Self {
        let mut words = vec![0; params.spawn_words()];
        words[0] = index;
        Self(words)
    }

    pub(crate) fn from_words(words: Vec<u32>) -> Self {
        Self(words)
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.0
    }

    pub fn as_mut_slice(&mut self) -> &mut [u32] {
        &mut self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Least significant word.
    pub fn low(&self) -> u32 {
        self.0[0]
    }

    /// True when any word above the least significant one is non-zero.
    pub fn has_high_words(&self) -> bool {
        self.0[1..].iter().any(|&word| word != 0)
    }

    /// Bump the least significant word, wrapping on overflow.
    pub fn increment_low(&mut self) {
        self.0[0] = self.0[0].wrapping_add(1);
    }

    /// Return a doubled copy, leaving `self` untouched.
    pub fn doubled(&self) -> Self {
        let mut next = self.clone();
        next.double();
        next
    }

    /// Double the counter in place.
    ///
    /// When the most significant word already has its carry bit set the
    /// shift truncates it: a [`Warning::TooManyBranches`] is reported and the
    /// counter wraps. Returns whether that happened.
    pub fn double(&mut self) -> bool {
        let words = &mut self.0;
        let top = words.len() - 1;

        let overflowed = words[top] & CARRY_BIT != 0;
        if overflowed {
            report(&Warning::TooManyBranches);
        }

        words[top] = (words[top] & TRACKED_MASK) << 1;
        for i in (0..top).rev() {
            if words[i] & CARRY_BIT != 0 {
                words[i + 1] += 1;
            }
            words[i] = (words[i] & TRACKED_MASK) << 1;
        }
        overflowed
    }
}
