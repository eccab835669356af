//! Stream state record and its packed word image.
//!
//! The packed image is the restart format: a flat sequence of `u32` words
//! laid out as spawn index (`L - 1`), `r0` (`L`), `r1` (`L`), history index,
//! seed, init seed, and generator id. Nothing else is stored; the parameter
//! set is recovered from the word count.

use serde::{Deserialize, Serialize};

use crate::error::StateError;
use crate::params::ParameterSet;
use crate::spawn_index::SpawnIndex;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<u32>", into = "Vec<u32>")]
pub struct StreamState {
    params: ParameterSet,
    pub(crate) spawn_index: SpawnIndex,
    pub(crate) r0: Vec<u32>,
    pub(crate) r1: Vec<u32>,
    pub(crate) hidx: u32,
    pub(crate) seed: u32,
    pub(crate) init_seed: u32,
    pub(crate) generator_id: u32,
}

impl StreamState {
    /// Zeroed storage for `params`; not ready to draw until initialized.
    pub(crate) fn blank(params: ParameterSet) -> Self {
        let len = params.register_len();
        Self {
            params,
            spawn_index: SpawnIndex::node_start(params, 0),
            r0: vec![0; len],
            r1: vec![0; len],
            hidx: 0,
            seed: 0,
            init_seed: 0,
            generator_id: 0,
        }
    }

    pub fn params(&self) -> ParameterSet {
        self.params
    }

    /// Number of words in the packed image of this state.
    pub fn size(&self) -> usize {
        self.params.size()
    }

    /// Index of the top-level stream this state descends from. Spawned
    /// children inherit it unchanged.
    pub fn generator_id(&self) -> u32 {
        self.generator_id
    }

    /// Generator id combined with the low spawn-index word. Only meant to tell
    /// streams apart in log output; it is not guaranteed unique.
    pub fn diagnostic_id(&self) -> u32 {
        self.generator_id.wrapping_add(self.spawn_index.low())
    }

    /// Seed used to derive register fills (the creation seed mixed with a
    /// fixed constant).
    pub fn seed(&self) -> u32 {
        self.seed
    }

    /// Seed as supplied by the caller at creation, top bit cleared.
    pub fn init_seed(&self) -> u32 {
        self.init_seed
    }

    pub fn history_index(&self) -> u32 {
        self.hidx
    }

    pub fn spawn_index(&self) -> &[u32] {
        self.spawn_index.as_slice()
    }

    /// Pack the state into its flat restart image.
    pub fn to_words(&self) -> Vec<u32> {
        let mut words = Vec::with_capacity(self.size());
        words.extend_from_slice(self.spawn_index.as_slice());
        words.extend_from_slice(&self.r0);
        words.extend_from_slice(&self.r1);
        words.extend_from_slice(&[self.hidx, self.seed, self.init_seed, self.generator_id]);
        debug_assert_eq!(words.len(), self.size());
        words
    }

    /// Rebuild a state from a packed image, inferring the parameter set from
    /// its length.
    pub fn from_words(words: &[u32]) -> Result<Self, StateError> {
        let params = ParameterSet::from_size(words.len())
            .ok_or(StateError::UnrecognizedSize(words.len()))?;
        Self::from_words_with(params, words)
    }

    /// Rebuild a state from a packed image produced under `params`.
    pub fn from_words_with(params: ParameterSet, words: &[u32]) -> Result<Self, StateError> {
        if words.len() != params.size() {
            return Err(StateError::SizeMismatch {
                params,
                expected: params.size(),
                actual: words.len(),
            });
        }

        let len = params.register_len();
        let (spawn_index, rest) = words.split_at(params.spawn_words());
        let (r0, rest) = rest.split_at(len);
        let (r1, trailer) = rest.split_at(len);
        let [hidx, seed, init_seed, generator_id] = [trailer[0], trailer[1], trailer[2], trailer[3]];

        if hidx as usize >= len {
            return Err(StateError::HistoryIndexOutOfRange { hidx, len });
        }

        Ok(Self {
            params,
            spawn_index: SpawnIndex::from_words(spawn_index.to_vec()),
            r0: r0.to_vec(),
            r1: r1.to_vec(),
            hidx,
            seed,
            init_seed,
            generator_id,
        })
    }
}

impl TryFrom<Vec<u32>> for StreamState {
    type Error = StateError;

    fn try_from(words: Vec<u32>) -> Result<Self, Self::Error> {
        Self::from_words(&words)
    }
}

impl From<StreamState> for Vec<u32> {
    fn from(state: StreamState) -> Self {
        state.to_words()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::stream_state;
    use proptest::prelude::{prop_assert_eq, proptest, ProptestConfig};

    fn sample(params: ParameterSet) -> StreamState {
        let mut state = StreamState::blank(params);
        for (i, word) in state.r0.iter_mut().enumerate() {
            *word = i as u32 * 3 + 1;
        }
        for (i, word) in state.r1.iter_mut().enumerate() {
            *word = u32::MAX - i as u32;
        }
        state.spawn_index.as_mut_slice()[0] = 1 << 30;
        state.hidx = params.register_len() as u32 - 1;
        state.seed = 925_840_789;
        state.init_seed = 12_345;
        state.generator_id = 4;
        state
    }

    #[test]
    fn packed_layout_follows_field_order() {
        let state = sample(ParameterSet::L17K5);
        let words = state.to_words();
        assert_eq!(words.len(), 54);
        assert_eq!(words[0], 1 << 30);
        assert_eq!(words[16], 1);
        assert_eq!(words[33], u32::MAX);
        assert_eq!(&words[50..], &[16, 925_840_789, 12_345, 4]);
    }

    #[test]
    fn words_rebuild_the_same_state() {
        for params in ParameterSet::ALL {
            let state = sample(params);
            let rebuilt = StreamState::from_words(&state.to_words()).unwrap();
            assert_eq!(rebuilt, state);
            assert_eq!(rebuilt.params(), params);
        }
    }

    #[test]
    fn rejects_wrong_sizes() {
        assert_eq!(
            StreamState::from_words(&[0; 53]),
            Err(StateError::UnrecognizedSize(53))
        );
        let words = sample(ParameterSet::L31K6).to_words();
        assert_eq!(
            StreamState::from_words_with(ParameterSet::L17K5, &words),
            Err(StateError::SizeMismatch {
                params: ParameterSet::L17K5,
                expected: 54,
                actual: 96,
            })
        );
    }

    #[test]
    fn rejects_history_index_past_register() {
        let mut words = sample(ParameterSet::L17K5).to_words();
        words[50] = 17;
        assert_eq!(
            StreamState::from_words(&words),
            Err(StateError::HistoryIndexOutOfRange { hidx: 17, len: 17 })
        );
    }

    #[test]
    fn serializes_as_flat_words() {
        let state = sample(ParameterSet::L17K5);
        let json = serde_json::to_string(&state).unwrap();
        let words: Vec<u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(words, state.to_words());
        let back: StreamState = serde_json::from_str(&json).unwrap();
        assert_eq!(back, state);
        assert!(serde_json::from_str::<StreamState>("[1,2,3]").is_err());
    }

    #[test]
    fn diagnostic_id_adds_low_spawn_word() {
        let state = sample(ParameterSet::L17K5);
        assert_eq!(state.generator_id(), 4);
        assert_eq!(state.diagnostic_id(), (1 << 30) + 4);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn packed_words_restore_state_and_continue_drawing(state in stream_state()) {
            let mut original = state;
            let mut restored = StreamState::from_words(&original.to_words()).unwrap();
            prop_assert_eq!(&restored, &original);
            for _ in 0..32 {
                prop_assert_eq!(restored.draw().to_bits(), original.draw().to_bits());
            }
            prop_assert_eq!(restored.to_words(), original.to_words());
        }
    }
}
