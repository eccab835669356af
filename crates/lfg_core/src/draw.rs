//! Drawing values from an initialized stream.
//!
//! Every draw advances both lag registers by two positions. The two 32-bit
//! outputs are combined into a double, and the same pair backs the integer
//! and [`rand::RngCore`] front-ends.

use rand::RngCore;

use crate::state::StreamState;

/// `2^-32`.
const FLT_MULT: f64 = 2.328_306_436_538_696_289_1e-10;

#[inline]
fn combine(first: u32, second: u32) -> f64 {
    (f64::from(second) * FLT_MULT + f64::from(first)) * FLT_MULT
}

impl StreamState {
    /// Advance both registers at the current history index and return the
    /// combined 32-bit output, then step the indices back by one.
    #[inline]
    fn step(&mut self, hidx: &mut usize, lidx: &mut usize) -> u32 {
        let last = self.r0.len() - 1;
        let (h, l) = (*hidx, *lidx);
        self.r0[h] = self.r0[h].wrapping_add(self.r0[l]);
        self.r1[h] = self.r1[h].wrapping_add(self.r1[l]);
        let value = (self.r1[h] & !1) ^ (self.r0[h] >> 1);
        *hidx = if h == 0 { last } else { h - 1 };
        *lidx = if l == 0 { last } else { l - 1 };
        value
    }

    /// Two consecutive combined outputs; persists the history index.
    #[inline]
    fn next_pair(&mut self) -> (u32, u32) {
        let len = self.r0.len();
        let mut hidx = self.hidx as usize;
        let mut lidx = hidx + self.params().lag();
        if lidx >= len {
            lidx -= len;
        }
        let first = self.step(&mut hidx, &mut lidx);
        let second = self.step(&mut hidx, &mut lidx);
        self.hidx = hidx as u32;
        (first, second)
    }

    /// Draw a uniform double in `[0, 1)`.
    ///
    /// Both outputs contribute bits, so the sum is rounded to 53 bits. When
    /// the first output is `u32::MAX` and the second is close to it the
    /// result rounds up to exactly `1.0`; that happens with probability of
    /// about `2^-54` per draw.
    #[inline]
    pub fn draw(&mut self) -> f64 {
        let (first, second) = self.next_pair();
        let value = combine(first, second);
        debug_assert!((0.0..=1.0).contains(&value), "draw out of range: {value}");
        value
    }

    /// Draw a 31-bit non-negative integer. Consumes the same two positions as
    /// [`StreamState::draw`].
    #[inline]
    pub fn next_int(&mut self) -> u32 {
        self.next_pair().0 >> 1
    }

    /// Fill `out` with successive draws.
    pub fn fill_doubles(&mut self, out: &mut [f64]) {
        for slot in out {
            *slot = self.draw();
        }
    }
}

impl RngCore for StreamState {
    fn next_u32(&mut self) -> u32 {
        self.next_pair().0
    }

    fn next_u64(&mut self) -> u64 {
        let (first, second) = self.next_pair();
        (u64::from(first) << 32) | u64::from(second)
    }

    fn fill_bytes(&mut self, dest: &mut [u8]) {
        for chunk in dest.chunks_mut(8) {
            let bytes = self.next_u64().to_le_bytes();
            chunk.copy_from_slice(&bytes[..chunk.len()]);
        }
    }

    fn try_fill_bytes(&mut self, dest: &mut [u8]) -> Result<(), rand::Error> {
        self.fill_bytes(dest);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{combine, FLT_MULT};
    use crate::factory::StreamFactory;
    use crate::params::ParameterSet;
    use proptest::prelude::{prop_assert, proptest};
    use rand::RngCore;

    #[test]
    fn multiplier_is_two_to_minus_32() {
        assert_eq!(FLT_MULT, 1.0 / 4_294_967_296.0);
    }

    #[test]
    fn combined_outputs_only_reach_one_by_rounding() {
        assert_eq!(combine(0, 0), 0.0);
        assert_eq!(combine(1 << 31, 0), 0.5);
        assert!(combine(u32::MAX, 0) < 1.0);
        assert!(combine(u32::MAX, 1 << 20) < 1.0);
        assert_eq!(combine(u32::MAX, u32::MAX), 1.0);
    }

    #[test]
    fn history_index_moves_two_positions_per_draw() {
        let factory = StreamFactory::new(ParameterSet::L17K5);
        let mut state = factory.create(0, 12_345);
        assert_eq!(state.history_index(), 16);
        state.draw();
        assert_eq!(state.history_index(), 14);
        for _ in 0..7 {
            state.draw();
        }
        assert_eq!(state.history_index(), 0);
        state.draw();
        assert_eq!(state.history_index(), 15);
    }

    #[test]
    fn integer_and_double_draws_share_a_sequence() {
        let factory = StreamFactory::new(ParameterSet::L31K6);
        let mut doubles = factory.create(3, 77);
        let mut ints = doubles.clone();
        let mut raw = doubles.clone();
        for _ in 0..50 {
            let value = doubles.draw();
            let int = ints.next_int();
            let high = raw.next_u32();
            assert!(int < 1 << 31);
            assert_eq!(int, high >> 1);
            assert_eq!((value * 4_294_967_296.0) as u32, high);
        }
    }

    #[test]
    fn rng_core_bytes_follow_u64_draws() {
        let factory = StreamFactory::new(ParameterSet::L17K5);
        let mut bytes_state = factory.create(1, 5);
        let mut word_state = bytes_state.clone();
        let mut bytes = [0u8; 12];
        bytes_state.fill_bytes(&mut bytes);
        let first = word_state.next_u64().to_le_bytes();
        let second = word_state.next_u64().to_le_bytes();
        assert_eq!(&bytes[..8], &first);
        assert_eq!(&bytes[8..], &second[..4]);
    }

    proptest! {
        #[test]
        fn draws_stay_in_unit_interval(index in 0u32..10_000, seed: u32, count in 1usize..400) {
            let factory = StreamFactory::new(ParameterSet::default());
            let mut state = factory.create(index, seed);
            for _ in 0..count {
                let value = state.draw();
                prop_assert!((0.0..1.0).contains(&value));
            }
        }
    }
}
