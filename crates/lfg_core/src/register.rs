//! 64-bit linear-feedback register used to synthesize register fills.
//!
//! The register steps according to the primitive polynomial `(64,4,3,1,0)`
//! and is stored as two 32-bit words. Each call to [`advance`] performs 64
//! single-bit steps: four steps per table lookup for the low 28 bits of each
//! word, and explicit parity terms with cross-word feedback for the top four.
//!
//! The tables are pinned data. A table that differs in a single entry still
//! produces plausible fills but breaks bit-compatibility with every state
//! saved so far, so the tests regenerate both from their definitions.

/// Tap mask of the feedback polynomial. [`MASK_GEN`] depends on it.
pub(crate) const FEEDBACK_MASK: u32 = 0x1b;

/// Two-word register image, low word first.
pub type Register = [u32; 2];

/// Population count of every byte value.
pub(crate) const BIT_COUNT: [u8; 256] = [
    0, 1, 1, 2, 1, 2, 2, 3, 1, 2, 2, 3, 2, 3, 3, 4,
    1, 2, 2, 3, 2, 3, 3, 4, 2, 3, 3, 4, 3, 4, 4, 5,
    1, 2, 2, 3, 2, 3, 3, 4, 2, 3, 3, 4, 3, 4, 4, 5,
    2, 3, 3, 4, 3, 4, 4, 5, 3, 4, 4, 5, 4, 5, 5, 6,
    1, 2, 2, 3, 2, 3, 3, 4, 2, 3, 3, 4, 3, 4, 4, 5,
    2, 3, 3, 4, 3, 4, 4, 5, 3, 4, 4, 5, 4, 5, 5, 6,
    2, 3, 3, 4, 3, 4, 4, 5, 3, 4, 4, 5, 4, 5, 5, 6,
    3, 4, 4, 5, 4, 5, 5, 6, 4, 5, 5, 6, 5, 6, 6, 7,
    1, 2, 2, 3, 2, 3, 3, 4, 2, 3, 3, 4, 3, 4, 4, 5,
    2, 3, 3, 4, 3, 4, 4, 5, 3, 4, 4, 5, 4, 5, 5, 6,
    2, 3, 3, 4, 3, 4, 4, 5, 3, 4, 4, 5, 4, 5, 5, 6,
    3, 4, 4, 5, 4, 5, 5, 6, 4, 5, 5, 6, 5, 6, 6, 7,
    2, 3, 3, 4, 3, 4, 4, 5, 3, 4, 4, 5, 4, 5, 5, 6,
    3, 4, 4, 5, 4, 5, 5, 6, 4, 5, 5, 6, 5, 6, 6, 7,
    3, 4, 4, 5, 4, 5, 5, 6, 4, 5, 5, 6, 5, 6, 6, 7,
    4, 5, 5, 6, 5, 6, 6, 7, 5, 6, 6, 7, 6, 7, 7, 8,
];

/// Four register steps per lookup: bit `i` of entry `v` is the parity of
/// `(v >> i) & FEEDBACK_MASK` for `i` in `0..4`.
pub(crate) const MASK_GEN: [u32; 256] = [
    0, 1, 3, 2, 6, 7, 5, 4, 13, 12, 14, 15, 11, 10, 8, 9,
    11, 10, 8, 9, 13, 12, 14, 15, 6, 7, 5, 4, 0, 1, 3, 2,
    6, 7, 5, 4, 0, 1, 3, 2, 11, 10, 8, 9, 13, 12, 14, 15,
    13, 12, 14, 15, 11, 10, 8, 9, 0, 1, 3, 2, 6, 7, 5, 4,
    12, 13, 15, 14, 10, 11, 9, 8, 1, 0, 2, 3, 7, 6, 4, 5,
    7, 6, 4, 5, 1, 0, 2, 3, 10, 11, 9, 8, 12, 13, 15, 14,
    10, 11, 9, 8, 12, 13, 15, 14, 7, 6, 4, 5, 1, 0, 2, 3,
    1, 0, 2, 3, 7, 6, 4, 5, 12, 13, 15, 14, 10, 11, 9, 8,
    8, 9, 11, 10, 14, 15, 13, 12, 5, 4, 6, 7, 3, 2, 0, 1,
    3, 2, 0, 1, 5, 4, 6, 7, 14, 15, 13, 12, 8, 9, 11, 10,
    14, 15, 13, 12, 8, 9, 11, 10, 3, 2, 0, 1, 5, 4, 6, 7,
    5, 4, 6, 7, 3, 2, 0, 1, 8, 9, 11, 10, 14, 15, 13, 12,
    4, 5, 7, 6, 2, 3, 1, 0, 9, 8, 10, 11, 15, 14, 12, 13,
    15, 14, 12, 13, 9, 8, 10, 11, 2, 3, 1, 0, 4, 5, 7, 6,
    2, 3, 1, 0, 4, 5, 7, 6, 15, 14, 12, 13, 9, 8, 10, 11,
    9, 8, 10, 11, 15, 14, 12, 13, 4, 5, 7, 6, 2, 3, 1, 0,
];

/// Cross-word feedback masks for bits 28..31: `(bit, mask over w0 >> 24, mask over w1)`.
const HIGH_TAPS: [(u32, u32, u32); 4] = [
    (28, 0xb0, 0x1b),
    (29, 0x60, 0x2d),
    (30, 0xc0, 0x5a),
    (31, 0x80, 0xaf),
];

#[inline]
fn parity(byte: u32) -> u32 {
    u32::from(BIT_COUNT[(byte & 0xff) as usize]) & 1
}

/// Step `reg` 64 times.
pub fn advance(reg: &mut Register) {
    let [w0, w1] = *reg;
    let mut next0 = 0u32;
    let mut next1 = 0u32;

    for shift in (0u32..28).step_by(4) {
        next0 |= MASK_GEN[((w0 >> shift) & 0xff) as usize] << shift;
        next1 |= MASK_GEN[((w1 >> shift) & 0xff) as usize] << shift;
    }

    let w0_high = w0 >> 24;
    for (bit, high_mask, low_mask) in HIGH_TAPS {
        let low = parity((w0 >> bit) & FEEDBACK_MASK) ^ parity(w1 & (FEEDBACK_MASK >> (32 - bit)));
        next0 |= low << bit;

        let high = parity(w0_high & high_mask) ^ parity(w1 & low_mask);
        next1 |= high << bit;
    }

    *reg = [next0, next1];
}
