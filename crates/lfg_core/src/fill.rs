use crate::params::ParameterSet;
use crate::register::{advance, Register};

/// Substituted for a zero register seed, and mixed into every stored seed so
/// that small user seeds spread out.
pub const GS0: u32 = 0x372f_05ac;

/// Low bits of a register entry that carry fill data; the bit below them is
/// left free for the canonical form.
const FILL_MASK: u32 = u32::MAX >> 1;

/// Build one lag register from a node vector and a seed.
///
/// `node` is a spawn-index vector (`L - 1` words) and `out` has `L` words.
/// The two registers of a stream are filled from node vectors that differ by
/// one in their low word.
pub fn fill(params: ParameterSet, node: &[u32], seed: u32, out: &mut [u32]) {
    let len = params.register_len();
    debug_assert_eq!(node.len(), params.spawn_words());
    debug_assert_eq!(out.len(), len);

    let mixed = node[0] ^ seed;
    let mut reg: Register = [if mixed == 0 { GS0 } else { mixed }, mixed];
    advance(&mut reg);
    advance(&mut reg);

    out[0] = (node[0] & FILL_MASK) << 1;
    for i in 1..len {
        advance(&mut reg);
        let node_word = node.get(i).copied().unwrap_or(0);
        out[i] = ((reg[0] ^ node_word) & FILL_MASK) << 1;
    }
    out[len - 1] = 0;

    let first = params.first();
    for entry in &mut out[first..first + params.lsbs()] {
        *entry |= 1;
    }
}
