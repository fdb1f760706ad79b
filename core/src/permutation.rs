use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;

// Marks an unfilled slot while the base table is being built
const EMPTY: i16 = -1;

// Permutation table for gradient hashing: a 256-entry bijection of [0, 255]
// stored twice so lookups like perm[x + 1 + perm[y]] never need wrapping.
//
// The table is fully determined by the seed, but only within this crate: the
// pseudo-random stream (ChaCha8) is not meant to match any other implementation.
#[derive(Clone, PartialEq, Eq)]
pub struct PermutationTable {
    perm: [u8; 512],
}

impl PermutationTable {
    pub fn new(seed: i32) -> Self {
        // Sign-extend so negative seeds get their own distinct stream
        let mut rng = ChaCha8Rng::seed_from_u64(seed as i64 as u64);

        let mut base = [EMPTY; 256];
        // Count 0..256 and drop each value into a random empty slot,
        // redrawing whenever the slot is already taken
        for value in 0..256i16 {
            loop {
                let slot = (rng.next_u32() % 256) as usize;
                if base[slot] == EMPTY {
                    base[slot] = value;
                    break;
                }
            }
        }

        // Double the table with a bitwise AND instead of wrapping at lookup time
        let mut perm = [0u8; 512];
        for (i, p) in perm.iter_mut().enumerate() {
            *p = base[i & 255] as u8;
        }

        tracing::debug!(seed, "built permutation table");
        Self { perm }
    }

    // The 256 distinct values before doubling
    pub fn base(&self) -> &[u8] {
        &self.perm[..256]
    }

    pub fn as_slice(&self) -> &[u8; 512] {
        &self.perm
    }

    // Entry at `index`, which must be below 512
    #[inline]
    pub(crate) fn get(&self, index: usize) -> usize {
        self.perm[index] as usize
    }
}

impl std::fmt::Debug for PermutationTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PermutationTable")
            .field("base", &&self.perm[..8])
            .finish_non_exhaustive()
    }
}
