//! Sparse random binary vector sampling.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::bits::BitVec;

/// Builds sparse binary vectors with a fixed number of set bits at
/// uniformly random distinct positions.
///
/// Reuse one instance across all concepts of a system: the shared RNG
/// stream is what makes the vectors differ. A fresh builder per concept
/// would be free to repeat positions across concepts.
pub struct RandomVectorBuilder {
    rng: StdRng,
}

impl RandomVectorBuilder {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Fixed seed for reproducible concept systems.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// A `len`-bit vector with exactly `ones_count` distinct set bits.
    ///
    /// Panics if `ones_count > len` (cannot place that many distinct bits).
    pub fn build(&mut self, len: usize, ones_count: usize) -> BitVec {
        assert!(
            ones_count <= len,
            "cannot place {} distinct bits in a {}-bit vector",
            ones_count,
            len
        );
        let mut vector = BitVec::zeros(len);
        let mut placed = 0;
        while placed < ones_count {
            let idx = self.rng.gen_range(0..len);
            if !vector.get_bit(idx) {
                vector.set_bit(idx, true);
                placed += 1;
            }
        }
        vector
    }
}

impl Default for RandomVectorBuilder {
    fn default() -> Self {
        Self::new()
    }
}
