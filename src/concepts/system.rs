//! Case-invariant character concept system.

use std::collections::HashMap;

use super::random_vector::RandomVectorBuilder;
use crate::bits::BitVec;

/// Maps (lowercase ASCII letter, position key) to its sparse concept
/// vector. Built once; lookups lowercase the character, and non-letters
/// have no concept.
pub struct ConceptSystem {
    vectors: HashMap<(char, u8), BitVec>,
    positions: u8,
    vector_len: usize,
}

impl ConceptSystem {
    /// Build concepts for `'a'..='z'` across `positions` position keys,
    /// each a fresh sparse vector of `vector_len` bits with `mask_len`
    /// ones drawn from the shared builder.
    pub fn build(
        builder: &mut RandomVectorBuilder,
        positions: u8,
        vector_len: usize,
        mask_len: usize,
    ) -> Self {
        let mut vectors = HashMap::new();
        for ch in 'a'..='z' {
            for position in 0..positions {
                vectors.insert((ch, position), builder.build(vector_len, mask_len));
            }
        }
        Self {
            vectors,
            positions,
            vector_len,
        }
    }

    #[inline]
    pub fn positions(&self) -> u8 {
        self.positions
    }

    #[inline]
    pub fn vector_len(&self) -> usize {
        self.vector_len
    }

    /// Concept vector for a character at a position key. Case-invariant;
    /// `None` for non-letters and out-of-range positions.
    pub fn vector(&self, ch: char, position: u8) -> Option<&BitVec> {
        let ch = ch.to_ascii_lowercase();
        self.vectors.get(&(ch, position))
    }
}
