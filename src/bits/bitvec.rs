//! Dynamically sized binary vector, stored as u64 words.

use std::fmt;

use crate::{Error, Result};

/// Fixed-length binary vector, sized at construction.
///
/// Stored as `ceil(len / 64)` u64 words. Bits past `len` in the last word
/// are always zero. Indexing past `len` is a programming error and panics;
/// "vector shorter than a learned index" situations are reported as
/// [`Error::VectorTooShort`] by the callers that can see the contract.
#[derive(Clone, PartialEq, Eq)]
pub struct BitVec {
    bits: usize,
    words: Vec<u64>,
}

impl BitVec {
    /// All-zero vector of `len` bits.
    pub fn zeros(len: usize) -> Self {
        Self {
            bits: len,
            words: vec![0u64; len.div_ceil(64)],
        }
    }

    /// Vector of `len` bits with exactly the given positions set.
    ///
    /// Panics if any index is `>= len`.
    pub fn from_indexes(len: usize, indexes: &[usize]) -> Self {
        let mut v = Self::zeros(len);
        for &i in indexes {
            v.set_bit(i, true);
        }
        v
    }

    /// Length in bits.
    #[inline]
    pub fn len(&self) -> usize {
        self.bits
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// Get bit at position. Panics if `pos >= len`.
    #[inline]
    pub fn get_bit(&self, pos: usize) -> bool {
        assert!(pos < self.bits, "bit index {} out of range 0..{}", pos, self.bits);
        (self.words[pos / 64] >> (pos % 64)) & 1 == 1
    }

    /// Set bit at position. Panics if `pos >= len`.
    #[inline]
    pub fn set_bit(&mut self, pos: usize, value: bool) {
        assert!(pos < self.bits, "bit index {} out of range 0..{}", pos, self.bits);
        let mask = 1u64 << (pos % 64);
        if value {
            self.words[pos / 64] |= mask;
        } else {
            self.words[pos / 64] &= !mask;
        }
    }

    /// Clear every bit.
    pub fn clear(&mut self) {
        self.words.iter_mut().for_each(|w| *w = 0);
    }

    /// Count set bits (popcount).
    pub fn popcount(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    /// In-place bitwise OR with an equal-length vector.
    pub fn or_with(&mut self, other: &BitVec) -> Result<()> {
        self.check_len(other)?;
        for (a, b) in self.words.iter_mut().zip(&other.words) {
            *a |= b;
        }
        Ok(())
    }

    /// In-place bitwise XOR with an equal-length vector.
    pub fn xor_with(&mut self, other: &BitVec) -> Result<()> {
        self.check_len(other)?;
        for (a, b) in self.words.iter_mut().zip(&other.words) {
            *a ^= b;
        }
        Ok(())
    }

    /// Number of positions at which the two vectors differ.
    pub fn hamming(&self, other: &BitVec) -> Result<usize> {
        self.check_len(other)?;
        Ok(self
            .words
            .iter()
            .zip(&other.words)
            .map(|(a, b)| (a ^ b).count_ones() as usize)
            .sum())
    }

    /// Iterate the positions of set bits, ascending.
    pub fn iter_ones(&self) -> IterOnes<'_> {
        IterOnes {
            vec: self,
            word_idx: 0,
            current: self.words.first().copied().unwrap_or(0),
        }
    }

    fn check_len(&self, other: &BitVec) -> Result<()> {
        if self.bits != other.bits {
            return Err(Error::LengthMismatch {
                left: self.bits,
                right: other.bits,
            });
        }
        Ok(())
    }
}

/// Bitwise OR producing a new vector. Delegates to the checked
/// [`BitVec::or_with`]; panics on a length mismatch.
impl std::ops::BitOr<&BitVec> for &BitVec {
    type Output = BitVec;

    fn bitor(self, other: &BitVec) -> BitVec {
        let mut out = self.clone();
        if let Err(e) = out.or_with(other) {
            panic!("{e}");
        }
        out
    }
}

/// Bitwise XOR producing a new vector. Delegates to the checked
/// [`BitVec::xor_with`]; panics on a length mismatch.
impl std::ops::BitXor<&BitVec> for &BitVec {
    type Output = BitVec;

    fn bitxor(self, other: &BitVec) -> BitVec {
        let mut out = self.clone();
        if let Err(e) = out.xor_with(other) {
            panic!("{e}");
        }
        out
    }
}

impl fmt::Debug for BitVec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "BitVec[{} bits, ones: {:?}]", self.bits, self.iter_ones().collect::<Vec<_>>())
    }
}

/// Iterator over set-bit positions, word at a time.
pub struct IterOnes<'a> {
    vec: &'a BitVec,
    word_idx: usize,
    current: u64,
}

impl Iterator for IterOnes<'_> {
    type Item = usize;

    fn next(&mut self) -> Option<usize> {
        loop {
            if self.current != 0 {
                let bit = self.current.trailing_zeros() as usize;
                self.current &= self.current - 1;
                return Some(self.word_idx * 64 + bit);
            }
            self.word_idx += 1;
            if self.word_idx >= self.vec.words.len() {
                return None;
            }
            self.current = self.vec.words[self.word_idx];
        }
    }
}
