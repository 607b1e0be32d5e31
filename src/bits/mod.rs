//! Bit-vector primitives: dynamically sized binary vectors stored as u64 words.

mod bitvec;

pub use bitvec::BitVec;
