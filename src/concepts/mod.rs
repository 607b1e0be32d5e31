//! Concept encoding: text to sparse binary vectors.
//!
//! Every (letter, position-key) pair gets its own sparse random concept
//! vector. A text stream is split into fixed-size frames of characters;
//! the frame's vector is the bitwise OR of its letters' concept vectors,
//! a Bloom-filter-like composite the combinatorial space trains on.

mod fragments;
mod random_vector;
mod system;

pub use fragments::{Fragment, FragmentReader};
pub use random_vector::RandomVectorBuilder;
pub use system::ConceptSystem;
