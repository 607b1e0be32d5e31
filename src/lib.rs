//! # combispace
//!
//! Combinatorial-space associative memory over sparse binary vectors.
//!
//! A space is a large population of independent [`Point`]s. Each point
//! watches a fixed random subset of input-vector bits (its tracking mask)
//! and learns to predict the activation of one output-vector bit by
//! maintaining a "cluster": the subset of its tracked bits it currently
//! believes is causally correlated with that output bit. There are no
//! gradients and no weights; learning is discrete set algebra driven by
//! two integer thresholds.
//!
//! ## Quick start
//! ```
//! use combispace::{BitVec, SpaceBuilder, SpaceConfig};
//!
//! let config = SpaceConfig {
//!     space_length: 1000,
//!     tracking_bits: 32,
//!     creation_threshold: 6,
//!     activation_threshold: 4,
//!     input_len: 256,
//!     output_len: 256,
//! };
//!
//! let mut space = SpaceBuilder::new(config).unwrap().with_seed(7).build();
//!
//! let input = BitVec::from_indexes(256, &[3, 17, 40, 77, 120, 200]);
//! let output = BitVec::from_indexes(256, &[5]);
//! space.train_all(Some(&input), Some(&output)).unwrap();
//! ```
//!
//! ## Architecture
//! ```text
//! encoder (concepts) ──▶ (input BitVec, output BitVec) pairs
//!                              │
//!                              ▼
//!        CombinatorialSpace ── Point 0 ── tracking mask + cluster
//!                           ── Point 1 ── tracking mask + cluster
//!                           ── ...
//!                              │ notifications
//!                              ▼
//!        caller accumulators (live-cluster set, predicted output bits)
//! ```
//!
//! The space itself never maintains the "points that currently hold a
//! cluster" set; the caller builds it from cluster-created / destroyed
//! notifications and decides which points to query at check time.

pub mod bits;
pub mod concepts;
pub mod space;

pub use bits::BitVec;
pub use concepts::{ConceptSystem, Fragment, FragmentReader, RandomVectorBuilder};
pub use space::{
    check_threshold, points_equal, ClusterSnapshot, CombinatorialSpace, Point, PointId,
    SpaceBuilder, SpaceConfig,
};

/// Crate version, for the demo binary banner.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate-level error type
#[derive(thiserror::Error, Debug)]
pub enum Error {
    /// A vector was shorter than an index it must cover. Silent truncation
    /// would corrupt learned clusters, so this always fails fast.
    #[error("vector too short: needs at least {needed} bits, got {got}")]
    VectorTooShort { needed: usize, got: usize },

    #[error("bit-vector length mismatch: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("no point with id {0}")]
    UnknownPoint(usize),

    /// Per-point failures collected from a population scan, training or
    /// checking. One point's failure never aborts the other points.
    #[error("{} point(s) failed during a population scan", failures.len())]
    Scan { failures: Vec<(usize, Error)> },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
