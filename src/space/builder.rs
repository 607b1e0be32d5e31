//! Population factory for combinatorial spaces.

use std::collections::HashSet;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use super::events::{ClusterCreatedFn, ClusterDestroyedFn, PointActivatedFn};
use super::point::{Point, PointId};
use super::space::CombinatorialSpace;
use super::SpaceConfig;
use crate::Result;

/// Builds a population of points from a [`SpaceConfig`].
///
/// Output-bit assignment is deterministic: point `i` votes for output bit
/// `i % output_len`, so every output position is covered whenever the
/// population is at least as large as the output vector. Tracking masks
/// are sampled without replacement from one shared RNG, one point fully
/// after another, which makes the whole build reproducible under
/// [`with_seed`](SpaceBuilder::with_seed). Parallelizing the build would
/// break that reproducibility; it is intentionally sequential.
///
/// Listener sinks supplied to the builder are wired to every point before
/// the point enters the space.
pub struct SpaceBuilder {
    config: SpaceConfig,
    rng: StdRng,
    on_created: Option<ClusterCreatedFn>,
    on_destroyed: Option<ClusterDestroyedFn>,
    on_activated: Option<PointActivatedFn>,
}

impl SpaceBuilder {
    /// Validates the config; seeding defaults to OS entropy.
    pub fn new(config: SpaceConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            rng: StdRng::from_entropy(),
            on_created: None,
            on_destroyed: None,
            on_activated: None,
        })
    }

    /// Fixed seed for reproducible tracking masks.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    pub fn on_cluster_created(mut self, f: ClusterCreatedFn) -> Self {
        self.on_created = Some(f);
        self
    }

    pub fn on_cluster_destroyed(mut self, f: ClusterDestroyedFn) -> Self {
        self.on_destroyed = Some(f);
        self
    }

    pub fn on_point_activated(mut self, f: PointActivatedFn) -> Self {
        self.on_activated = Some(f);
        self
    }

    pub fn build(mut self) -> CombinatorialSpace {
        let mut points = Vec::with_capacity(self.config.space_length);
        for i in 0..self.config.space_length {
            let tracking = sample_tracking(
                &mut self.rng,
                self.config.tracking_bits,
                self.config.input_len,
            );
            let mut point = Point::new(
                PointId(i),
                tracking,
                i % self.config.output_len,
                self.config.creation_threshold,
                self.config.activation_threshold,
            );
            if let Some(f) = &self.on_created {
                point.on_cluster_created(f.clone());
            }
            if let Some(f) = &self.on_destroyed {
                point.on_cluster_destroyed(f.clone());
            }
            if let Some(f) = &self.on_activated {
                point.on_point_activated(f.clone());
            }
            points.push(point);
        }
        debug!(points = points.len(), "combinatorial space built");
        CombinatorialSpace::new(points)
    }
}

/// Sample `count` distinct positions uniformly from `0..input_len`.
fn sample_tracking(rng: &mut StdRng, count: usize, input_len: usize) -> HashSet<usize> {
    let mut tracking = HashSet::with_capacity(count);
    while tracking.len() < count {
        tracking.insert(rng.gen_range(0..input_len));
    }
    tracking
}
