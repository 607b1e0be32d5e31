//! Point: the unit of learning.
//!
//! A point watches a fixed set of input-vector positions (the tracking
//! mask) and votes for one output-vector bit. Its mutable state is a
//! single cluster: the subset of tracked positions currently believed to
//! predict the output bit. An empty cluster means "no cluster exists";
//! there is no separate flag.
//!
//! Cluster lifecycle per training call:
//! - output bit active, enough tracked bits active, no cluster: create;
//! - output bit active, enough tracked bits active, cluster exists:
//!   intersect the cluster with the active tracked bits, destroying it if
//!   it shrinks below the activation threshold;
//! - output bit inactive while the cluster would have fired: destroy
//!   (false-positive predictors are pruned this way);
//! - anything else: no-op.
//!
//! A cluster never grows once formed; it only contracts or dies.

use std::collections::HashSet;

use tracing::trace;

use super::check::check_threshold;
use super::events::{
    ClusterCreatedFn, ClusterDestroyedFn, ClusterSnapshot, Listeners, PointActivatedFn,
};
use crate::bits::BitVec;
use crate::{Error, Result};

/// Position of a point within its space. Stable for the run; carried by
/// every notification so callers can maintain membership sets.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointId(pub usize);

pub struct Point {
    id: PointId,
    tracking: HashSet<usize>,
    cluster: HashSet<usize>,
    creation_threshold: usize,
    activation_threshold: usize,
    output_bit: usize,
    listeners: Listeners,
}

impl Point {
    /// Create a point with an explicit tracking mask.
    ///
    /// The mask is fixed for the point's lifetime. The space builder is
    /// the usual caller; tests construct points directly.
    pub fn new(
        id: PointId,
        tracking: HashSet<usize>,
        output_bit: usize,
        creation_threshold: usize,
        activation_threshold: usize,
    ) -> Self {
        Self {
            id,
            tracking,
            cluster: HashSet::new(),
            creation_threshold,
            activation_threshold,
            output_bit,
            listeners: Listeners::new(),
        }
    }

    #[inline]
    pub fn id(&self) -> PointId {
        self.id
    }

    #[inline]
    pub fn output_bit(&self) -> usize {
        self.output_bit
    }

    pub fn tracking(&self) -> &HashSet<usize> {
        &self.tracking
    }

    pub fn cluster(&self) -> &HashSet<usize> {
        &self.cluster
    }

    #[inline]
    pub fn has_cluster(&self) -> bool {
        !self.cluster.is_empty()
    }

    pub fn on_cluster_created(&mut self, f: ClusterCreatedFn) {
        self.listeners.push_created(f);
    }

    pub fn on_cluster_destroyed(&mut self, f: ClusterDestroyedFn) {
        self.listeners.push_destroyed(f);
    }

    pub fn on_point_activated(&mut self, f: PointActivatedFn) {
        self.listeners.push_activated(f);
    }

    /// One online training step.
    ///
    /// An absent input or output vector is a deliberate no-op: the stream
    /// produced uninformative data for this step. A vector too short for
    /// the point's indexes is a contract violation and fails fast with no
    /// state change.
    pub fn train(&mut self, input: Option<&BitVec>, output: Option<&BitVec>) -> Result<()> {
        let (input, output) = match (input, output) {
            (Some(input), Some(output)) => (input, output),
            _ => return Ok(()),
        };

        if output.len() <= self.output_bit {
            return Err(Error::VectorTooShort {
                needed: self.output_bit + 1,
                got: output.len(),
            });
        }
        let needed = self.tracking.iter().max().map_or(0, |m| m + 1);
        if input.len() < needed {
            return Err(Error::VectorTooShort {
                needed,
                got: input.len(),
            });
        }

        if output.get_bit(self.output_bit) {
            let active: HashSet<usize> = self
                .tracking
                .iter()
                .copied()
                .filter(|&i| input.get_bit(i))
                .collect();

            if active.len() < self.creation_threshold {
                return Ok(());
            }

            if self.cluster.is_empty() {
                self.cluster = active;
                trace!(point = self.id.0, size = self.cluster.len(), "cluster created");
                let snapshot = ClusterSnapshot {
                    tracking: self.tracking.clone(),
                    cluster: self.cluster.clone(),
                };
                self.listeners.emit_cluster_created(self.id, &snapshot);
            } else {
                self.cluster.retain(|i| active.contains(i));
                if self.cluster.len() < self.activation_threshold {
                    self.destroy_cluster();
                }
            }
        } else if !self.cluster.is_empty() {
            // The cluster would have fired while the output bit says it
            // should not: the hypothesis is contradicted. Same threshold
            // scan as `check`, including the short-circuit.
            let contradicted = check_threshold(
                input,
                self.cluster.iter().copied(),
                self.activation_threshold,
                |_| {},
            );
            if contradicted {
                self.destroy_cluster();
            }
        }
        Ok(())
    }

    /// Query the point against an input vector.
    ///
    /// Fires (emits point-activated with this point's output bit) and
    /// returns `Ok(true)` iff at least `activation_threshold` cluster bits
    /// are active. A point without a cluster never fires.
    pub fn check(&self, input: &BitVec) -> Result<bool> {
        let needed = self.cluster.iter().max().map_or(0, |m| m + 1);
        if input.len() < needed {
            return Err(Error::VectorTooShort {
                needed,
                got: input.len(),
            });
        }

        let fired = check_threshold(
            input,
            self.cluster.iter().copied(),
            self.activation_threshold,
            |_| self.listeners.emit_point_activated(self.id, self.output_bit),
        );
        Ok(fired)
    }

    fn destroy_cluster(&mut self) {
        trace!(point = self.id.0, "cluster destroyed");
        self.cluster.clear();
        self.listeners.emit_cluster_destroyed(self.id);
    }
}

/// Structural equality on (tracking mask, output bit).
///
/// Diagnostics/tests only; the builder never deduplicates points, and two
/// structurally equal points remain independent entities.
pub fn points_equal(a: &Point, b: &Point) -> bool {
    a.output_bit == b.output_bit && a.tracking == b.tracking
}
