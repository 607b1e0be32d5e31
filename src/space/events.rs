//! Notification channels for cluster lifecycle and point activation.
//!
//! A point carries one listener collection per notification kind. Dispatch
//! is synchronous and happens inside `train`/`check`; each listener is
//! invoked independently and panic-isolated, so a failing listener can
//! neither suppress the remaining listeners nor corrupt the point's
//! cluster state. Order across listeners is unspecified.

use std::collections::HashSet;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use tracing::warn;

use super::point::PointId;

/// Immutable snapshot of a point's sets, carried by cluster-created
/// notifications.
#[derive(Clone, Debug)]
pub struct ClusterSnapshot {
    /// The point's fixed tracking mask.
    pub tracking: HashSet<usize>,
    /// The freshly created cluster (a subset of `tracking`).
    pub cluster: HashSet<usize>,
}

pub type ClusterCreatedFn = Arc<dyn Fn(PointId, &ClusterSnapshot) + Send + Sync>;
pub type ClusterDestroyedFn = Arc<dyn Fn(PointId) + Send + Sync>;
pub type PointActivatedFn = Arc<dyn Fn(PointId, usize) + Send + Sync>;

/// Per-point listener registry, one collection per notification kind.
#[derive(Clone, Default)]
pub struct Listeners {
    created: Vec<ClusterCreatedFn>,
    destroyed: Vec<ClusterDestroyedFn>,
    activated: Vec<PointActivatedFn>,
}

impl Listeners {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_created(&mut self, f: ClusterCreatedFn) {
        self.created.push(f);
    }

    pub fn push_destroyed(&mut self, f: ClusterDestroyedFn) {
        self.destroyed.push(f);
    }

    pub fn push_activated(&mut self, f: PointActivatedFn) {
        self.activated.push(f);
    }

    pub fn emit_cluster_created(&self, id: PointId, snapshot: &ClusterSnapshot) {
        for listener in &self.created {
            if catch_unwind(AssertUnwindSafe(|| listener(id, snapshot))).is_err() {
                warn!(point = id.0, "cluster-created listener panicked");
            }
        }
    }

    pub fn emit_cluster_destroyed(&self, id: PointId) {
        for listener in &self.destroyed {
            if catch_unwind(AssertUnwindSafe(|| listener(id))).is_err() {
                warn!(point = id.0, "cluster-destroyed listener panicked");
            }
        }
    }

    pub fn emit_point_activated(&self, id: PointId, output_bit: usize) {
        for listener in &self.activated {
            if catch_unwind(AssertUnwindSafe(|| listener(id, output_bit))).is_err() {
                warn!(point = id.0, "point-activated listener panicked");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;

    #[test]
    fn all_listeners_are_invoked() {
        let hits = Arc::new(Mutex::new(Vec::new()));
        let mut listeners = Listeners::new();
        for tag in 0..3 {
            let hits = hits.clone();
            listeners.push_destroyed(Arc::new(move |id| hits.lock().push((tag, id.0))));
        }

        listeners.emit_cluster_destroyed(PointId(9));

        let mut seen = hits.lock().clone();
        seen.sort();
        assert_eq!(seen, vec![(0, 9), (1, 9), (2, 9)]);
    }

    #[test]
    fn panicking_listener_does_not_suppress_others() {
        let hits = Arc::new(Mutex::new(0usize));
        let mut listeners = Listeners::new();

        listeners.push_activated(Arc::new(|_, _| panic!("listener bug")));
        {
            let hits = hits.clone();
            listeners.push_activated(Arc::new(move |_, bit| {
                assert_eq!(bit, 3);
                *hits.lock() += 1;
            }));
        }

        listeners.emit_point_activated(PointId(0), 3);
        assert_eq!(*hits.lock(), 1);
    }

    #[test]
    fn created_snapshot_carries_both_sets() {
        let seen: Arc<Mutex<Option<(usize, usize)>>> = Arc::new(Mutex::new(None));
        let mut listeners = Listeners::new();
        {
            let seen = seen.clone();
            listeners.push_created(Arc::new(move |_, snap| {
                *seen.lock() = Some((snap.tracking.len(), snap.cluster.len()));
            }));
        }

        let snapshot = ClusterSnapshot {
            tracking: [0, 5, 6, 8].into_iter().collect(),
            cluster: [0, 5].into_iter().collect(),
        };
        listeners.emit_cluster_created(PointId(1), &snapshot);
        assert_eq!(*seen.lock(), Some((4, 2)));
    }
}
