//! Ordered population of points and bulk train/check scans.

use rayon::prelude::*;
use tracing::debug;

use super::point::{Point, PointId};
use crate::bits::BitVec;
use crate::{Error, Result};

/// The full population. Owns its points for the run; points never
/// reference each other, so bulk scans are an embarrassingly parallel map.
///
/// The space does not track which points currently hold a cluster. The
/// caller maintains that membership set from cluster-created / destroyed
/// notifications and passes the live ids to [`check_points`](Self::check_points).
pub struct CombinatorialSpace {
    points: Vec<Point>,
}

impl CombinatorialSpace {
    pub(crate) fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Point> {
        self.points.iter()
    }

    pub fn point(&self, id: PointId) -> Option<&Point> {
        self.points.get(id.0)
    }

    pub fn point_mut(&mut self, id: PointId) -> Option<&mut Point> {
        self.points.get_mut(id.0)
    }

    pub fn points_mut(&mut self) -> &mut [Point] {
        &mut self.points
    }

    /// Train every point on one (input, output) example, in parallel.
    ///
    /// Per-point failures are isolated: every point still gets its
    /// training call, and the failures come back aggregated in
    /// [`Error::Scan`].
    pub fn train_all(&mut self, input: Option<&BitVec>, output: Option<&BitVec>) -> Result<()> {
        let failures: Vec<(usize, Error)> = self
            .points
            .par_iter_mut()
            .filter_map(|point| {
                let id = point.id().0;
                point.train(input, output).err().map(|e| (id, e))
            })
            .collect();

        if failures.is_empty() {
            Ok(())
        } else {
            debug!(failed = failures.len(), "training scan had point failures");
            Err(Error::Scan { failures })
        }
    }

    /// Check the given points against an input vector, returning the ids
    /// that fired. Callers pass their live-cluster membership set here;
    /// checking the whole population works but wastes scans on clusterless
    /// points.
    ///
    /// Same isolation policy as [`train_all`](Self::train_all): an unknown
    /// id or a too-short vector for one point does not stop the others.
    pub fn check_points(&self, ids: &[PointId], input: &BitVec) -> Result<Vec<PointId>> {
        let mut fired = Vec::new();
        let mut failures: Vec<(usize, Error)> = Vec::new();

        for &id in ids {
            match self.points.get(id.0) {
                None => failures.push((id.0, Error::UnknownPoint(id.0))),
                Some(point) => match point.check(input) {
                    Ok(true) => fired.push(id),
                    Ok(false) => {}
                    Err(e) => failures.push((id.0, e)),
                },
            }
        }

        if failures.is_empty() {
            Ok(fired)
        } else {
            Err(Error::Scan { failures })
        }
    }
}
