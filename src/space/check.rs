//! Shared threshold-scan primitive used by both training and checking.

use crate::bits::BitVec;

/// Count active bits of `vector` at the given positions, short-circuiting
/// at the first threshold crossing.
///
/// Invokes `on_reach(vector)` exactly once at the crossing and stops
/// scanning. Returns whether the threshold was reached. Iteration order
/// must not matter to callers: the outcome is a pure threshold count.
///
/// The count only advances on active bits, so `threshold == 0` still needs
/// one active bit to fire; an empty index set never reaches a positive
/// threshold. Both degenerate cases fall out of the count logic.
pub fn check_threshold<I, F>(vector: &BitVec, indexes: I, threshold: usize, on_reach: F) -> bool
where
    I: IntoIterator<Item = usize>,
    F: FnOnce(&BitVec),
{
    let mut active = 0usize;
    for idx in indexes {
        if !vector.get_bit(idx) {
            continue;
        }
        active += 1;
        if active >= threshold {
            on_reach(vector);
            return true;
        }
    }
    false
}
