//! The combinatorial space: points, cluster lifecycle, population management.

mod builder;
mod check;
mod events;
mod point;
#[allow(clippy::module_inception)]
mod space;

pub use builder::SpaceBuilder;
pub use check::check_threshold;
pub use events::{
    ClusterCreatedFn, ClusterDestroyedFn, ClusterSnapshot, Listeners, PointActivatedFn,
};
pub use point::{points_equal, Point, PointId};
pub use space::CombinatorialSpace;

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Construction-time knobs for a combinatorial space.
///
/// All parameters are plain positive integers; there are no enumerated
/// modes. `activation_threshold > creation_threshold` (a cluster that can
/// be created but never fire) and `activation_threshold > tracking_bits`
/// (a point that can never fire at all) are degenerate but valid: such
/// points simply stay silent.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SpaceConfig {
    /// Number of points in the population.
    pub space_length: usize,
    /// How many input-vector bits each point watches.
    pub tracking_bits: usize,
    /// Minimum simultaneously active tracking bits to (re)form a cluster.
    pub creation_threshold: usize,
    /// Minimum simultaneously active cluster bits for a point to fire.
    pub activation_threshold: usize,
    /// Input bit-vector length.
    pub input_len: usize,
    /// Output bit-vector length.
    pub output_len: usize,
}

impl SpaceConfig {
    pub fn validate(&self) -> Result<()> {
        fn positive(value: usize, name: &str) -> Result<()> {
            if value == 0 {
                return Err(Error::InvalidConfig(format!("{name} must be > 0")));
            }
            Ok(())
        }

        positive(self.space_length, "space_length")?;
        positive(self.tracking_bits, "tracking_bits")?;
        positive(self.creation_threshold, "creation_threshold")?;
        positive(self.activation_threshold, "activation_threshold")?;
        positive(self.input_len, "input_len")?;
        positive(self.output_len, "output_len")?;

        if self.tracking_bits > self.input_len {
            return Err(Error::InvalidConfig(format!(
                "tracking_bits ({}) cannot exceed input_len ({})",
                self.tracking_bits, self.input_len
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> SpaceConfig {
        SpaceConfig {
            space_length: 100,
            tracking_bits: 8,
            creation_threshold: 6,
            activation_threshold: 4,
            input_len: 64,
            output_len: 64,
        }
    }

    #[test]
    fn valid_config_passes() {
        assert!(base().validate().is_ok());
    }

    #[test]
    fn zero_parameters_are_rejected() {
        let mut c = base();
        c.space_length = 0;
        assert!(c.validate().is_err());

        let mut c = base();
        c.activation_threshold = 0;
        assert!(c.validate().is_err());
    }

    #[test]
    fn tracking_bits_cannot_exceed_input_len() {
        let mut c = base();
        c.tracking_bits = 65;
        assert!(c.validate().is_err());
    }

    #[test]
    fn degenerate_threshold_order_is_accepted() {
        // activation > creation: clusters may form that can never fire.
        let mut c = base();
        c.creation_threshold = 3;
        c.activation_threshold = 5;
        assert!(c.validate().is_ok());
    }

    #[test]
    fn config_roundtrips_through_json() {
        let c = base();
        let json = serde_json::to_string(&c).unwrap();
        let back: SpaceConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back.space_length, c.space_length);
        assert_eq!(back.activation_threshold, c.activation_threshold);
    }
}
