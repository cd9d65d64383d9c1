// src/bsp/config.rs

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::BspError;

pub const DEFAULT_VERTEX_WELDING_EPSILON: f64 = 0.005;
pub const DEFAULT_PUNISHABLE_ENDPOINT_DISTANCE: f64 = 0.1;
pub const DEFAULT_GEOMETRY_EPSILON: f64 = 1e-6;

/// Integer weights that make up a splitter's score. Lower scores win.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SplitWeights {
    /// Added once per segment the splitter would actually cut in two.
    pub split_score_factor: i64,
    /// Applied according to [`AxisAlignmentPolicy`].
    pub not_axis_aligned_score: i64,
    /// Multiplied by `|left - right|`.
    pub left_right_split_imbalance_score: i64,
    /// Added when a cut lands close to an endpoint without welding onto it.
    pub near_endpoint_split_score: i64,
}

impl Default for SplitWeights {
    fn default() -> Self {
        SplitWeights {
            split_score_factor: 20,
            not_axis_aligned_score: 5,
            left_right_split_imbalance_score: 1,
            near_endpoint_split_score: 100,
        }
    }
}

/// Which splitters receive `not_axis_aligned_score`.
///
/// Two historical variants of the scorer disagree on the sign of this term,
/// so the polarity is a setting rather than a constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisAlignmentPolicy {
    /// Diagonal splitters pay the weight, favoring grid-aligned cuts.
    #[default]
    PenalizeDiagonal,
    /// Horizontal and vertical splitters pay the weight instead.
    PenalizeAxisAligned,
}

impl AxisAlignmentPolicy {
    pub fn is_penalized(self, axis_aligned: bool) -> bool {
        match self {
            AxisAlignmentPolicy::PenalizeDiagonal => !axis_aligned,
            AxisAlignmentPolicy::PenalizeAxisAligned => axis_aligned,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BspConfig {
    /// Intersections closer than this to an endpoint snap onto the vertex.
    pub vertex_welding_epsilon: f64,
    /// Looser distance used only for the near-endpoint penalty.
    pub punishable_endpoint_distance: f64,
    /// Tolerance for parallel, collinear and side tests.
    pub geometry_epsilon: f64,
    pub axis_alignment: AxisAlignmentPolicy,
    pub split_weights: SplitWeights,
}

impl Default for BspConfig {
    fn default() -> Self {
        BspConfig {
            vertex_welding_epsilon: DEFAULT_VERTEX_WELDING_EPSILON,
            punishable_endpoint_distance: DEFAULT_PUNISHABLE_ENDPOINT_DISTANCE,
            geometry_epsilon: DEFAULT_GEOMETRY_EPSILON,
            axis_alignment: AxisAlignmentPolicy::default(),
            split_weights: SplitWeights::default(),
        }
    }
}

impl BspConfig {
    /// Parses a config from JSON. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, BspError> {
        let config: BspConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, BspError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| BspError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), BspError> {
        check_epsilon("vertex_welding_epsilon", self.vertex_welding_epsilon)?;
        check_epsilon("punishable_endpoint_distance", self.punishable_endpoint_distance)?;
        check_epsilon("geometry_epsilon", self.geometry_epsilon)?;

        if self.vertex_welding_epsilon > self.punishable_endpoint_distance {
            return Err(BspError::EpsilonOrder {
                welding: self.vertex_welding_epsilon,
                punishable: self.punishable_endpoint_distance,
            });
        }
        Ok(())
    }
}

fn check_epsilon(name: &'static str, value: f64) -> Result<(), BspError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(BspError::InvalidEpsilon { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(BspConfig::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = BspConfig::from_json_str(
            r#"{ "vertex_welding_epsilon": 0.01, "split_weights": { "split_score_factor": 7 } }"#,
        )
        .unwrap();

        assert_eq!(config.vertex_welding_epsilon, 0.01);
        assert_eq!(config.punishable_endpoint_distance, DEFAULT_PUNISHABLE_ENDPOINT_DISTANCE);
        assert_eq!(config.split_weights.split_score_factor, 7);
        assert_eq!(
            config.split_weights.near_endpoint_split_score,
            SplitWeights::default().near_endpoint_split_score
        );
        assert_eq!(config.axis_alignment, AxisAlignmentPolicy::PenalizeDiagonal);
    }

    #[test]
    fn test_axis_policy_from_json() {
        let config = BspConfig::from_json_str(r#"{ "axis_alignment": "penalize_axis_aligned" }"#).unwrap();
        assert_eq!(config.axis_alignment, AxisAlignmentPolicy::PenalizeAxisAligned);
        assert!(config.axis_alignment.is_penalized(true));
        assert!(!config.axis_alignment.is_penalized(false));
    }

    #[test]
    fn test_rejects_inverted_epsilons() {
        let err = BspConfig::from_json_str(
            r#"{ "vertex_welding_epsilon": 0.5, "punishable_endpoint_distance": 0.1 }"#,
        )
        .unwrap_err();
        assert!(matches!(err, BspError::EpsilonOrder { .. }));
    }

    #[test]
    fn test_rejects_negative_epsilon() {
        let config = BspConfig {
            geometry_epsilon: -1.0,
            ..BspConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(BspError::InvalidEpsilon { name: "geometry_epsilon", .. })
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(BspConfig::from_json_str("{ nope"), Err(BspError::Json(_))));
    }
}
