// src/bsp/split_calculator.rs

use crate::bsp::bsp_util::{self, Side};
use crate::bsp::{BspConfig, BspSegment};
use crate::utils::util::in_normal_range;

/// Score given to a splitter that does not partition anything.
pub const WORST_SCORE: i64 = i64::MAX;

/// What a splitter would do to the rest of the working set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplitTally {
    /// Segments that would be cut into two new pieces.
    pub splits: usize,
    pub left: usize,
    pub right: usize,
    /// Cuts landing near, but not welded onto, an endpoint.
    pub near_endpoint_hits: usize,
}

impl SplitTally {
    /// The splitter runs along a hull edge or touches nothing: no cuts and
    /// every other segment on one side.
    pub fn is_degenerate(&self) -> bool {
        self.splits == 0 && (self.left == 0 || self.right == 0)
    }

    fn count_side(&mut self, side: Side) {
        match side {
            Side::Right => self.right += 1,
            _ => self.left += 1,
        }
    }
}

/// Classifies every segment in `segments` against `splitter`.
///
/// The splitter itself is skipped by identity, so pass a reference into
/// `segments`. Collinear segments are neither counted nor split.
pub fn tally_splitter(splitter: &BspSegment, segments: &[BspSegment], config: &BspConfig) -> SplitTally {
    let epsilon = config.geometry_epsilon;
    let mut tally = SplitTally::default();

    for segment in segments {
        if std::ptr::eq(segment, splitter) {
            continue;
        }

        if bsp_util::parallel(splitter, segment, epsilon) {
            if !bsp_util::collinear(splitter, segment, epsilon) {
                tally.count_side(bsp_util::effective_side(splitter, segment, epsilon));
            }
            continue;
        }

        let t = bsp_util::intersect_as_line(segment, splitter, epsilon)
            .expect("non-parallel lines for split calculations must intersect");

        if !in_normal_range(t) {
            tally.count_side(bsp_util::effective_side(splitter, segment, epsilon));
            continue;
        }

        let distance = bsp_util::nearest_endpoint_distance(segment, t);
        if distance < config.vertex_welding_epsilon {
            tally.count_side(bsp_util::effective_side(splitter, segment, epsilon));
        } else {
            tally.splits += 1;
            if distance < config.punishable_endpoint_distance {
                tally.near_endpoint_hits += 1;
            }
        }
    }

    tally
}

/// Scores `splitter` against the working set. Lower is better;
/// [`WORST_SCORE`] means the splitter would not partition anything.
pub fn score_splitter(splitter: &BspSegment, segments: &[BspSegment], config: &BspConfig) -> i64 {
    let tally = tally_splitter(splitter, segments, config);
    score_tally(splitter, &tally, config)
}

pub fn score_tally(splitter: &BspSegment, tally: &SplitTally, config: &BspConfig) -> i64 {
    if tally.is_degenerate() {
        return WORST_SCORE;
    }

    let weights = &config.split_weights;
    let mut score: i64 = 0;

    if config.axis_alignment.is_penalized(splitter.is_axis_aligned()) {
        score = score.saturating_add(weights.not_axis_aligned_score);
    }

    let imbalance = tally.left.abs_diff(tally.right) as i64;
    score = score
        .saturating_add(weights.near_endpoint_split_score.saturating_mul(tally.near_endpoint_hits as i64))
        .saturating_add(weights.left_right_split_imbalance_score.saturating_mul(imbalance))
        .saturating_add(weights.split_score_factor.saturating_mul(tally.splits as i64));

    score
}
