// src/bsp/segment.rs

use serde::{Deserialize, Serialize};

use crate::utils::util::is_zero;
use crate::utils::Point2D;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SegmentDirection {
    Horizontal,
    Vertical,
    Other,
}

impl SegmentDirection {
    pub fn from_delta(delta: Point2D, epsilon: f64) -> Self {
        if is_zero(delta.x, epsilon) {
            SegmentDirection::Vertical
        } else if is_zero(delta.y, epsilon) {
            SegmentDirection::Horizontal
        } else {
            SegmentDirection::Other
        }
    }
}

/// An oriented segment in the working set of a BSP partition step.
///
/// Vertex indices identify shared endpoints; the coordinates are a copy of
/// the vertex positions at creation time. A segment without a `line_id` is a
/// miniseg created by an earlier split and is never used as a splitter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BspSegment {
    pub start_index: usize,
    pub end_index: usize,
    pub start: Point2D,
    pub end: Point2D,
    pub direction: SegmentDirection,
    pub line_id: Option<usize>,
}

impl BspSegment {
    /// Panics if both ends reference the same vertex.
    pub fn new(
        start_index: usize,
        end_index: usize,
        start: Point2D,
        end: Point2D,
        line_id: Option<usize>,
        epsilon: f64,
    ) -> Self {
        assert_ne!(
            start_index, end_index,
            "BSP segment cannot start and end on vertex {}",
            start_index
        );

        BspSegment {
            start_index,
            end_index,
            start,
            end,
            direction: SegmentDirection::from_delta(end - start, epsilon),
            line_id,
        }
    }

    pub fn is_miniseg(&self) -> bool {
        self.line_id.is_none()
    }

    pub fn is_axis_aligned(&self) -> bool {
        matches!(
            self.direction,
            SegmentDirection::Horizontal | SegmentDirection::Vertical
        )
    }

    pub fn delta(&self) -> Point2D {
        self.end - self.start
    }

    pub fn length(&self) -> f64 {
        self.delta().length()
    }

    /// Point at time `t`, where 0 is `start` and 1 is `end`. Works outside
    /// of `[0, 1]` as well.
    pub fn from_time(&self, t: f64) -> Point2D {
        self.start + self.delta() * t
    }

    /// Vertex pair with the smaller index first, so both orientations of an
    /// edge share a key.
    pub fn vertex_key(&self) -> (usize, usize) {
        edge_key(self.start_index, self.end_index)
    }
}

pub fn edge_key(a: usize, b: usize) -> (usize, usize) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;

    fn seg(x1: f64, y1: f64, x2: f64, y2: f64) -> BspSegment {
        BspSegment::new(0, 1, Point2D::new(x1, y1), Point2D::new(x2, y2), Some(0), 1e-6)
    }

    #[test]
    fn test_direction() {
        assert_eq!(seg(0.0, 0.0, 5.0, 0.0).direction, SegmentDirection::Horizontal);
        assert_eq!(seg(0.0, 0.0, 0.0, -5.0).direction, SegmentDirection::Vertical);
        assert_eq!(seg(0.0, 0.0, 5.0, 3.0).direction, SegmentDirection::Other);
        assert!(seg(0.0, 0.0, 5.0, 0.0).is_axis_aligned());
        assert!(!seg(0.0, 0.0, 5.0, 3.0).is_axis_aligned());
    }

    #[test]
    fn test_from_time_extends_past_endpoints() {
        let s = seg(0.0, 0.0, 10.0, 0.0);
        assert_eq!(s.from_time(0.5), Point2D::new(5.0, 0.0));
        assert_eq!(s.from_time(1.5), Point2D::new(15.0, 0.0));
        assert_eq!(s.from_time(-1.0), Point2D::new(-10.0, 0.0));
        assert_approx_eq!(s.length(), 10.0);
    }

    #[test]
    fn test_miniseg() {
        let s = BspSegment::new(3, 1, Point2D::new(0.0, 0.0), Point2D::new(1.0, 1.0), None, 1e-6);
        assert!(s.is_miniseg());
        assert_eq!(s.vertex_key(), (1, 3));
    }

    #[test]
    #[should_panic]
    fn test_rejects_self_loop() {
        BspSegment::new(2, 2, Point2D::new(0.0, 0.0), Point2D::new(1.0, 0.0), Some(0), 1e-6);
    }
}
