// src/bsp/bsp_util.rs
// Geometry predicates shared by the split scorer and the allocators.

use crate::bsp::BspSegment;
use crate::utils::util::is_zero;
use crate::utils::Point2D;

/// Which side of a directed line a point falls on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
    On,
}

/// Returns positive if the point is on the right (front) side of the line,
/// negative on the left (back) side, and near zero on the line itself.
pub fn classify_point(line: &BspSegment, point: &Point2D) -> f64 {
    let delta = line.delta();
    (delta.y * (point.x - line.start.x)) - (delta.x * (point.y - line.start.y))
}

pub fn side(line: &BspSegment, point: &Point2D, epsilon: f64) -> Side {
    let value = classify_point(line, point);
    if is_zero(value, epsilon) {
        Side::On
    } else if value > 0.0 {
        Side::Right
    } else {
        Side::Left
    }
}

pub fn parallel(a: &BspSegment, b: &BspSegment, epsilon: f64) -> bool {
    // dy1 / dx1 == dy2 / dx2, cross-multiplied so vertical lines need no
    // special case.
    let (da, db) = (a.delta(), b.delta());
    is_zero(da.y * db.x - da.x * db.y, epsilon)
}

/// Parallel and running along the same infinite line.
pub fn collinear(a: &BspSegment, b: &BspSegment, epsilon: f64) -> bool {
    if !parallel(a, b, epsilon) {
        return false;
    }

    let midpoint = (b.start + b.end) * 0.5;
    let delta = a.delta();
    let t = (midpoint - a.start).dot(&delta) / delta.dot(&delta);
    is_zero(midpoint.distance_to(&a.from_time(t)), epsilon)
}

/// Treats both segments as infinite lines and returns the time on `a` at
/// which it meets `b`, so `a.from_time(t)` lies on the line through `b`.
/// The time can fall outside `[0, 1]`. `None` means the lines are parallel.
pub fn intersect_as_line(a: &BspSegment, b: &BspSegment, epsilon: f64) -> Option<f64> {
    let (da, db) = (a.delta(), b.delta());
    let determinant = (-db.x * da.y) + (da.x * db.y);
    if is_zero(determinant, epsilon) {
        return None;
    }

    let start_delta = a.start - b.start;
    Some(((db.x * start_delta.y) - (db.y * start_delta.x)) / determinant)
}

/// Distance from `segment.from_time(t)` to the endpoint on the same half
/// of the segment.
pub fn nearest_endpoint_distance(segment: &BspSegment, t: f64) -> f64 {
    let endpoint = if t < 0.5 { segment.start } else { segment.end };
    endpoint.distance_to(&segment.from_time(t))
}

/// Side of `segment` relative to `splitter`, judged by its start point, or
/// by its end point when the start lies on the splitter.
///
/// Panics if both endpoints are on the splitter; callers must filter
/// collinear segments first.
pub fn effective_side(splitter: &BspSegment, segment: &BspSegment, epsilon: f64) -> Side {
    match side(splitter, &segment.start, epsilon) {
        Side::On => {
            let end_side = side(splitter, &segment.end, epsilon);
            assert!(
                end_side != Side::On,
                "segment {}-{} lies on the splitter, sides are undefined",
                segment.start_index,
                segment.end_index
            );
            end_side
        }
        start_side => start_side,
    }
}
