// src/bsp/allocator.rs

use std::collections::HashMap;

use crate::bsp::segment::edge_key;
use crate::bsp::BspSegment;
use crate::utils::Point2D;

/// Hands out stable vertex indices, welding points that are closer than the
/// welding epsilon onto the vertex that was allocated first.
#[derive(Debug)]
pub struct VertexAllocator {
    weld_epsilon: f64,
    cell_size: f64,
    positions: Vec<Point2D>,
    grid: HashMap<(i64, i64), Vec<usize>>,
}

impl VertexAllocator {
    pub fn new(weld_epsilon: f64) -> Self {
        VertexAllocator {
            weld_epsilon,
            // A zero epsilon still needs a usable bucket size.
            cell_size: weld_epsilon.max(f64::EPSILON),
            positions: Vec::new(),
            grid: HashMap::new(),
        }
    }

    /// Index of the vertex at (or welded onto) `point`.
    pub fn get_or_insert(&mut self, point: Point2D) -> usize {
        if let Some(index) = self.find(point) {
            return index;
        }

        let index = self.positions.len();
        self.positions.push(point);
        self.grid.entry(self.cell_of(point)).or_default().push(index);
        index
    }

    /// Looks for an existing vertex strictly closer than the welding epsilon,
    /// the same boundary the split scorer uses for welded cuts.
    pub fn find(&self, point: Point2D) -> Option<usize> {
        let (cx, cy) = self.cell_of(point);
        let mut best: Option<(usize, f64)> = None;

        for dx in -1..=1 {
            for dy in -1..=1 {
                let Some(bucket) = self.grid.get(&(cx + dx, cy + dy)) else {
                    continue;
                };
                for &index in bucket {
                    let distance = self.positions[index].distance_to(&point);
                    let closer = best.map_or(true, |(_, d)| distance < d);
                    if distance < self.weld_epsilon && closer {
                        best = Some((index, distance));
                    }
                }
            }
        }

        best.map(|(index, _)| index)
    }

    pub fn position(&self, index: usize) -> Point2D {
        self.positions[index]
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    fn cell_of(&self, point: Point2D) -> (i64, i64) {
        (
            (point.x / self.cell_size).floor() as i64,
            (point.y / self.cell_size).floor() as i64,
        )
    }
}

/// Owns every segment created for a map and guarantees at most one segment
/// per unordered vertex pair.
#[derive(Debug)]
pub struct SegmentAllocator {
    vertices: VertexAllocator,
    geometry_epsilon: f64,
    segments: Vec<BspSegment>,
    table: HashMap<(usize, usize), usize>,
}

impl SegmentAllocator {
    pub fn new(vertices: VertexAllocator, geometry_epsilon: f64) -> Self {
        SegmentAllocator {
            vertices,
            geometry_epsilon,
            segments: Vec::new(),
            table: HashMap::new(),
        }
    }

    pub fn vertices(&self) -> &VertexAllocator {
        &self.vertices
    }

    pub fn vertices_mut(&mut self) -> &mut VertexAllocator {
        &mut self.vertices
    }

    /// Returns the segment between two allocated vertices, creating it on
    /// first use. A pair seen before returns the existing segment, whichever
    /// way round it was created. Passing `None` as `line_id` makes a miniseg.
    pub fn get_or_create(&mut self, start: usize, end: usize, line_id: Option<usize>) -> usize {
        assert_ne!(start, end, "cannot create a segment that is a point");
        assert!(
            start < self.vertices.len() && end < self.vertices.len(),
            "segment vertex {}-{} out of range",
            start,
            end
        );

        if let Some(&index) = self.table.get(&edge_key(start, end)) {
            return index;
        }

        let index = self.segments.len();
        self.segments.push(BspSegment::new(
            start,
            end,
            self.vertices.position(start),
            self.vertices.position(end),
            line_id,
            self.geometry_epsilon,
        ));
        self.table.insert(edge_key(start, end), index);
        index
    }

    pub fn contains(&self, start: usize, end: usize) -> bool {
        self.table.contains_key(&edge_key(start, end))
    }

    /// Splits segment `index` at time `t` (strictly inside the segment) and
    /// returns the two halves, which keep the original line and orientation.
    pub fn split(&mut self, index: usize, t: f64) -> (usize, usize) {
        assert!(
            t > 0.0 && t < 1.0,
            "splitting a segment out of range or at an endpoint (t = {})",
            t
        );

        let seg = self.segments[index];
        let middle = self.vertices.get_or_insert(seg.from_time(t));
        let first = self.get_or_create(seg.start_index, middle, seg.line_id);
        let second = self.get_or_create(middle, seg.end_index, seg.line_id);
        (first, second)
    }

    pub fn get(&self, index: usize) -> &BspSegment {
        &self.segments[index]
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn to_vec(&self) -> Vec<BspSegment> {
        self.segments.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertices_within_epsilon_are_welded() {
        let mut vertices = VertexAllocator::new(0.01);
        let a = vertices.get_or_insert(Point2D::new(1.0, 1.0));
        let b = vertices.get_or_insert(Point2D::new(1.004, 0.997));
        let c = vertices.get_or_insert(Point2D::new(1.5, 1.0));

        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(vertices.len(), 2);
        assert_eq!(vertices.position(a), Point2D::new(1.0, 1.0));
    }

    #[test]
    fn test_weld_across_grid_cells() {
        let mut vertices = VertexAllocator::new(0.5);
        let a = vertices.get_or_insert(Point2D::new(0.49, 0.49));
        // Lands in the neighbouring bucket.
        let b = vertices.get_or_insert(Point2D::new(0.51, 0.51));
        assert_eq!(a, b);
    }

    #[test]
    fn test_segments_are_deduplicated_by_pair() {
        let mut vertices = VertexAllocator::new(0.005);
        let v0 = vertices.get_or_insert(Point2D::new(0.0, 0.0));
        let v1 = vertices.get_or_insert(Point2D::new(8.0, 0.0));
        let mut segments = SegmentAllocator::new(vertices, 1e-6);

        let forward = segments.get_or_create(v0, v1, Some(3));
        let backward = segments.get_or_create(v1, v0, Some(9));

        assert_eq!(forward, backward);
        assert_eq!(segments.len(), 1);
        assert!(segments.contains(v1, v0));
        assert_eq!(segments.get(forward).line_id, Some(3));
    }

    #[test]
    fn test_split_keeps_line_and_welds_middle() {
        let mut vertices = VertexAllocator::new(0.005);
        let v0 = vertices.get_or_insert(Point2D::new(0.0, 0.0));
        let v1 = vertices.get_or_insert(Point2D::new(8.0, 0.0));
        let mut segments = SegmentAllocator::new(vertices, 1e-6);
        let whole = segments.get_or_create(v0, v1, Some(1));

        let (first, second) = segments.split(whole, 0.25);
        let (first, second) = (*segments.get(first), *segments.get(second));

        assert_eq!(first.start_index, v0);
        assert_eq!(first.end, Point2D::new(2.0, 0.0));
        assert_eq!(second.start_index, first.end_index);
        assert_eq!(second.end_index, v1);
        assert_eq!(first.line_id, Some(1));
        assert_eq!(second.line_id, Some(1));

        // Splitting the same spot again reuses the welded vertex and halves.
        let again = segments.split(whole, 0.2501);
        assert_eq!(segments.get(again.0).end_index, first.end_index);
        assert_eq!(segments.len(), 3);
    }

    #[test]
    fn test_split_exactly_at_weld_distance_makes_a_new_vertex() {
        use crate::bsp::{tally_splitter, BspConfig};
        use crate::bsp::bsp_util::{intersect_as_line, nearest_endpoint_distance};

        let config = BspConfig::default();
        let mut vertices = VertexAllocator::new(config.vertex_welding_epsilon);
        let v0 = vertices.get_or_insert(Point2D::new(0.0, 0.0));
        let v1 = vertices.get_or_insert(Point2D::new(1.0, 0.0));
        let v2 = vertices.get_or_insert(Point2D::new(0.005, -1.0));
        let v3 = vertices.get_or_insert(Point2D::new(0.005, 1.0));
        let mut segments = SegmentAllocator::new(vertices, config.geometry_epsilon);
        let target = segments.get_or_create(v0, v1, Some(0));
        let splitter = segments.get_or_create(v2, v3, Some(1));

        let working = segments.to_vec();
        let tally = tally_splitter(&working[splitter], &working, &config);
        assert_eq!(tally.splits, 1);

        let t = intersect_as_line(&working[target], &working[splitter], config.geometry_epsilon).unwrap();
        assert_eq!(nearest_endpoint_distance(&working[target], t), config.vertex_welding_epsilon);

        // The scorer counted a true split, so the allocator must not weld it.
        let (first, second) = segments.split(target, t);
        let middle = segments.get(first).end_index;
        assert_ne!(middle, v0);
        assert_eq!(segments.get(second).start_index, middle);
        assert_eq!(segments.vertices().len(), 5);
    }

    #[test]
    #[should_panic]
    fn test_split_at_endpoint_panics() {
        let mut vertices = VertexAllocator::new(0.005);
        let v0 = vertices.get_or_insert(Point2D::new(0.0, 0.0));
        let v1 = vertices.get_or_insert(Point2D::new(1.0, 0.0));
        let mut segments = SegmentAllocator::new(vertices, 1e-6);
        let whole = segments.get_or_create(v0, v1, None);
        segments.split(whole, 1.0);
    }
}
