// src/bsp/adjacency.rs

use std::collections::HashMap;

use crate::bsp::segment::edge_key;
use crate::bsp::BspSegment;

/// Undirected multigraph over vertex indices, built from a segment list.
///
/// Vertices live in an arena of slots, each owning the list of neighbours it
/// is joined to. Vertex indices are mapped to slots on first sight, so sparse
/// or very large indices cost no more than dense ones. Edges also map back to
/// the positions (in the source list) of the segments that realize them.
#[derive(Debug, Default)]
pub struct SegmentGraph {
    slots: HashMap<usize, usize>,
    vertices: Vec<usize>,
    adjacency: Vec<Vec<usize>>,
    edges: HashMap<(usize, usize), Vec<usize>>,
    edge_count: usize,
}

impl SegmentGraph {
    pub fn from_segments(segments: &[BspSegment]) -> Self {
        let mut graph = SegmentGraph {
            edges: HashMap::with_capacity(segments.len()),
            ..SegmentGraph::default()
        };

        for (position, seg) in segments.iter().enumerate() {
            let start = graph.slot_for(seg.start_index);
            let end = graph.slot_for(seg.end_index);
            graph.adjacency[start].push(seg.end_index);
            graph.adjacency[end].push(seg.start_index);
            graph.edges.entry(seg.vertex_key()).or_default().push(position);
            graph.edge_count += 1;
        }

        graph
    }

    pub fn degree(&self, vertex: usize) -> usize {
        self.neighbors(vertex).len()
    }

    pub fn neighbors(&self, vertex: usize) -> &[usize] {
        self.slots
            .get(&vertex)
            .map(|&slot| self.adjacency[slot].as_slice())
            .unwrap_or(&[])
    }

    /// Vertices with exactly one incident edge, in ascending order.
    pub fn terminal_vertices(&self) -> Vec<usize> {
        let mut terminals: Vec<usize> = self
            .adjacency
            .iter()
            .zip(&self.vertices)
            .filter(|(neighbors, _)| neighbors.len() == 1)
            .map(|(_, &vertex)| vertex)
            .collect();
        terminals.sort_unstable();
        terminals
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Removes one edge between `a` and `b` and returns the position of the
    /// segment that realized it.
    ///
    /// Panics if no such edge is left; that means the caller's bookkeeping
    /// has drifted from the graph.
    pub fn remove_edge(&mut self, a: usize, b: usize) -> usize {
        let key = edge_key(a, b);
        let position = self
            .edges
            .get_mut(&key)
            .and_then(Vec::pop)
            .unwrap_or_else(|| panic!("no edge between vertices {} and {}", a, b));

        if self.edges.get(&key).is_some_and(Vec::is_empty) {
            self.edges.remove(&key);
        }

        let (slot_a, slot_b) = (self.slots[&a], self.slots[&b]);
        unlink(&mut self.adjacency[slot_a], b);
        unlink(&mut self.adjacency[slot_b], a);
        self.edge_count -= 1;
        position
    }

    fn slot_for(&mut self, vertex: usize) -> usize {
        if let Some(&slot) = self.slots.get(&vertex) {
            return slot;
        }
        let slot = self.vertices.len();
        self.slots.insert(vertex, slot);
        self.vertices.push(vertex);
        self.adjacency.push(Vec::new());
        slot
    }
}

fn unlink(neighbors: &mut Vec<usize>, vertex: usize) {
    let index = neighbors
        .iter()
        .position(|&n| n == vertex)
        .unwrap_or_else(|| panic!("adjacency list is missing vertex {}", vertex));
    neighbors.swap_remove(index);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Point2D;

    fn seg(a: usize, b: usize) -> BspSegment {
        BspSegment::new(
            a,
            b,
            Point2D::new(a as f64, 0.0),
            Point2D::new(b as f64, 1.0),
            Some(0),
            1e-6,
        )
    }

    #[test]
    fn test_degrees() {
        let graph = SegmentGraph::from_segments(&[seg(0, 1), seg(1, 2), seg(1, 3)]);
        assert_eq!(graph.degree(0), 1);
        assert_eq!(graph.degree(1), 3);
        assert_eq!(graph.degree(2), 1);
        assert_eq!(graph.degree(42), 0);
        assert_eq!(graph.terminal_vertices(), vec![0, 2, 3]);
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn test_remove_edge_returns_segment_position() {
        let mut graph = SegmentGraph::from_segments(&[seg(0, 1), seg(1, 2)]);
        assert_eq!(graph.remove_edge(2, 1), 1);
        assert_eq!(graph.degree(1), 1);
        assert_eq!(graph.degree(2), 0);
        assert_eq!(graph.neighbors(1), &[0]);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn test_multi_edges_are_removed_one_at_a_time() {
        let mut graph = SegmentGraph::from_segments(&[seg(0, 1), seg(1, 0)]);
        assert_eq!(graph.degree(0), 2);

        let first = graph.remove_edge(0, 1);
        let second = graph.remove_edge(1, 0);
        assert_ne!(first, second);
        assert_eq!(graph.degree(0), 0);
        assert_eq!(graph.degree(1), 0);
    }

    #[test]
    fn test_sparse_vertex_indices() {
        let far = 1 << 40;
        let mut graph = SegmentGraph::from_segments(&[seg(usize::MAX, far), seg(far, 7)]);
        assert_eq!(graph.degree(far), 2);
        assert_eq!(graph.degree(usize::MAX), 1);
        assert_eq!(graph.degree(8), 0);
        assert_eq!(graph.terminal_vertices(), vec![7, usize::MAX]);

        assert_eq!(graph.remove_edge(far, usize::MAX), 0);
        assert_eq!(graph.neighbors(far), &[7]);
        assert_eq!(graph.terminal_vertices(), vec![7, far]);
    }

    #[test]
    #[should_panic]
    fn test_remove_missing_edge_panics() {
        let mut graph = SegmentGraph::from_segments(&[seg(0, 1)]);
        graph.remove_edge(0, 2);
    }
}
