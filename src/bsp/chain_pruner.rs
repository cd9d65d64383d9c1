// src/bsp/chain_pruner.rs
//! Removes dangling chains before BSP building.
//!
//! The segments are turned into a vertex graph. Every vertex with a single
//! connection is the tail of a chain; the chain is cut away one segment at a
//! time until the walk reaches a junction (a vertex that still has two or
//! more connections once the chain's edge is gone) or runs out of edges at
//! the far end. Walking continues through vertices that drop to a single
//! connection, so the result is a fixed point: pruning it again removes
//! nothing.

use std::borrow::Cow;
use std::collections::{BTreeSet, HashSet};

use log::debug;

use crate::bsp::adjacency::SegmentGraph;
use crate::bsp::BspSegment;

#[derive(Debug, Default)]
pub struct ChainPruner {
    graph: SegmentGraph,
    /// Positions (in the list given to `prune`) of the removed segments.
    pruned: HashSet<usize>,
    terminal_tails: BTreeSet<usize>,
}

impl ChainPruner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `segments` without any segment on a dangling chain. When
    /// nothing is pruned the input slice is handed back borrowed.
    ///
    /// Panics on an empty list.
    pub fn prune<'a>(&mut self, segments: &'a [BspSegment]) -> Cow<'a, [BspSegment]> {
        assert!(!segments.is_empty(), "cannot prune an empty segment list");

        self.graph = SegmentGraph::from_segments(segments);
        self.pruned.clear();
        self.terminal_tails = self.graph.terminal_vertices().into_iter().collect();

        self.remove_all_terminal_chains();

        if self.pruned.is_empty() {
            return Cow::Borrowed(segments);
        }

        debug!("BSP builder pruned {} dangling segments", self.pruned.len());
        Cow::Owned(
            segments
                .iter()
                .enumerate()
                .filter(|(position, _)| !self.pruned.contains(position))
                .map(|(_, seg)| *seg)
                .collect(),
        )
    }

    /// Positions of the segments removed by the last `prune` call.
    pub fn pruned_positions(&self) -> Vec<usize> {
        let mut positions: Vec<usize> = self.pruned.iter().copied().collect();
        positions.sort_unstable();
        positions
    }

    pub fn pruned_count(&self) -> usize {
        self.pruned.len()
    }

    fn remove_all_terminal_chains(&mut self) {
        while let Some(tail) = self.terminal_tails.pop_first() {
            let (ending, double_ended) = self.remove_terminal_chain(tail);
            if double_ended {
                self.terminal_tails.remove(&ending);
            }
        }
    }

    fn remove_terminal_chain(&mut self, tail: usize) -> (usize, bool) {
        assert_eq!(
            self.graph.degree(tail),
            1,
            "vertex {} is not the tail of a terminal chain",
            tail
        );

        let mut current = tail;
        let mut next = self.graph.neighbors(tail)[0];
        assert_ne!(next, tail, "terminal chain at vertex {} references itself", tail);

        loop {
            self.prune_segment(current, next);

            match self.graph.degree(next) {
                0 => return (next, true),
                1 => {
                    let after = self.graph.neighbors(next)[0];
                    current = next;
                    next = after;
                }
                _ => return (next, false),
            }
        }
    }

    fn prune_segment(&mut self, current: usize, next: usize) {
        let position = self.graph.remove_edge(current, next);
        let newly_pruned = self.pruned.insert(position);
        assert!(newly_pruned, "segment {} was already pruned", position);
    }
}

/// Convenience wrapper around a fresh [`ChainPruner`].
pub fn prune_chains(segments: &[BspSegment]) -> Cow<'_, [BspSegment]> {
    ChainPruner::new().prune(segments)
}
