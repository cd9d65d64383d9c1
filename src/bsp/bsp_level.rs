// src/bsp/bsp_level.rs

use std::sync::Arc;

use log::{debug, info, warn};

use crate::bsp::{BspConfig, BspSegment, ChainPruner, SegmentAllocator, SplitterProgress, VertexAllocator};
use crate::error::BspError;
use crate::map::MapLevel;

/// Output of [`BspLevel::prepare`]: the working set handed to the tree
/// builder, plus what was removed and the splitter for the root node.
#[derive(Debug)]
pub struct PreparedLevel {
    /// Segments that survived pruning, in allocation order.
    pub segments: Vec<BspSegment>,
    /// Segments removed as dangling chains.
    pub pruned: Vec<BspSegment>,
    pub root_splitter: Option<BspSegment>,
    pub root_score: Option<i64>,
    /// Allocator that created the segments, kept for the builder's splits.
    pub allocator: SegmentAllocator,
}

pub struct BspLevel {
    map: Arc<MapLevel>,
    config: BspConfig,
}

impl BspLevel {
    pub fn new(map: Arc<MapLevel>, config: BspConfig) -> Self {
        BspLevel { map, config }
    }

    pub fn config(&self) -> &BspConfig {
        &self.config
    }

    /// Runs the preprocessing pipeline: segment creation, chain pruning and
    /// the root splitter search.
    pub fn prepare(&self) -> Result<PreparedLevel, BspError> {
        self.config.validate()?;

        // 1. Create segments from linedefs, welding shared vertices.
        let allocator = self.create_initial_segs()?;
        let initial = allocator.to_vec();

        if initial.is_empty() {
            warn!("map has no usable linedefs, nothing to partition");
            return Ok(PreparedLevel {
                segments: Vec::new(),
                pruned: Vec::new(),
                root_splitter: None,
                root_score: None,
                allocator,
            });
        }

        // 2. Strip dangling chains.
        let mut pruner = ChainPruner::new();
        let segments = pruner.prune(&initial).into_owned();
        let pruned: Vec<BspSegment> = pruner
            .pruned_positions()
            .into_iter()
            .map(|position| initial[position])
            .collect();

        // 3. Choose the root splitter.
        let (root_splitter, root_score) = if segments.is_empty() {
            (None, None)
        } else {
            let mut progress = SplitterProgress::new(self.config, segments.clone());
            let best = progress.run_to_completion();
            (best, best.map(|_| progress.best_score()))
        };

        info!(
            "prepared {} segments ({} pruned), root splitter {}",
            segments.len(),
            pruned.len(),
            match &root_splitter {
                Some(seg) => format!("{}-{}", seg.start_index, seg.end_index),
                None => "none".to_string(),
            }
        );

        Ok(PreparedLevel {
            segments,
            pruned,
            root_splitter,
            root_score,
            allocator,
        })
    }

    /// Builds one segment per distinct linedef. Lines that collapse to a
    /// point after welding are skipped.
    pub fn create_initial_segs(&self) -> Result<SegmentAllocator, BspError> {
        let vertices = VertexAllocator::new(self.config.vertex_welding_epsilon);
        let mut allocator = SegmentAllocator::new(vertices, self.config.geometry_epsilon);

        for (line_id, linedef) in self.map.linedefs.iter().enumerate() {
            let lookup = |vertex: usize| {
                self.map
                    .vertices
                    .get(vertex)
                    .ok_or(BspError::InvalidVertexIndex { linedef: line_id, vertex })
            };
            let start = lookup(linedef.start)?.position();
            let end = lookup(linedef.end)?.position();

            let start_index = allocator.vertices_mut().get_or_insert(start);
            let end_index = allocator.vertices_mut().get_or_insert(end);
            if start_index == end_index {
                warn!("skipping zero length linedef {}", line_id);
                continue;
            }

            if allocator.contains(start_index, end_index) {
                debug!("linedef {} overlaps an earlier line, reusing its segment", line_id);
            }
            allocator.get_or_create(start_index, end_index, Some(line_id));
        }

        Ok(allocator)
    }
}
