// src/bsp/mod.rs
pub mod adjacency;
pub mod allocator;
pub mod bsp_level;
pub mod bsp_util; // Geometric predicates shared by the pruner and scorer
pub mod chain_pruner;
pub mod config;
pub mod segment;
pub mod split_calculator;
pub mod splitter;

pub use adjacency::SegmentGraph;
pub use allocator::{SegmentAllocator, VertexAllocator};
pub use bsp_level::{BspLevel, PreparedLevel};
pub use bsp_util::Side;
pub use chain_pruner::{prune_chains, ChainPruner};
pub use config::{AxisAlignmentPolicy, BspConfig, SplitWeights};
pub use segment::{BspSegment, SegmentDirection};
pub use split_calculator::{score_splitter, tally_splitter, SplitTally, WORST_SCORE};
pub use splitter::{select_splitter, select_splitters_parallel, SplitterProgress, SplitterState, SplitterStep};
