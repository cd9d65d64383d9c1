// src/bsp/splitter.rs

use log::{debug, trace};
use rayon::prelude::*;

use crate::bsp::split_calculator::{score_splitter, WORST_SCORE};
use crate::bsp::{BspConfig, BspSegment};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplitterState {
    /// Segments assigned, nothing evaluated yet.
    Loaded,
    Working,
    Finished,
}

/// Result of one [`SplitterProgress::step`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SplitterStep {
    /// A candidate was scored and more remain.
    Working { index: usize, score: i64 },
    /// Every candidate has been scored. `None` means no segment partitions
    /// the set.
    Done(Option<BspSegment>),
}

/// Incremental splitter search over one node's working set.
///
/// One instance serves one partition step of the tree builder. The builder
/// calls [`step`](Self::step) as often as its time budget allows and reads
/// the best splitter once the search is finished. Ties keep the earliest
/// candidate, since the best is only replaced on a strict improvement.
#[derive(Debug)]
pub struct SplitterProgress {
    config: BspConfig,
    state: SplitterState,
    segments: Vec<BspSegment>,
    current_index: usize,
    current_score: i64,
    best_score: i64,
    best_index: Option<usize>,
}

impl SplitterProgress {
    pub fn new(config: BspConfig, segments: Vec<BspSegment>) -> Self {
        let mut progress = SplitterProgress {
            config,
            state: SplitterState::Loaded,
            segments: Vec::new(),
            current_index: 0,
            current_score: WORST_SCORE,
            best_score: WORST_SCORE,
            best_index: None,
        };
        progress.load(segments);
        progress
    }

    /// Replaces the working set and resets all progress.
    ///
    /// Panics if `segments` is empty.
    pub fn load(&mut self, segments: Vec<BspSegment>) {
        assert!(
            !segments.is_empty(),
            "cannot do BSP split calculations on an empty segment list"
        );

        self.segments = segments;
        self.state = SplitterState::Loaded;
        self.current_index = 0;
        self.current_score = WORST_SCORE;
        self.best_score = WORST_SCORE;
        self.best_index = None;
    }

    /// Scores the next candidate.
    ///
    /// Panics when called after the search has finished.
    pub fn step(&mut self) -> SplitterStep {
        assert!(
            self.state != SplitterState::Finished,
            "trying to step a splitter search that is finished"
        );
        assert!(
            self.current_index < self.segments.len(),
            "splitter index {} out of range ({} segments)",
            self.current_index,
            self.segments.len()
        );

        let index = self.current_index;
        let splitter = &self.segments[index];
        self.current_score = if splitter.is_miniseg() {
            WORST_SCORE
        } else {
            score_splitter(splitter, &self.segments, &self.config)
        };
        trace!("splitter candidate {} scored {}", index, self.current_score);

        if self.current_score < self.best_score {
            assert!(!splitter.is_miniseg(), "a miniseg must never be the splitter");
            self.best_score = self.current_score;
            self.best_index = Some(index);
        }

        self.current_index += 1;
        if self.current_index < self.segments.len() {
            self.state = SplitterState::Working;
            SplitterStep::Working {
                index,
                score: self.current_score,
            }
        } else {
            self.state = SplitterState::Finished;
            debug!(
                "splitter search over {} segments finished, best score {}",
                self.segments.len(),
                self.best_score
            );
            SplitterStep::Done(self.best_splitter().copied())
        }
    }

    /// Steps until finished and returns the winning splitter, if any.
    pub fn run_to_completion(&mut self) -> Option<BspSegment> {
        while self.state != SplitterState::Finished {
            if let SplitterStep::Done(best) = self.step() {
                return best;
            }
        }
        self.best_splitter().copied()
    }

    pub fn state(&self) -> SplitterState {
        self.state
    }

    pub fn segments(&self) -> &[BspSegment] {
        &self.segments
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Score of the candidate evaluated by the last step.
    pub fn current_score(&self) -> i64 {
        self.current_score
    }

    pub fn best_score(&self) -> i64 {
        self.best_score
    }

    pub fn best_index(&self) -> Option<usize> {
        self.best_index
    }

    pub fn best_splitter(&self) -> Option<&BspSegment> {
        self.best_index.map(|index| &self.segments[index])
    }
}

/// Scores a whole working set at once and returns the index and score of
/// the best splitter. Agrees with stepping a [`SplitterProgress`] to the
/// end, including the earliest-wins tie rule.
pub fn select_splitter(segments: &[BspSegment], config: &BspConfig) -> Option<(usize, i64)> {
    segments
        .iter()
        .enumerate()
        .filter(|(_, seg)| !seg.is_miniseg())
        .map(|(index, seg)| (index, score_splitter(seg, segments, config)))
        .filter(|&(_, score)| score < WORST_SCORE)
        .min_by_key(|&(index, score)| (score, index))
}

/// Picks splitters for many independent nodes on the rayon pool.
///
/// Nodes of the same tree depth share no state, so each working set is
/// searched on its own task. Output order matches `work_sets`.
pub fn select_splitters_parallel(
    work_sets: &[Vec<BspSegment>],
    config: &BspConfig,
) -> Vec<Option<BspSegment>> {
    work_sets
        .par_iter()
        .map(|segments| {
            if segments.is_empty() {
                return None;
            }
            select_splitter(segments, config).map(|(index, _)| segments[index])
        })
        .collect()
}
