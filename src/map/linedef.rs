// src/map/linedef.rs
use serde::{Deserialize, Serialize};

/// A map line between two vertices, referenced by index into the level's
/// vertex list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineDef {
    pub start: usize,
    pub end: usize,
}

impl LineDef {
    pub fn new(start: usize, end: usize) -> Self {
        LineDef { start, end }
    }
}
