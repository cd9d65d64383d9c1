// src/map/level.rs

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::BspError;
use crate::map::{LineDef, Vertex};

/// The finalized geometry of one map: vertices plus the lines joining them.
///
/// ```text
/// { "vertices": [{ "raw_x": 0, "raw_y": 0 }, { "raw_x": 64, "raw_y": 0 }],
///   "linedefs": [{ "start": 0, "end": 1 }] }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapLevel {
    pub vertices: Vec<Vertex>,
    pub linedefs: Vec<LineDef>,
}

impl MapLevel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a vertex and returns its index.
    pub fn add_vertex(&mut self, x: i32, y: i32) -> usize {
        self.vertices.push(Vertex::new(x, y));
        self.vertices.len() - 1
    }

    /// Adds a linedef between two vertices and returns its index.
    pub fn add_linedef(&mut self, start: usize, end: usize) -> usize {
        self.linedefs.push(LineDef::new(start, end));
        self.linedefs.len() - 1
    }

    /// Adds a closed polygon through the given points.
    pub fn add_polygon(&mut self, points: &[(i32, i32)]) {
        let first = self.vertices.len();
        for &(x, y) in points {
            self.add_vertex(x, y);
        }
        for i in 0..points.len() {
            self.add_linedef(first + i, first + (i + 1) % points.len());
        }
    }

    pub fn from_json_str(json: &str) -> Result<Self, BspError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, BspError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| BspError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }
}
