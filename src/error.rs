// src/error.rs
//! Recoverable errors at the crate boundary.
//!
//! Only input that comes from outside the pipeline (config files, map data)
//! is reported through [`BspError`]. Broken internal bookkeeping, such as
//! stepping a finished splitter or pruning a segment twice, panics instead.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BspError {
    #[error("{name} must be finite and non-negative, got {value}")]
    InvalidEpsilon { name: &'static str, value: f64 },

    #[error("vertex welding epsilon ({welding}) must not exceed the punishable endpoint distance ({punishable})")]
    EpsilonOrder { welding: f64, punishable: f64 },

    #[error("linedef {linedef} references missing vertex {vertex}")]
    InvalidVertexIndex { linedef: usize, vertex: usize },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
}
