// src/map/vertex.rs
use serde::{Deserialize, Serialize};

use crate::utils::Point2D;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub raw_x: i32,
    pub raw_y: i32,
}

impl Vertex {
    pub fn new(raw_x: i32, raw_y: i32) -> Self {
        Vertex { raw_x, raw_y }
    }

    pub fn position(&self) -> Point2D {
        Point2D::new(self.raw_x as f64, self.raw_y as f64)
    }
}
