// src/map/mod.rs
pub mod level;
pub mod linedef;
pub mod vertex;

pub use level::MapLevel;
pub use linedef::LineDef;
pub use vertex::Vertex;
