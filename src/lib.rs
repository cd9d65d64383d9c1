// src/lib.rs

pub mod bsp;
pub mod error;
pub mod map;
pub mod utils;

pub use error::BspError;
