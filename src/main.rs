#![warn(non_snake_case)]
//! # rust_ed_bsp
//!
//! Runs the BSP preprocessing pipeline on a map stored as JSON and reports
//! what the tree builder would start from: how many segments survive chain
//! pruning and which one becomes the root splitter.
//!
//! ```text
//! rust_ed_bsp <map.json> [config.json]
//! ```
//!
//! Set `RUST_LOG=debug` to see the pruner and splitter search at work.

use std::error::Error;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use log::{error, info};

use rust_ed_bsp::bsp::{BspConfig, BspLevel};
use rust_ed_bsp::map::MapLevel;

#[derive(Parser)]
#[command(name = "rust_ed_bsp")]
#[command(about = "Prune dangling chains and pick the root BSP splitter of a map")]
struct Cli {
    /// Map geometry as JSON (vertices and linedefs)
    map: PathBuf,

    /// Optional BSP config as JSON; missing fields take their defaults
    config: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn Error>> {
    // Initialize logging.
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => BspConfig::from_json_file(path)?,
        None => BspConfig::default(),
    };
    let map = MapLevel::from_json_file(&cli.map)?;
    info!(
        "loaded {} vertices and {} linedefs from {}",
        map.vertices.len(),
        map.linedefs.len(),
        cli.map.display()
    );

    let level = BspLevel::new(Arc::new(map), config);
    let prepared = match level.prepare() {
        Ok(prepared) => prepared,
        Err(e) => {
            error!("BSP preprocessing failed: {}", e);
            return Err(e.into());
        }
    };

    println!("segments: {}", prepared.segments.len());
    println!("pruned:   {}", prepared.pruned.len());
    match (prepared.root_splitter, prepared.root_score) {
        (Some(splitter), Some(score)) => println!(
            "root splitter: vertices {} -> {} (line {:?}), score {}",
            splitter.start_index, splitter.end_index, splitter.line_id, score
        ),
        _ => println!("root splitter: none (nothing left to partition)"),
    }

    Ok(())
}
