//! Tilecomp composites a folder of tile graphics onto a shared background image.
//!
//! The pipeline is a single sequential batch:
//!
//! 1. Load the background once.
//! 2. For each `.png` in the tile directory: decode, resize, alpha-blend onto a
//!    clean copy of the background, save as `combined_<name>.png`.
//!
//! Per-file failures are recovered into [`TileOutcome`] values so one bad input
//! never aborts the batch; only the background/config tier is fatal.
#![forbid(unsafe_code)]

pub mod assets;
pub mod composite;
pub mod config;
pub mod error;
pub mod pipeline;

pub use composite::{
    Rgba8, blend_tile_over, over, over_rows_in_place, paste_position, scaled_tile_size,
};
pub use config::{CombineConfig, OUTPUT_PREFIX};
pub use error::{TilecompError, TilecompResult};
pub use pipeline::{TileOutcome, combine_tiles};
