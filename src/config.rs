use std::path::PathBuf;

use crate::error::{TilecompError, TilecompResult};

/// Prefix prepended to every output file name.
pub const OUTPUT_PREFIX: &str = "combined_";

/// Tile size relative to the background.
pub const DEFAULT_SCALE: f64 = 0.63;

/// Horizontal shift of the centered paste position (negative = left).
pub const DEFAULT_OFFSET_X: i32 = -10;

/// Vertical shift of the centered paste position (negative = up).
pub const DEFAULT_OFFSET_Y: i32 = 15;

/// Inputs and placement constants for one batch run.
///
/// There is no runtime configuration surface; callers either take
/// [`CombineConfig::default`] or build the struct directly.
#[derive(Clone, Debug)]
pub struct CombineConfig {
    /// Shared background image (PNG expected), loaded once per run.
    pub background_path: PathBuf,
    /// Directory scanned (non-recursively) for `.png` tiles.
    pub tiles_dir: PathBuf,
    /// Output directory, created if absent.
    pub output_dir: PathBuf,
    /// Tile size relative to the background, in `(0, 1]`.
    pub scale: f64,
    /// Horizontal offset from the centered position, in pixels.
    pub offset_x: i32,
    /// Vertical offset from the centered position, in pixels.
    pub offset_y: i32,
}

impl Default for CombineConfig {
    fn default() -> Self {
        Self {
            background_path: PathBuf::from("assets/background.png"),
            tiles_dir: PathBuf::from("assets/tiles"),
            output_dir: PathBuf::from("output"),
            scale: DEFAULT_SCALE,
            offset_x: DEFAULT_OFFSET_X,
            offset_y: DEFAULT_OFFSET_Y,
        }
    }
}

impl CombineConfig {
    /// Reject configurations the batch cannot run with.
    ///
    /// Offsets are unrestricted: out-of-bounds paste positions clip rather
    /// than error.
    pub fn validate(&self) -> TilecompResult<()> {
        if !self.scale.is_finite() || self.scale <= 0.0 || self.scale > 1.0 {
            return Err(TilecompError::validation(format!(
                "scale must be in (0, 1], got {}",
                self.scale
            )));
        }
        Ok(())
    }
}
