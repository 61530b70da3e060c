use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use image::{RgbaImage, imageops};

use crate::{
    assets::{is_png_name, load_rgba8},
    composite::{blend_tile_over, paste_position, scaled_tile_size},
    config::{CombineConfig, OUTPUT_PREFIX},
    error::TilecompResult,
};

/// Result of one tile file in a batch.
///
/// Failures are recorded here instead of propagating, so a bad input never
/// aborts the rest of the scan.
#[derive(Debug)]
pub struct TileOutcome {
    /// File name of the input tile, as listed in the directory.
    pub file_name: String,
    /// Path of the written composite, or why this file was skipped.
    pub result: TilecompResult<PathBuf>,
}

/// Composite every `.png` tile in `config.tiles_dir` onto the background.
///
/// The background is loaded once and cloned per tile; each output is
/// `output_dir/combined_<name>` with the tile resized to
/// `floor(background * scale)` and blended at the centered, offset position.
///
/// Returns one [`TileOutcome`] per qualifying directory entry, in
/// directory-listing order (OS-dependent). Only the batch-level tier is
/// fatal: invalid config, output directory creation, background load, or the
/// directory scan itself.
#[tracing::instrument(skip(config), fields(tiles_dir = %config.tiles_dir.display()))]
pub fn combine_tiles(config: &CombineConfig) -> TilecompResult<Vec<TileOutcome>> {
    config.validate()?;

    fs::create_dir_all(&config.output_dir).with_context(|| {
        format!(
            "create output dir '{}'",
            config.output_dir.display()
        )
    })?;

    let background = load_rgba8(&config.background_path)?;
    let (bg_w, bg_h) = background.dimensions();

    // The tile size and paste position are fixed by the background and the
    // config, so they are computed once for the whole batch.
    let (tile_w, tile_h) = scaled_tile_size(bg_w, bg_h, config.scale);
    let (px, py) = paste_position(
        (bg_w, bg_h),
        (tile_w, tile_h),
        (config.offset_x, config.offset_y),
    );

    let entries = fs::read_dir(&config.tiles_dir)
        .with_context(|| format!("read tile dir '{}'", config.tiles_dir.display()))?;

    let mut outcomes = Vec::new();
    for entry in entries {
        let entry = entry
            .with_context(|| format!("scan tile dir '{}'", config.tiles_dir.display()))?;
        let file_name = entry.file_name().to_string_lossy().into_owned();
        if !is_png_name(&file_name) {
            continue;
        }

        let out_path = config.output_dir.join(format!("{OUTPUT_PREFIX}{file_name}"));
        let result = combine_one(&background, &entry.path(), &out_path, (tile_w, tile_h), (px, py));
        match &result {
            Ok(path) => tracing::info!(tile = %file_name, out = %path.display(), "generated"),
            Err(err) => tracing::warn!(tile = %file_name, %err, "skipped"),
        }
        outcomes.push(TileOutcome { file_name, result });
    }

    Ok(outcomes)
}

fn combine_one(
    background: &RgbaImage,
    tile_path: &Path,
    out_path: &Path,
    tile_size: (u32, u32),
    pos: (i64, i64),
) -> TilecompResult<PathBuf> {
    let tile = load_rgba8(tile_path)?;
    let resized = imageops::resize(&tile, tile_size.0, tile_size.1, imageops::FilterType::Lanczos3);

    let mut combined = background.clone();
    blend_tile_over(&mut combined, &resized, pos.0, pos.1)?;

    combined
        .save_with_format(out_path, image::ImageFormat::Png)
        .with_context(|| format!("write png '{}'", out_path.display()))?;

    Ok(out_path.to_path_buf())
}
