use std::path::Path;

use anyhow::Context;
use image::RgbaImage;

use crate::error::TilecompResult;

/// Decode an image file into RGBA8.
///
/// Sources without an alpha channel come back fully opaque.
pub fn load_rgba8(path: &Path) -> TilecompResult<RgbaImage> {
    let dyn_img =
        image::open(path).with_context(|| format!("decode image '{}'", path.display()))?;
    Ok(dyn_img.to_rgba8())
}

/// Case-insensitive `.png` suffix match on a file name.
///
/// Extension matching only; content is never sniffed.
pub fn is_png_name(name: &str) -> bool {
    name.len() >= 4
        && name
            .get(name.len() - 4..)
            .is_some_and(|ext| ext.eq_ignore_ascii_case(".png"))
}
