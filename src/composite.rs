use image::RgbaImage;

use crate::error::{TilecompError, TilecompResult};

/// Straight (non-premultiplied) RGBA8 pixel.
pub type Rgba8 = [u8; 4];

/// Target tile dimensions for a background of `bg_w x bg_h`.
///
/// Both axes floor, so the result is `(0, 0)`-safe for tiny backgrounds.
pub fn scaled_tile_size(bg_w: u32, bg_h: u32, scale: f64) -> (u32, u32) {
    let w = (f64::from(bg_w) * scale).floor() as u32;
    let h = (f64::from(bg_h) * scale).floor() as u32;
    (w, h)
}

/// Centered paste position shifted by the configured offsets.
///
/// Floor division keeps placement stable when the free space is odd. The
/// result may fall partially or fully outside the background; the blend clips,
/// it never errors.
pub fn paste_position(
    bg: (u32, u32),
    tile: (u32, u32),
    offset: (i32, i32),
) -> (i64, i64) {
    let px = (i64::from(bg.0) - i64::from(tile.0)).div_euclid(2) + i64::from(offset.0);
    let py = (i64::from(bg.1) - i64::from(tile.1)).div_euclid(2) + i64::from(offset.1);
    (px, py)
}

/// Source-over blend of one pixel, with the source alpha weighting every
/// channel: `out = (src * a + dst * (255 - a) + 127) / 255`.
pub fn over(dst: Rgba8, src: Rgba8) -> Rgba8 {
    let a = u16::from(src[3]);
    if a == 0 {
        return dst;
    }
    if a == 255 {
        return src;
    }

    let inv = 255u16 - a;
    let mut out = [0u8; 4];
    for i in 0..4 {
        out[i] = mul_div255(u16::from(src[i]), a).saturating_add(mul_div255(u16::from(dst[i]), inv));
    }
    out
}

/// Slice form of [`over`] for equal-length RGBA8 rows.
pub fn over_rows_in_place(dst: &mut [u8], src: &[u8]) -> TilecompResult<()> {
    if dst.len() != src.len() || !dst.len().is_multiple_of(4) {
        return Err(TilecompError::composite(
            "over_rows_in_place expects equal-length rgba8 buffers",
        ));
    }
    for (d, s) in dst.chunks_exact_mut(4).zip(src.chunks_exact(4)) {
        let out = over([d[0], d[1], d[2], d[3]], [s[0], s[1], s[2], s[3]]);
        d.copy_from_slice(&out);
    }
    Ok(())
}

/// Alpha-blend `tile` onto `bg` with its top-left corner at `(px, py)`.
///
/// Any part of the tile outside the background bounds is silently clipped;
/// a fully off-canvas position leaves `bg` untouched. Each overlapping row is
/// blended through [`over_rows_in_place`].
pub fn blend_tile_over(
    bg: &mut RgbaImage,
    tile: &RgbaImage,
    px: i64,
    py: i64,
) -> TilecompResult<()> {
    let (bg_w, bg_h) = (i64::from(bg.width()), i64::from(bg.height()));
    let (tile_w, tile_h) = (i64::from(tile.width()), i64::from(tile.height()));

    // Overlap rectangle in background coordinates.
    let x0 = px.max(0);
    let y0 = py.max(0);
    let x1 = (px + tile_w).min(bg_w);
    let y1 = (py + tile_h).min(bg_h);
    if x0 >= x1 || y0 >= y1 {
        return Ok(());
    }

    let row_bytes = (x1 - x0) as usize * 4;
    let bg_stride = bg_w as usize * 4;
    let tile_stride = tile_w as usize * 4;
    let src_bytes: &[u8] = tile.as_raw();
    let dst_bytes: &mut [u8] = bg;

    for y in y0..y1 {
        let dst_start = y as usize * bg_stride + x0 as usize * 4;
        let src_start = (y - py) as usize * tile_stride + (x0 - px) as usize * 4;
        over_rows_in_place(
            &mut dst_bytes[dst_start..dst_start + row_bytes],
            &src_bytes[src_start..src_start + row_bytes],
        )?;
    }
    Ok(())
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scaled_size_floors_both_axes() {
        assert_eq!(scaled_tile_size(1000, 1000, 0.63), (630, 630));
        assert_eq!(scaled_tile_size(3, 3, 0.5), (1, 1));
        assert_eq!(scaled_tile_size(1, 1, 0.5), (0, 0));
        assert_eq!(scaled_tile_size(100, 50, 1.0), (100, 50));
    }

    #[test]
    fn paste_position_matches_worked_example() {
        // 1000x1000 background, 630x630 tile, offsets (-10, 15).
        assert_eq!(
            paste_position((1000, 1000), (630, 630), (-10, 15)),
            (175, 200)
        );
    }

    #[test]
    fn paste_position_floor_divides_odd_gaps() {
        assert_eq!(paste_position((5, 5), (2, 2), (0, 0)), (1, 1));
        assert_eq!(paste_position((4, 4), (1, 1), (0, 0)), (1, 1));
    }

    #[test]
    fn paste_position_offsets_may_go_negative() {
        assert_eq!(paste_position((10, 10), (4, 4), (-20, -20)), (-17, -17));
    }

    #[test]
    fn over_src_alpha_0_is_noop() {
        let dst = [10, 20, 30, 40];
        let src = [255, 255, 255, 0];
        assert_eq!(over(dst, src), dst);
    }

    #[test]
    fn over_src_opaque_replaces_dst() {
        let dst = [0, 0, 0, 255];
        let src = [255, 0, 0, 255];
        assert_eq!(over(dst, src), src);
    }

    #[test]
    fn over_half_alpha_lerps_every_channel() {
        let dst = [0, 0, 0, 255];
        let src = [255, 0, 100, 128];
        let out = over(dst, src);
        assert_eq!(out[0], ((255u32 * 128 + 127) / 255) as u8);
        assert_eq!(out[1], 0);
        assert_eq!(
            out[2],
            (((100u32 * 128 + 127) / 255) + ((0 * 127 + 127) / 255)) as u8
        );
        // Alpha blends too: 128*128/255 + 255*127/255.
        assert_eq!(
            out[3],
            ((128u32 * 128 + 127) / 255) as u8 + ((255u32 * 127 + 127) / 255) as u8
        );
    }

    #[test]
    fn over_rows_rejects_mismatched_shapes() {
        let mut dst = vec![0u8; 8];
        assert!(over_rows_in_place(&mut dst, &[0u8; 4]).is_err());
        let mut odd = vec![0u8; 6];
        assert!(over_rows_in_place(&mut odd, &[0u8; 6]).is_err());
        assert!(over_rows_in_place(&mut dst, &[0u8; 8]).is_ok());
    }

    #[test]
    fn blend_clips_partially_out_of_bounds_tiles() {
        let mut bg = RgbaImage::from_pixel(4, 4, image::Rgba([0, 0, 255, 255]));
        let tile = RgbaImage::from_pixel(2, 2, image::Rgba([255, 0, 0, 255]));

        blend_tile_over(&mut bg, &tile, -1, -1).unwrap();

        // Only the (0,0) pixel overlaps the tile.
        assert_eq!(bg.get_pixel(0, 0).0, [255, 0, 0, 255]);
        assert_eq!(bg.get_pixel(1, 0).0, [0, 0, 255, 255]);
        assert_eq!(bg.get_pixel(0, 1).0, [0, 0, 255, 255]);
        assert_eq!(bg.get_pixel(1, 1).0, [0, 0, 255, 255]);
    }

    #[test]
    fn blend_clips_past_the_bottom_right_corner() {
        let mut bg = RgbaImage::from_pixel(4, 4, image::Rgba([0, 0, 255, 255]));
        let tile = RgbaImage::from_pixel(2, 2, image::Rgba([255, 0, 0, 255]));

        blend_tile_over(&mut bg, &tile, 3, 3).unwrap();

        // Only the tile's top-left pixel lands on the canvas.
        assert_eq!(bg.get_pixel(3, 3).0, [255, 0, 0, 255]);
        assert_eq!(bg.get_pixel(2, 3).0, [0, 0, 255, 255]);
        assert_eq!(bg.get_pixel(3, 2).0, [0, 0, 255, 255]);
        assert_eq!(bg.get_pixel(2, 2).0, [0, 0, 255, 255]);
    }

    #[test]
    fn blend_fully_off_canvas_is_noop() {
        let mut bg = RgbaImage::from_pixel(4, 4, image::Rgba([7, 7, 7, 255]));
        let before = bg.clone();
        let tile = RgbaImage::from_pixel(2, 2, image::Rgba([255, 0, 0, 255]));

        blend_tile_over(&mut bg, &tile, 100, 100).unwrap();
        blend_tile_over(&mut bg, &tile, -100, -100).unwrap();

        assert_eq!(bg.as_raw(), before.as_raw());
    }

    #[test]
    fn blend_empty_tile_is_noop() {
        let mut bg = RgbaImage::from_pixel(2, 2, image::Rgba([7, 7, 7, 255]));
        let before = bg.clone();
        let tile = RgbaImage::new(0, 0);

        blend_tile_over(&mut bg, &tile, 0, 0).unwrap();

        assert_eq!(bg.as_raw(), before.as_raw());
    }
}
