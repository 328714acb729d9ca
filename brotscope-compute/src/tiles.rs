use brotscope_core::PixelRect;

/// Split a surface into rows of square tiles, top to bottom, left to right.
///
/// Edge tiles are cropped to the surface. A zero-sized surface has no rows.
pub fn generate_tile_rows(width: u32, height: u32, tile_size: u32) -> Vec<Vec<PixelRect>> {
    let tile_size = tile_size.max(1);

    (0..height)
        .step_by(tile_size as usize)
        .map(|y_start| {
            let h = tile_size.min(height - y_start);
            (0..width)
                .step_by(tile_size as usize)
                .map(|x_start| {
                    let w = tile_size.min(width - x_start);
                    PixelRect::new(x_start, y_start, w, h)
                })
                .collect()
        })
        .collect()
}
