//! Square tiling.
//!
//! A linear raster is regrouped into `tile_size x tile_size` tiles. Tiles are
//! stored one after the other in row-major order, and the elements inside a
//! tile are row-major as well.

use crate::Direction;

/// Apply (`Forward`) or undo (`Inverse`) square tiling.
///
/// `width` is in elements; the height follows from the buffer length.
///
/// # Panics
///
/// Panics if the buffer is not a whole number of tiles, or if `width` or the
/// derived height is not a multiple of `tile_size`.
pub fn tile(
    direction: Direction,
    tile_size: u32,
    element_bytes: usize,
    width: u32,
    buf: &mut [u8],
) {
    assert!(tile_size > 0 && element_bytes > 0 && width > 0);
    let tile_bytes = element_bytes * (tile_size * tile_size) as usize;
    assert!(
        buf.len() % tile_bytes == 0,
        "buffer of {} bytes is not a whole number of {tile_size}x{tile_size} tiles",
        buf.len()
    );
    let row_bytes = element_bytes * width as usize;
    assert!(
        width % tile_size == 0 && buf.len() % row_bytes == 0,
        "width {width} is not a multiple of the {tile_size}x{tile_size} tile"
    );
    let height = (buf.len() / row_bytes) as u32;
    assert!(
        height % tile_size == 0,
        "height {height} is not a multiple of the {tile_size}x{tile_size} tile"
    );

    let tiles_per_row = width / tile_size;
    let mut scratch = vec![0u8; buf.len()];
    for y in 0..height {
        for x in 0..width {
            let linear = (y * width + x) as usize;
            let tile_index = (y / tile_size) * tiles_per_row + x / tile_size;
            let within = (y % tile_size) * tile_size + x % tile_size;
            let tiled = (tile_index * tile_size * tile_size + within) as usize;
            let (src, dst) = match direction {
                Direction::Forward => (linear, tiled),
                Direction::Inverse => (tiled, linear),
            };
            let (src, dst) = (src * element_bytes, dst * element_bytes);
            scratch[dst..dst + element_bytes].copy_from_slice(&buf[src..src + element_bytes]);
        }
    }
    buf.copy_from_slice(&scratch);
}
