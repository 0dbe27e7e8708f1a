//! Channel permutation of packed pixels.
//!
//! A pixel of `bpp` bits is read as a big-endian word holding four lanes of
//! `bpp / 4` bits each. Every lane is masked out at its slot in the source
//! order and shifted to its slot in the destination order.

use g1tex_format::ChannelOrder;

use crate::{Error, Result};

/// Reorder the lanes of every pixel in `buf` from `from` to `to`.
///
/// Supported for 16, 24 and 32 bits per pixel. Wider pixels are rejected
/// with [`Error::UnsupportedPermutation`]: their lanes span more than one
/// 32-bit word and no verified layout exists for them.
///
/// # Panics
///
/// Panics if `buf` is not a whole number of pixels.
pub fn permute(
    bits_per_pixel: u32,
    from: ChannelOrder,
    to: ChannelOrder,
    buf: &mut [u8],
) -> Result<()> {
    if bits_per_pixel % 8 != 0 {
        return Err(Error::UnalignedBitDepth(bits_per_pixel));
    }
    if !matches!(bits_per_pixel, 16 | 24 | 32) {
        return Err(Error::UnsupportedPermutation(bits_per_pixel));
    }
    if from == to {
        return Ok(());
    }

    let pixel_bytes = (bits_per_pixel / 8) as usize;
    assert!(
        buf.len() % pixel_bytes == 0,
        "buffer of {} bytes is not a whole number of {}-byte pixels",
        buf.len(),
        pixel_bytes
    );

    let lanes = LaneMap::new(bits_per_pixel, from, to);
    for pixel in buf.chunks_exact_mut(pixel_bytes) {
        let word = pixel.iter().fold(0u32, |acc, b| (acc << 8) | *b as u32);
        let moved = lanes.apply(word);
        for (i, byte) in pixel.iter_mut().enumerate() {
            *byte = (moved >> (8 * (pixel_bytes - 1 - i))) as u8;
        }
    }
    Ok(())
}

/// Per-lane source mask and signed shift towards the destination slot.
struct LaneMap {
    mask: [u32; 4],
    shift: [i32; 4],
}

impl LaneMap {
    fn new(bits_per_pixel: u32, from: ChannelOrder, to: ChannelOrder) -> Self {
        let width = bits_per_pixel / 4;
        let lane_mask = (1u32 << width) - 1;
        let mut mask = [0u32; 4];
        let mut shift = [0i32; 4];
        for (i, lane) in b"RGBA".iter().enumerate() {
            // Slot 0 is the most significant lane.
            let pos_in = 3 - from.slot(*lane) as u32;
            let pos_out = 3 - to.slot(*lane) as u32;
            mask[i] = lane_mask << (pos_in * width);
            shift[i] = (pos_out as i32 - pos_in as i32) * width as i32;
        }
        Self { mask, shift }
    }

    #[inline]
    fn apply(&self, word: u32) -> u32 {
        let mut out = 0;
        for i in 0..4 {
            let lane = word & self.mask[i];
            out |= if self.shift[i] >= 0 {
                lane << self.shift[i]
            } else {
                lane >> -self.shift[i]
            };
        }
        out
    }
}
