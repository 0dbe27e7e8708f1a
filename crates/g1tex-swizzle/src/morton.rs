//! Morton (Z-order) transform.
//!
//! The raster is cut into `2^k x 2^k` tiles laid out row-major. Inside a
//! tile, elements follow a Z-order curve whose index interleaves the low `k`
//! bits of the x and y coordinates.

use crate::Direction;

/// Which coordinate feeds the odd bits of the Z index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AxisOrder {
    /// x in odd bits, y in even bits. This is the console layout.
    #[default]
    XOdd,
    /// x in even bits, y in odd bits.
    XEven,
}

/// Spread the low 16 bits of `x` so that a zero sits between each bit.
#[inline]
fn inflate_bits(mut x: u32) -> u32 {
    x &= 0x0000_FFFF;
    x = (x | (x << 8)) & 0x00FF_00FF;
    x = (x | (x << 4)) & 0x0F0F_0F0F;
    x = (x | (x << 2)) & 0x3333_3333;
    x = (x | (x << 1)) & 0x5555_5555;
    x
}

/// Gather the even bits of `x` into its low 16 bits.
#[inline]
fn deflate_bits(mut x: u32) -> u32 {
    x &= 0x5555_5555;
    x = (x | (x >> 1)) & 0x3333_3333;
    x = (x | (x >> 2)) & 0x0F0F_0F0F;
    x = (x | (x >> 4)) & 0x00FF_00FF;
    x = (x | (x >> 8)) & 0x0000_FFFF;
    x
}

/// Z index of `(x, y)`.
#[inline]
pub fn encode(x: u32, y: u32, axes: AxisOrder) -> u32 {
    match axes {
        AxisOrder::XOdd => (inflate_bits(x) << 1) | inflate_bits(y),
        AxisOrder::XEven => inflate_bits(x) | (inflate_bits(y) << 1),
    }
}

/// `(x, y)` of a Z index.
#[inline]
pub fn decode(z: u32, axes: AxisOrder) -> (u32, u32) {
    match axes {
        AxisOrder::XOdd => (deflate_bits(z >> 1), deflate_bits(z)),
        AxisOrder::XEven => (deflate_bits(z), deflate_bits(z >> 1)),
    }
}

/// Apply (`Forward`) or undo (`Inverse`) a Morton transform of order `k`.
///
/// `width` and `height` are in elements of `element_bytes` bytes each.
///
/// # Panics
///
/// Panics if `buf` is not exactly `width * height` elements, if either
/// dimension is not a multiple of `2^k`, or if a dimension does not fit in
/// 16 bits. These indicate a miscomputed caller parameter.
pub fn morton(
    direction: Direction,
    k: u32,
    axes: AxisOrder,
    width: u32,
    height: u32,
    element_bytes: usize,
    buf: &mut [u8],
) {
    assert!(element_bytes > 0, "element size must be non-zero");
    assert!(
        width > 0 && height > 0 && width < 0x10000 && height < 0x10000,
        "morton dimensions {width}x{height} out of range"
    );
    assert_eq!(
        buf.len(),
        width as usize * height as usize * element_bytes,
        "buffer does not hold {width}x{height} elements of {element_bytes} bytes"
    );
    assert!(k < 16, "morton order {k} too large");
    let tile_width = 1u32 << k;
    assert!(
        width % tile_width == 0 && height % tile_width == 0,
        "{width}x{height} is not a multiple of the {tile_width}x{tile_width} morton tile"
    );

    let tile_size = tile_width * tile_width;
    let mask = tile_size - 1;
    let tiles_per_row = width / tile_width;
    let count = width * height;

    let mut scratch = vec![0u8; buf.len()];
    for i in 0..count {
        let j = match direction {
            Direction::Forward => {
                let (x, y) = (i % width, i / width);
                let tile = (y >> k) * tiles_per_row + (x >> k);
                tile * tile_size + (encode(x, y, axes) & mask)
            }
            Direction::Inverse => {
                let (mut x, mut y) = decode(i & mask, axes);
                let tile = i / tile_size;
                x += (tile % tiles_per_row) * tile_width;
                y += (tile / tiles_per_row) * tile_width;
                y * width + x
            }
        };
        debug_assert!(j < count);
        let (src, dst) = (i as usize * element_bytes, j as usize * element_bytes);
        scratch[dst..dst + element_bytes].copy_from_slice(&buf[src..src + element_bytes]);
    }
    buf.copy_from_slice(&scratch);
}

/// Largest Morton order that fits a `width x height` raster.
pub fn fitted_order(width: u32, height: u32) -> u32 {
    width.min(height).max(1).ilog2()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn pattern(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i * 7 + i / 251) as u8).collect()
    }

    #[test]
    fn test_bit_interleave() {
        assert_eq!(encode(0b11, 0b00, AxisOrder::XOdd), 0b1010);
        assert_eq!(encode(0b11, 0b00, AxisOrder::XEven), 0b0101);
        for (x, y) in [(0, 0), (5, 9), (1023, 7), (0xFFFF, 0x1234)] {
            assert_eq!(decode(encode(x, y, AxisOrder::XOdd), AxisOrder::XOdd), (x, y));
            assert_eq!(decode(encode(x, y, AxisOrder::XEven), AxisOrder::XEven), (x, y));
        }
    }

    #[test]
    fn test_forward_2x2_tile() {
        // Row-major 0 1 / 2 3 with x in odd bits becomes 0 2 1 3.
        let mut buf = vec![0u8, 1, 2, 3];
        morton(Direction::Forward, 1, AxisOrder::XOdd, 2, 2, 1, &mut buf);
        assert_eq!(buf, vec![0, 2, 1, 3]);

        let mut buf = vec![0u8, 1, 2, 3];
        morton(Direction::Forward, 1, AxisOrder::XEven, 2, 2, 1, &mut buf);
        assert_eq!(buf, vec![0, 1, 2, 3]);
    }

    #[test]
    fn test_tiles_are_row_major() {
        // 4x2 with order 1: two 2x2 tiles side by side.
        let mut buf: Vec<u8> = (0..8).collect();
        morton(Direction::Forward, 1, AxisOrder::XEven, 4, 2, 1, &mut buf);
        assert_eq!(buf, vec![0, 1, 4, 5, 2, 3, 6, 7]);
    }

    #[rstest]
    #[case(0, 4, 4, 1)]
    #[case(2, 4, 4, 4)]
    #[case(3, 16, 8, 16)]
    #[case(3, 64, 32, 8)]
    #[case(4, 16, 48, 6)]
    #[case(5, 32, 32, 2)]
    fn test_round_trip(
        #[case] k: u32,
        #[case] width: u32,
        #[case] height: u32,
        #[case] element_bytes: usize,
    ) {
        for axes in [AxisOrder::XOdd, AxisOrder::XEven] {
            let original = pattern(width as usize * height as usize * element_bytes);
            let mut buf = original.clone();
            morton(Direction::Forward, k, axes, width, height, element_bytes, &mut buf);
            if k > 0 {
                assert_ne!(buf, original);
            }
            morton(Direction::Inverse, k, axes, width, height, element_bytes, &mut buf);
            assert_eq!(buf, original);
        }
    }

    #[test]
    fn test_fitted_order() {
        assert_eq!(fitted_order(64, 16), 4);
        assert_eq!(fitted_order(1, 1), 0);
        assert_eq!(fitted_order(12, 8), 3);
    }

    #[test]
    #[should_panic(expected = "morton tile")]
    fn test_rejects_unaligned_dimensions() {
        let mut buf = vec![0u8; 12 * 8];
        morton(Direction::Forward, 3, AxisOrder::XOdd, 12, 8, 1, &mut buf);
    }

    #[test]
    #[should_panic(expected = "buffer does not hold")]
    fn test_rejects_wrong_buffer_size() {
        let mut buf = vec![0u8; 15];
        morton(Direction::Forward, 1, AxisOrder::XOdd, 4, 4, 1, &mut buf);
    }
}
