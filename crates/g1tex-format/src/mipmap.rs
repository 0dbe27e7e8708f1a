//! Mipmap chain sizing.
//!
//! Level sizes follow the DDS layout rules: each level halves the dimensions
//! (rounding down), then rounds up to whole blocks, with at least one block
//! per axis.

use crate::{Error, Result, TextureFormat};

/// Width and height of `level`, in blocks.
pub fn level_blocks(format: TextureFormat, level: u32, width: u32, height: u32) -> (u32, u32) {
    let (bw, bh) = format.block_dim();
    let w = width.checked_shr(level).unwrap_or(0);
    let h = height.checked_shr(level).unwrap_or(0);
    (w.div_ceil(bw).max(1), h.div_ceil(bh).max(1))
}

/// Byte size of one mipmap level of one surface.
///
/// Saturates at `usize::MAX`; [`chain_size`] reports sizes that do not fit.
pub fn level_size(format: TextureFormat, level: u32, width: u32, height: u32) -> usize {
    checked_level_size(format, level, width, height).unwrap_or(usize::MAX)
}

fn checked_level_size(format: TextureFormat, level: u32, width: u32, height: u32) -> Option<usize> {
    let (bx, by) = level_blocks(format, level, width, height);
    (bx as usize)
        .checked_mul(by as usize)?
        .checked_mul(format.bytes_per_block() as usize)
}

/// Byte size of a full chain of `mipmaps` levels for one surface.
pub fn chain_size(format: TextureFormat, mipmaps: u32, width: u32, height: u32) -> Result<usize> {
    if mipmaps == 0 {
        return Err(Error::InvalidMipCount);
    }
    if width == 0 || height == 0 {
        return Err(Error::InvalidDimensions { width, height });
    }
    (0..mipmaps)
        .try_fold(0usize, |total, level| {
            total.checked_add(checked_level_size(format, level, width, height)?)
        })
        .ok_or(Error::SizeOverflow { width, height })
}

/// Byte size of every level of every frame (and cube face).
pub fn total_size(
    format: TextureFormat,
    mipmaps: u32,
    width: u32,
    height: u32,
    frames: u32,
    cubemap: bool,
) -> Result<usize> {
    let faces = if cubemap { 6 } else { 1 };
    chain_size(format, mipmaps, width, height)?
        .checked_mul(frames.max(1) as usize)
        .and_then(|size| size.checked_mul(faces))
        .ok_or(Error::SizeOverflow { width, height })
}

/// Byte offsets of each level within one surface's chain.
pub fn level_offsets(format: TextureFormat, mipmaps: u32, width: u32, height: u32) -> Vec<usize> {
    let mut offsets = Vec::with_capacity(mipmaps as usize);
    let mut offset = 0;
    for level in 0..mipmaps {
        offsets.push(offset);
        offset += level_size(format, level, width, height);
    }
    offsets
}

/// Outcome of comparing a computed payload size with the bytes present.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reconciled {
    /// The payload has exactly the expected size.
    Exact,
    /// The payload is six times larger: one surface per cube face.
    Cubemap,
}

/// Reconcile the expected payload size of a texture with the actual size.
///
/// A payload exactly six times the expectation is a cubemap. Any other larger
/// payload is a [`Error::SizeMismatch`], and a smaller one is
/// [`Error::PayloadTooSmall`].
pub fn reconcile(expected: usize, actual: usize) -> Result<Reconciled> {
    if actual < expected {
        return Err(Error::PayloadTooSmall { expected, actual });
    }
    if actual == expected {
        return Ok(Reconciled::Exact);
    }
    if expected != 0 && actual == expected * 6 {
        return Ok(Reconciled::Cubemap);
    }
    Err(Error::SizeMismatch { expected, actual })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_level_size_matches_block_count() {
        for format in TextureFormat::ALL {
            let (bw, bh) = format.block_dim();
            let expected = 100u32.div_ceil(bw) as usize
                * 60u32.div_ceil(bh) as usize
                * format.bytes_per_block() as usize;
            assert_eq!(level_size(format, 0, 100, 60), expected, "{format}");
        }
    }

    #[test]
    fn test_dxt1_full_chain() {
        let expected: usize = (0..9)
            .map(|l| {
                let side = (64usize >> l).max(1);
                side * side * 8
            })
            .sum();
        assert_eq!(
            total_size(TextureFormat::Dxt1, 9, 256, 256, 1, false).unwrap(),
            expected
        );
    }

    #[rstest]
    #[case(TextureFormat::Dxt5, 1, 1, 16)]
    #[case(TextureFormat::Dxt5, 4, 4, 16)]
    #[case(TextureFormat::Dxt5, 8, 8, 64)]
    #[case(TextureFormat::Dxt5, 1024, 1024, 1024 * 1024)]
    #[case(TextureFormat::Bgr8, 3, 5, 45)]
    #[case(TextureFormat::Argb4, 16, 2, 64)]
    fn test_level_zero(
        #[case] format: TextureFormat,
        #[case] width: u32,
        #[case] height: u32,
        #[case] size: usize,
    ) {
        assert_eq!(level_size(format, 0, width, height), size);
    }

    #[test]
    fn test_non_power_of_two_chain() {
        // 24x10 RGBA8: 24x10, 12x5, 6x2, 3x1
        let size = chain_size(TextureFormat::Rgba8, 4, 24, 10).unwrap();
        assert_eq!(size, (240 + 60 + 12 + 3) * 4);
        assert_eq!(
            level_offsets(TextureFormat::Rgba8, 4, 24, 10),
            vec![0, 960, 1200, 1248]
        );
    }

    #[test]
    fn test_frames_and_cubemap_multiply() {
        let one = chain_size(TextureFormat::Bc7, 3, 64, 64).unwrap();
        assert_eq!(
            total_size(TextureFormat::Bc7, 3, 64, 64, 4, true).unwrap(),
            one * 24
        );
    }

    #[test]
    fn test_zero_mipmaps_rejected() {
        assert!(matches!(
            chain_size(TextureFormat::Dxt1, 0, 64, 64),
            Err(Error::InvalidMipCount)
        ));
        assert!(matches!(
            chain_size(TextureFormat::Dxt1, 1, 0, 64),
            Err(Error::InvalidDimensions { .. })
        ));
    }

    #[test]
    fn test_oversized_dimensions_rejected() {
        assert!(matches!(
            chain_size(TextureFormat::Argb32, 1, u32::MAX, u32::MAX),
            Err(Error::SizeOverflow { .. })
        ));
        // The chain fits; multiplying by the frame count does not.
        assert!(matches!(
            total_size(TextureFormat::Argb32, 1, 1 << 20, 1 << 20, u32::MAX, true),
            Err(Error::SizeOverflow { .. })
        ));
        assert_eq!(level_size(TextureFormat::Argb32, 0, u32::MAX, u32::MAX), usize::MAX);
    }

    #[test]
    fn test_reconcile() {
        assert_eq!(reconcile(100, 100).unwrap(), Reconciled::Exact);
        assert_eq!(reconcile(100, 600).unwrap(), Reconciled::Cubemap);
        assert!(matches!(
            reconcile(100, 500),
            Err(Error::SizeMismatch {
                expected: 100,
                actual: 500
            })
        ));
        assert!(matches!(
            reconcile(100, 650),
            Err(Error::SizeMismatch { .. })
        ));
        assert!(matches!(
            reconcile(100, 99),
            Err(Error::PayloadTooSmall { .. })
        ));
    }
}
