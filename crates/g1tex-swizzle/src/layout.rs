//! Surface ordering of multi-frame textures.
//!
//! Archives store textures level-major: level 0 of every surface, then level
//! 1 of every surface, and so on. DDS files store them frame-major: the whole
//! mipmap chain of the first surface, then the chain of the next one.

use g1tex_format::{mipmap, TextureFormat};

/// Reorder a level-major payload into frame-major order.
///
/// # Panics
///
/// Panics if `buf` is not exactly `surfaces` chains of `mipmaps` levels.
pub fn to_frame_major(
    format: TextureFormat,
    width: u32,
    height: u32,
    mipmaps: u32,
    surfaces: u32,
    buf: &mut [u8],
) {
    reorder(format, width, height, mipmaps, surfaces, buf, Target::FrameMajor);
}

/// Reorder a frame-major payload into level-major order.
///
/// # Panics
///
/// Panics if `buf` is not exactly `surfaces` chains of `mipmaps` levels.
pub fn to_level_major(
    format: TextureFormat,
    width: u32,
    height: u32,
    mipmaps: u32,
    surfaces: u32,
    buf: &mut [u8],
) {
    reorder(format, width, height, mipmaps, surfaces, buf, Target::LevelMajor);
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum Target {
    FrameMajor,
    LevelMajor,
}

fn reorder(
    format: TextureFormat,
    width: u32,
    height: u32,
    mipmaps: u32,
    surfaces: u32,
    buf: &mut [u8],
    target: Target,
) {
    let offsets = mipmap::level_offsets(format, mipmaps, width, height);
    let sizes: Vec<usize> = (0..mipmaps)
        .map(|level| mipmap::level_size(format, level, width, height))
        .collect();
    let chain: usize = sizes.iter().sum();
    assert_eq!(
        buf.len(),
        chain * surfaces as usize,
        "buffer does not hold {surfaces} chains of {mipmaps} levels"
    );
    // Both orders coincide for a single surface or a single level.
    if surfaces <= 1 || mipmaps <= 1 {
        return;
    }

    let mut scratch = vec![0u8; buf.len()];
    let mut level_base = 0;
    for (level, &size) in sizes.iter().enumerate() {
        for surface in 0..surfaces as usize {
            let by_level = level_base + surface * size;
            let by_frame = surface * chain + offsets[level];
            let (src, dst) = match target {
                Target::FrameMajor => (by_level, by_frame),
                Target::LevelMajor => (by_frame, by_level),
            };
            scratch[dst..dst + size].copy_from_slice(&buf[src..src + size]);
        }
        level_base += size * surfaces as usize;
    }
    buf.copy_from_slice(&scratch);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_two_frames_two_levels() {
        // R8 4x4 with two levels: 16 bytes then 4 bytes per frame.
        let mut level_major = Vec::new();
        level_major.extend([0xA0u8; 16]);
        level_major.extend([0xB0u8; 16]);
        level_major.extend([0xA1u8; 4]);
        level_major.extend([0xB1u8; 4]);

        let mut buf = level_major.clone();
        to_frame_major(TextureFormat::R8, 4, 4, 2, 2, &mut buf);

        let mut expected = Vec::new();
        expected.extend([0xA0u8; 16]);
        expected.extend([0xA1u8; 4]);
        expected.extend([0xB0u8; 16]);
        expected.extend([0xB1u8; 4]);
        assert_eq!(buf, expected);

        to_level_major(TextureFormat::R8, 4, 4, 2, 2, &mut buf);
        assert_eq!(buf, level_major);
    }

    #[test]
    fn test_round_trip_block_compressed() {
        let len = mipmap::chain_size(TextureFormat::Dxt5, 5, 64, 32).unwrap() * 3;
        let original: Vec<u8> = (0..len).map(|i| (i % 241) as u8).collect();
        let mut buf = original.clone();
        to_frame_major(TextureFormat::Dxt5, 64, 32, 5, 3, &mut buf);
        assert_ne!(buf, original);
        to_level_major(TextureFormat::Dxt5, 64, 32, 5, 3, &mut buf);
        assert_eq!(buf, original);
    }

    #[test]
    fn test_single_surface_untouched() {
        let original: Vec<u8> = (0..20).collect();
        let mut buf = original.clone();
        to_frame_major(TextureFormat::R8, 4, 4, 2, 1, &mut buf);
        assert_eq!(buf, original);
    }

    #[test]
    #[should_panic(expected = "buffer does not hold")]
    fn test_rejects_short_buffer() {
        let mut buf = vec![0u8; 30];
        to_frame_major(TextureFormat::R8, 4, 4, 2, 2, &mut buf);
    }
}
