//! Vertical flip.

/// Reverse the order of the scan lines of a `width`-pixel wide raster.
///
/// Self-inverse.
///
/// # Panics
///
/// Panics if `bits_per_pixel` is not a whole number of bytes or if `buf` is
/// not a whole number of scan lines.
pub fn flip(bits_per_pixel: u32, width: u32, buf: &mut [u8]) {
    assert!(
        bits_per_pixel % 8 == 0,
        "cannot flip {bits_per_pixel} bpp rows"
    );
    let line = width as usize * (bits_per_pixel / 8) as usize;
    assert!(line > 0, "scan line must not be empty");
    assert!(
        buf.len() % line == 0,
        "buffer of {} bytes is not a whole number of {line}-byte scan lines",
        buf.len()
    );

    let mut scratch = vec![0u8; buf.len()];
    for (dst, src) in scratch
        .chunks_exact_mut(line)
        .zip(buf.chunks_exact(line).rev())
    {
        dst.copy_from_slice(src);
    }
    buf.copy_from_slice(&scratch);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flip_rows() {
        let mut buf = vec![1, 1, 2, 2, 3, 3];
        flip(16, 1, &mut buf);
        assert_eq!(buf, vec![3, 3, 2, 2, 1, 1]);
    }

    #[test]
    fn test_flip_is_self_inverse() {
        let original: Vec<u8> = (0..24 * 5 * 3).map(|i| i as u8).collect();
        let mut buf = original.clone();
        flip(24, 24, &mut buf);
        assert_ne!(buf, original);
        flip(24, 24, &mut buf);
        assert_eq!(buf, original);
    }

    #[test]
    #[should_panic(expected = "scan lines")]
    fn test_rejects_partial_line() {
        let mut buf = vec![0u8; 10];
        flip(32, 2, &mut buf);
    }
}
