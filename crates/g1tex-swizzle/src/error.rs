//! Error types for layout transforms.

use thiserror::Error;

/// Errors raised by transforms whose validity depends on the texture data.
#[derive(Debug, Error)]
pub enum Error {
    /// Bit depth is not a whole number of bytes.
    #[error("bits per pixel ({0}) must be a multiple of 8")]
    UnalignedBitDepth(u32),

    /// Channel permutation is not defined for this bit depth.
    #[error("channel permutation of {0} bpp pixels is not supported")]
    UnsupportedPermutation(u32),
}

/// Result type for layout transforms.
pub type Result<T> = std::result::Result<T, Error>;
