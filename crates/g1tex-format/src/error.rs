//! Error types for format lookups and size validation.

use thiserror::Error;

/// Errors raised by the format catalog and the mipmap calculator.
#[derive(Debug, Error)]
pub enum Error {
    /// Format identifier outside the defined set.
    #[error("unknown texture format id 0x{0:02x}")]
    UnknownFormat(u8),

    /// Channel order string that is not a permutation of "RGBA".
    #[error("invalid channel order {0:?}: expected each of R, G, B and A exactly once")]
    BadChannelOrder(String),

    /// A mip count of zero was passed where a resolved count is required.
    #[error("mipmap count must be resolved to a non-zero value before sizing")]
    InvalidMipCount,

    /// Width or height of zero.
    #[error("invalid texture dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    /// Computed payload size does not fit in memory.
    #[error("texture of {width}x{height} is too large to size")]
    SizeOverflow { width: u32, height: u32 },

    /// Payload is larger than expected by a factor that matches no known layout.
    #[error("payload size mismatch: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// Payload is smaller than expected; missing data cannot be synthesized.
    #[error("payload too small: expected {expected} bytes, got {actual}")]
    PayloadTooSmall { expected: usize, actual: usize },
}

/// Result type for format operations.
pub type Result<T> = std::result::Result<T, Error>;
