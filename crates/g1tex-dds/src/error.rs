//! Error types for DDS handling.

use g1tex_format::TextureFormat;
use thiserror::Error;

/// Errors that can occur when reading or writing DDS files.
#[derive(Debug, Error)]
pub enum Error {
    /// Common library error.
    #[error("{0}")]
    Common(#[from] g1tex_common::Error),

    /// Format catalog error.
    #[error("{0}")]
    Format(#[from] g1tex_format::Error),

    /// Invalid DDS magic.
    #[error("invalid DDS magic: expected 'DDS ', got {0:?}")]
    InvalidMagic([u8; 4]),

    /// Invalid DDS header.
    #[error("invalid DDS header: {0}")]
    InvalidHeader(String),

    /// Uncompressed pixel depth that no supported format has.
    #[error("unsupported bit depth: {0} bpp")]
    UnsupportedBitDepth(u32),

    /// Channel masks that are not the canonical ARGB layout.
    #[error("non-canonical channel masks for {bits} bpp: R={r:#x} G={g:#x} B={b:#x} A={a:#x}")]
    BadChannelMask {
        bits: u32,
        r: u32,
        g: u32,
        b: u32,
        a: u32,
    },

    /// FourCC that maps to no supported format.
    #[error("unknown FourCC {0:?}")]
    UnknownFourCc([u8; 4]),

    /// DXGI format that maps to no supported format.
    #[error("unknown DXGI format {0}")]
    UnknownDxgiFormat(u32),

    /// Cubemap header that does not declare all six faces.
    #[error("cubemap declares faces {0:#06x}, all six are required")]
    MissingCubeFaces(u32),

    /// Texture array of a format that has no DXGI equivalent.
    #[error("{0} cannot be stored in a DX10 header")]
    NoDxgiFormat(TextureFormat),
}

/// Result type for DDS operations.
pub type Result<T> = std::result::Result<T, Error>;
