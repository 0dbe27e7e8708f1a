//! Error types for texture transcoding.

use g1tex_format::{Platform, TextureFormat};
use thiserror::Error;

use crate::FormatProfile;

/// Errors that can occur while transcoding a texture.
#[derive(Debug, Error)]
pub enum Error {
    /// Common library error.
    #[error("{0}")]
    Common(#[from] g1tex_common::Error),

    /// Format catalog or size error.
    #[error("{0}")]
    Format(#[from] g1tex_format::Error),

    /// Layout transform error.
    #[error("{0}")]
    Swizzle(#[from] g1tex_swizzle::Error),

    /// DDS container error.
    #[error("{0}")]
    Dds(#[from] g1tex_dds::Error),

    /// Type code absent from the selected profile.
    #[error("unsupported texture type 0x{code:02X} for {platform} ({profile} profile)")]
    UnknownType {
        code: u8,
        platform: Platform,
        profile: FormatProfile,
    },

    /// Level geometry that the swizzle cannot cover.
    #[error("mip level {level} ({width}x{height} elements) cannot be {step} by {size}")]
    SwizzleGeometry {
        level: u32,
        width: u32,
        height: u32,
        step: &'static str,
        size: u32,
    },

    /// Vertical flip requested on block-compressed data.
    #[error("cannot flip {0} textures: rows of compressed blocks are not mirrored")]
    UnsupportedFlip(TextureFormat),

    /// DDS pixel format does not match the archive's native format.
    #[error("DDS holds {dds} data but the texture type expects {native}")]
    FormatMismatch {
        dds: TextureFormat,
        native: TextureFormat,
    },

    /// Malformed texture entry header.
    #[error("invalid texture entry: {0}")]
    InvalidEntry(String),
}

/// Result type for transcoding operations.
pub type Result<T> = std::result::Result<T, Error>;
