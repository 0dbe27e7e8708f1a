//! g1tex - Gust G1T texture transcoding library.
//!
//! This crate ties the g1tex library ecosystem together: it knows what the
//! type codes of G1T texture entries mean on each platform, plans the layout
//! transforms those platforms need, and converts payloads to and from DDS.
//!
//! # Crates
//!
//! - [`g1tex_common`] - Common utilities (endian-aware binary reading)
//! - [`g1tex_format`] - Texture format catalog and mipmap chain sizing
//! - [`g1tex_swizzle`] - Morton, tile, flip, channel and surface order transforms
//! - [`g1tex_dds`] - DDS header writing and parsing
//!
//! # Example
//!
//! ```
//! use g1tex::prelude::*;
//!
//! // A 64x64 PS4 DXT1 texture with Morton swizzled blocks.
//! let descriptor = TextureDescriptor::new(TextureFormat::Dxt1, 64, 64)
//!     .with_platform(Platform::Ps4);
//! let payload = vec![0u8; descriptor.payload_size()?];
//!
//! let options = TranscodeOptions::default();
//! let unpacked = unpack(0x60, descriptor, payload.clone(), &options)?;
//!
//! let target = PackTarget { type_code: 0x60, platform: Platform::Ps4, mipmaps: 0 };
//! let packed = pack(&unpacked.dds, &target, &options)?;
//! assert_eq!(packed.payload, payload);
//! # Ok::<(), g1tex::Error>(())
//! ```

mod error;

pub mod entry;
pub mod pipeline;
pub mod profile;
pub mod recipe;

// Re-export all sub-crates
pub use g1tex_common as common;
pub use g1tex_dds as dds;
pub use g1tex_format as format;
pub use g1tex_swizzle as swizzle;

pub use error::{Error, Result};
pub use pipeline::{pack, unpack, PackTarget, Packed, TranscodeOptions, Unpacked, Warning};
pub use profile::{FormatProfile, TextureKind};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::entry::{Entry, EntryHeader, ExtraData};
    pub use crate::pipeline::{pack, unpack, PackTarget, Packed, TranscodeOptions, Unpacked, Warning};
    pub use crate::profile::{FormatProfile, TextureKind};
    pub use crate::recipe::{Recipe, Step};
    pub use g1tex_common::{BinaryReader, Endian};
    pub use g1tex_dds::{parse as parse_dds, write_dds, DdsInfo};
    pub use g1tex_format::{ChannelOrder, Platform, TextureDescriptor, TextureFormat};
}

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
