//! DDS container synthesis and parsing.
//!
//! A DDS file is the `DDS ` magic, a 124-byte header with an embedded
//! 32-byte pixel format, an optional 20-byte DX10 extension header, and the
//! payload. The payload stores the full mipmap chain of each surface in turn.
//!
//! # Example
//!
//! ```
//! use g1tex_dds::{parse, write_dds};
//! use g1tex_format::{TextureDescriptor, TextureFormat};
//!
//! let desc = TextureDescriptor::new(TextureFormat::Dxt5, 8, 8);
//! let dds = write_dds(&desc, &[0u8; 64])?;
//!
//! let info = parse(&dds)?;
//! assert_eq!(info.descriptor, desc);
//! assert_eq!(info.payload(&dds).len(), 64);
//! # Ok::<(), g1tex_dds::Error>(())
//! ```

mod error;
mod header;
mod parse;
mod write;

pub mod dxgi;

pub use error::{Error, Result};
pub use header::{caps, flags, pixel, DdsHeader, DdsHeaderDxt10, DdsPixelFormat, FourCC};
pub use parse::{parse, DdsInfo};
pub use write::{header_bytes, needs_dx10, write_dds};

/// DDS file magic bytes ("DDS ").
pub const DDS_MAGIC: &[u8; 4] = b"DDS ";

/// Size of the magic, the header and the DX10 extension header.
pub const MAX_HEADER_SIZE: usize = 4 + 124 + 20;
