//! Texture format catalog and mipmap chain sizing.
//!
//! Every size computation in g1tex routes through this crate:
//!
//! - [`TextureFormat`] - The codecs a texture payload can be stored in, with
//!   their block dimensions, bytes per block and bits per pixel
//! - [`ChannelOrder`] - The order of the R, G, B and A lanes of a pixel
//! - [`mipmap`] - Per-level and whole-payload byte sizes, and the policy used
//!   to reconcile a computed size with the bytes actually present
//! - [`TextureDescriptor`] - Everything the transcoder needs to know about a
//!   texture besides its pixels
//!
//! # Example
//!
//! ```
//! use g1tex_format::{mipmap, TextureFormat};
//!
//! // 256x256 DXT1 with a full chain of 9 levels.
//! let size = mipmap::chain_size(TextureFormat::Dxt1, 9, 256, 256).unwrap();
//! assert_eq!(size, 43_704);
//! ```

mod channel;
mod descriptor;
mod error;
mod format;
mod platform;

pub mod mipmap;

pub use channel::ChannelOrder;
pub use descriptor::TextureDescriptor;
pub use error::{Error, Result};
pub use format::TextureFormat;
pub use platform::Platform;

pub use g1tex_common::Endian;
