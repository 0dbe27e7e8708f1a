//! Texture descriptor.

use g1tex_common::Endian;

use crate::{mipmap, Platform, Result, TextureFormat};

/// Everything the transcoder needs to know about a texture besides its pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextureDescriptor {
    /// Pixel codec.
    pub format: TextureFormat,
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// Number of mipmap levels; 0 means not yet known.
    pub mipmaps: u32,
    /// Number of frames in a texture array (1 for plain textures).
    pub frames: u32,
    /// Whether each frame is a cube with six faces.
    pub cubemap: bool,
    /// Platform the texture comes from or is destined to.
    pub platform: Platform,
    /// Byte order of the container metadata (never of the pixels).
    pub endian: Endian,
    /// Colour data is in the sRGB colour space.
    pub srgb: bool,
    /// Texture holds a normal map.
    pub normal_map: bool,
}

impl TextureDescriptor {
    /// A single-level, single-frame texture for Windows.
    pub fn new(format: TextureFormat, width: u32, height: u32) -> Self {
        Self {
            format,
            width,
            height,
            mipmaps: 1,
            frames: 1,
            cubemap: false,
            platform: Platform::Windows,
            endian: Endian::Little,
            srgb: false,
            normal_map: false,
        }
    }

    /// Set the mipmap count.
    pub fn with_mipmaps(mut self, mipmaps: u32) -> Self {
        self.mipmaps = mipmaps;
        self
    }

    /// Set the frame count.
    pub fn with_frames(mut self, frames: u32) -> Self {
        self.frames = frames;
        self
    }

    /// Mark as cubemap.
    pub fn with_cubemap(mut self, cubemap: bool) -> Self {
        self.cubemap = cubemap;
        self
    }

    /// Set the platform, and with it the metadata byte order.
    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self.endian = platform.metadata_endian();
        self
    }

    /// Number of independent surfaces (frames times cube faces).
    pub fn surfaces(&self) -> u32 {
        self.frames.max(1) * if self.cubemap { 6 } else { 1 }
    }

    /// Whether this is a texture array.
    pub fn is_array(&self) -> bool {
        self.frames > 1
    }

    /// Byte size of one surface's full mip chain.
    pub fn chain_size(&self) -> Result<usize> {
        mipmap::chain_size(self.format, self.mipmaps, self.width, self.height)
    }

    /// Byte size of the whole payload.
    pub fn payload_size(&self) -> Result<usize> {
        mipmap::total_size(
            self.format,
            self.mipmaps,
            self.width,
            self.height,
            self.frames,
            self.cubemap,
        )
    }
}
