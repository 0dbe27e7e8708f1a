//! Texture format catalog.

use std::fmt;

use crate::{ChannelOrder, Error, Result};

/// The codec a texture payload is stored in.
///
/// Uncompressed formats carry their native channel order in the variant name
/// (`Grab8` stores G, R, A, B from the most significant byte down). Block
/// compressed formats are opaque 4x4 blocks; only their position in memory is
/// ever changed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(u8)]
pub enum TextureFormat {
    Abgr4 = 0x01,
    Argb4 = 0x02,
    Grab4 = 0x03,
    Rgba4 = 0x04,
    Abgr8 = 0x05,
    Argb8 = 0x06,
    Grab8 = 0x07,
    Rgba8 = 0x08,
    /// 64 bpp, four 16-bit float lanes.
    Argb16 = 0x09,
    /// 128 bpp, four 32-bit float lanes.
    Argb32 = 0x0A,
    Bgr8 = 0x0B,
    R8 = 0x0C,
    Dxt1 = 0x10,
    Dxt2 = 0x11,
    Dxt3 = 0x12,
    Dxt4 = 0x13,
    Dxt5 = 0x14,
    Bc4 = 0x15,
    Bc5 = 0x16,
    Bc6h = 0x17,
    Bc7 = 0x18,
    Ati1 = 0x19,
    Ati2 = 0x1A,
    /// Container marker: the real format lives in a DX10 header.
    Dx10 = 0x1F,
}

impl TextureFormat {
    /// Every defined format.
    pub const ALL: [TextureFormat; 24] = [
        TextureFormat::Abgr4,
        TextureFormat::Argb4,
        TextureFormat::Grab4,
        TextureFormat::Rgba4,
        TextureFormat::Abgr8,
        TextureFormat::Argb8,
        TextureFormat::Grab8,
        TextureFormat::Rgba8,
        TextureFormat::Argb16,
        TextureFormat::Argb32,
        TextureFormat::Bgr8,
        TextureFormat::R8,
        TextureFormat::Dxt1,
        TextureFormat::Dxt2,
        TextureFormat::Dxt3,
        TextureFormat::Dxt4,
        TextureFormat::Dxt5,
        TextureFormat::Bc4,
        TextureFormat::Bc5,
        TextureFormat::Bc6h,
        TextureFormat::Bc7,
        TextureFormat::Ati1,
        TextureFormat::Ati2,
        TextureFormat::Dx10,
    ];

    /// Block width and height in pixels.
    pub const fn block_dim(self) -> (u32, u32) {
        if self.is_block_compressed() {
            (4, 4)
        } else {
            (1, 1)
        }
    }

    /// Bytes used by one block (one pixel for uncompressed formats).
    pub const fn bytes_per_block(self) -> u32 {
        use TextureFormat::*;
        match self {
            R8 => 1,
            Abgr4 | Argb4 | Grab4 | Rgba4 => 2,
            Bgr8 => 3,
            Abgr8 | Argb8 | Grab8 | Rgba8 => 4,
            Argb16 => 8,
            Argb32 => 16,
            Dxt1 | Bc4 | Ati1 => 8,
            Dxt2 | Dxt3 | Dxt4 | Dxt5 | Bc5 | Bc6h | Bc7 | Ati2 | Dx10 => 16,
        }
    }

    /// Average bits per pixel.
    pub const fn bits_per_pixel(self) -> u32 {
        let (bw, bh) = self.block_dim();
        self.bytes_per_block() * 8 / (bw * bh)
    }

    /// Whether pixels are stored as opaque 4x4 blocks.
    pub const fn is_block_compressed(self) -> bool {
        use TextureFormat::*;
        matches!(
            self,
            Dxt1 | Dxt2 | Dxt3 | Dxt4 | Dxt5 | Bc4 | Bc5 | Bc6h | Bc7 | Ati1 | Ati2 | Dx10
        )
    }

    /// The lane order of formats whose channels can be permuted.
    ///
    /// Only the 16 and 32 bpp RGBA families have one.
    pub const fn channel_order(self) -> Option<ChannelOrder> {
        use TextureFormat::*;
        match self {
            Abgr4 | Abgr8 => Some(ChannelOrder::ABGR),
            Argb4 | Argb8 => Some(ChannelOrder::ARGB),
            Grab4 | Grab8 => Some(ChannelOrder::GRAB),
            Rgba4 | Rgba8 => Some(ChannelOrder::RGBA),
            _ => None,
        }
    }

    /// The same family in canonical ARGB order, as stored in DDS files.
    pub const fn canonical(self) -> TextureFormat {
        use TextureFormat::*;
        match self {
            Abgr4 | Grab4 | Rgba4 => Argb4,
            Abgr8 | Grab8 | Rgba8 => Argb8,
            other => other,
        }
    }

    /// Whether both formats share block geometry and bit depth, so a payload
    /// of one can be reinterpreted as the other without resizing.
    pub const fn is_layout_compatible(self, other: TextureFormat) -> bool {
        let (aw, ah) = self.block_dim();
        let (bw, bh) = other.block_dim();
        aw == bw && ah == bh && self.bytes_per_block() == other.bytes_per_block()
    }

    /// Short display name.
    pub const fn name(self) -> &'static str {
        use TextureFormat::*;
        match self {
            Abgr4 => "ABGR4",
            Argb4 => "ARGB4",
            Grab4 => "GRAB4",
            Rgba4 => "RGBA4",
            Abgr8 => "ABGR8",
            Argb8 => "ARGB8",
            Grab8 => "GRAB8",
            Rgba8 => "RGBA8",
            Argb16 => "ARGB16",
            Argb32 => "ARGB32",
            Bgr8 => "BGR8",
            R8 => "R8",
            Dxt1 => "DXT1",
            Dxt2 => "DXT2",
            Dxt3 => "DXT3",
            Dxt4 => "DXT4",
            Dxt5 => "DXT5",
            Bc4 => "BC4",
            Bc5 => "BC5",
            Bc6h => "BC6H",
            Bc7 => "BC7",
            Ati1 => "ATI1",
            Ati2 => "ATI2",
            Dx10 => "DX10",
        }
    }
}

impl TryFrom<u8> for TextureFormat {
    type Error = Error;

    fn try_from(id: u8) -> Result<Self> {
        TextureFormat::ALL
            .into_iter()
            .find(|f| *f as u8 == id)
            .ok_or(Error::UnknownFormat(id))
    }
}

impl fmt::Display for TextureFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_is_self_consistent() {
        for format in TextureFormat::ALL {
            let (bw, bh) = format.block_dim();
            assert_eq!(
                format.bytes_per_block() * 8,
                format.bits_per_pixel() * bw * bh,
                "{format}"
            );
        }
    }

    #[test]
    fn test_known_parameters() {
        assert_eq!(TextureFormat::Dxt1.bits_per_pixel(), 4);
        assert_eq!(TextureFormat::Bc7.bits_per_pixel(), 8);
        assert_eq!(TextureFormat::Bgr8.bits_per_pixel(), 24);
        assert_eq!(TextureFormat::Argb32.bits_per_pixel(), 128);
        assert_eq!(TextureFormat::Argb4.block_dim(), (1, 1));
        assert_eq!(TextureFormat::Ati2.block_dim(), (4, 4));
        assert_eq!(TextureFormat::Bc4.bytes_per_block(), 8);
    }

    #[test]
    fn test_id_round_trip_and_unknown() {
        for format in TextureFormat::ALL {
            assert_eq!(TextureFormat::try_from(format as u8).unwrap(), format);
        }
        assert!(matches!(
            TextureFormat::try_from(0x00),
            Err(Error::UnknownFormat(0x00))
        ));
        assert!(matches!(
            TextureFormat::try_from(0xEE),
            Err(Error::UnknownFormat(0xEE))
        ));
    }

    #[test]
    fn test_canonical_family() {
        assert_eq!(TextureFormat::Grab8.canonical(), TextureFormat::Argb8);
        assert_eq!(TextureFormat::Rgba4.canonical(), TextureFormat::Argb4);
        assert_eq!(TextureFormat::Dxt5.canonical(), TextureFormat::Dxt5);
        assert!(TextureFormat::Rgba8.is_layout_compatible(TextureFormat::Argb8));
        assert!(!TextureFormat::Dxt1.is_layout_compatible(TextureFormat::Dxt5));
    }
}
