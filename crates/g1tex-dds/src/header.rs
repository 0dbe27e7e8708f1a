//! DDS header structures.

use zerocopy::{FromBytes, FromZeros, Immutable, IntoBytes, KnownLayout};

/// `DDS_HEADER.flags` bits.
pub mod flags {
    /// `CAPS | HEIGHT | WIDTH | PIXELFORMAT`, always set.
    pub const TEXTURE: u32 = 0x0000_1007;
    /// `MIPMAPCOUNT`.
    pub const MIPMAP: u32 = 0x0002_0000;
    /// `LINEARSIZE`.
    pub const LINEARSIZE: u32 = 0x0008_0000;
}

/// `DDS_HEADER.caps` and `caps2` bits.
pub mod caps {
    /// `DDSCAPS_TEXTURE`.
    pub const TEXTURE: u32 = 0x0000_1000;
    /// `DDSCAPS_COMPLEX | DDSCAPS_MIPMAP`.
    pub const MIPMAP: u32 = 0x0040_0008;
    /// `DDSCAPS_COMPLEX`.
    pub const CUBEMAP: u32 = 0x0000_0008;
    /// `DDSCAPS2_CUBEMAP`.
    pub const CUBEMAP2: u32 = 0x0000_0200;
    /// `DDSCAPS2_CUBEMAP` with the six `DDSCAPS2_CUBEMAP_*` face bits.
    pub const ALL_FACES: u32 = 0x0000_FE00;
}

/// `DDS_PIXELFORMAT.flags` bits.
pub mod pixel {
    /// `DDPF_ALPHAPIXELS`.
    pub const ALPHAPIXELS: u32 = 0x0000_0001;
    /// `DDPF_FOURCC`.
    pub const FOURCC: u32 = 0x0000_0004;
    /// `DDPF_RGB`.
    pub const RGB: u32 = 0x0000_0040;
    /// `DDPF_RGB | DDPF_ALPHAPIXELS`.
    pub const RGBA: u32 = 0x0000_0041;
    /// Normal map marker.
    pub const NORMAL: u32 = 0x8000_0000;
}

/// DDS file header.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct DdsHeader {
    /// Header size (should be 124).
    pub size: u32,
    /// Header flags.
    pub flags: u32,
    /// Image height.
    pub height: u32,
    /// Image width.
    pub width: u32,
    /// Pitch or linear size.
    pub pitch_or_linear_size: u32,
    /// Depth (for volume textures).
    pub depth: u32,
    /// Number of mipmap levels.
    pub mipmap_count: u32,
    /// Reserved.
    pub reserved1: [u32; 11],
    /// Pixel format.
    pub pixel_format: DdsPixelFormat,
    /// Surface capabilities.
    pub caps: u32,
    /// Surface capabilities 2.
    pub caps2: u32,
    /// Surface capabilities 3.
    pub caps3: u32,
    /// Surface capabilities 4.
    pub caps4: u32,
    /// Reserved.
    pub reserved2: u32,
}

impl DdsHeader {
    /// Expected header size.
    pub const SIZE: u32 = 124;

    /// A zeroed header with the size fields filled in.
    pub fn empty() -> Self {
        let mut header = Self::new_zeroed();
        header.size = Self::SIZE;
        header.pixel_format.size = DdsPixelFormat::SIZE;
        header
    }

    /// Check if this is a DX10 extended header.
    pub fn is_dx10(&self) -> bool {
        self.pixel_format.flags & pixel::FOURCC != 0 && self.pixel_format.four_cc == FourCC::DX10
    }

    /// Whether the caps declare a cubemap.
    pub fn is_cubemap(&self) -> bool {
        self.caps2 & caps::CUBEMAP2 != 0
    }
}

/// DDS pixel format.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct DdsPixelFormat {
    /// Structure size (should be 32).
    pub size: u32,
    /// Pixel format flags.
    pub flags: u32,
    /// Four-character code for compression.
    pub four_cc: FourCC,
    /// Number of bits per pixel (for uncompressed).
    pub rgb_bit_count: u32,
    /// Red bit mask.
    pub r_bit_mask: u32,
    /// Green bit mask.
    pub g_bit_mask: u32,
    /// Blue bit mask.
    pub b_bit_mask: u32,
    /// Alpha bit mask.
    pub a_bit_mask: u32,
}

impl DdsPixelFormat {
    /// Expected structure size.
    pub const SIZE: u32 = 32;

    /// Set uncompressed channel masks.
    pub fn set_masks(&mut self, r: u32, g: u32, b: u32, a: u32) {
        self.r_bit_mask = r;
        self.g_bit_mask = g;
        self.b_bit_mask = b;
        self.a_bit_mask = a;
    }

    /// Channel masks as `(r, g, b, a)`.
    pub fn masks(&self) -> (u32, u32, u32, u32) {
        (self.r_bit_mask, self.g_bit_mask, self.b_bit_mask, self.a_bit_mask)
    }
}

/// Four-character code for compression type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(transparent)]
pub struct FourCC(pub [u8; 4]);

impl FourCC {
    /// DXT1 compression.
    pub const DXT1: Self = Self(*b"DXT1");
    /// DXT2 compression.
    pub const DXT2: Self = Self(*b"DXT2");
    /// DXT3 compression.
    pub const DXT3: Self = Self(*b"DXT3");
    /// DXT4 compression.
    pub const DXT4: Self = Self(*b"DXT4");
    /// DXT5 compression.
    pub const DXT5: Self = Self(*b"DXT5");
    /// ATI1 (single channel) compression.
    pub const ATI1: Self = Self(*b"ATI1");
    /// ATI2 (two channel) compression.
    pub const ATI2: Self = Self(*b"ATI2");
    /// BC4U compression.
    pub const BC4U: Self = Self(*b"BC4U");
    /// BC5U compression.
    pub const BC5U: Self = Self(*b"BC5U");
    /// DX10 extended header.
    pub const DX10: Self = Self(*b"DX10");
    /// D3DFMT_A16B16G16R16F, stored as a numeric code.
    pub const A16B16G16R16F: Self = Self(0x71u32.to_le_bytes());
    /// D3DFMT_A32B32G32R32F, stored as a numeric code.
    pub const A32B32G32R32F: Self = Self(0x74u32.to_le_bytes());
}

/// DX10 extended header.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout)]
#[repr(C, packed)]
pub struct DdsHeaderDxt10 {
    /// DXGI format.
    pub dxgi_format: u32,
    /// Resource dimension.
    pub resource_dimension: u32,
    /// Misc flags.
    pub misc_flag: u32,
    /// Array size.
    pub array_size: u32,
    /// Misc flags 2.
    pub misc_flags2: u32,
}

impl DdsHeaderDxt10 {
    /// `D3D10_RESOURCE_DIMENSION_TEXTURE2D`.
    pub const TEXTURE2D: u32 = 3;
    /// `D3D11_RESOURCE_MISC_TEXTURECUBE`.
    pub const MISC_TEXTURECUBE: u32 = 0x4;
}
