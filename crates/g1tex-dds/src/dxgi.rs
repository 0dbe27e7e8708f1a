//! DXGI format codes used in the DX10 extension header.

use g1tex_format::TextureFormat;

pub const R32G32B32A32_FLOAT: u32 = 2;
pub const R16G16B16A16_FLOAT: u32 = 10;
pub const R8_UNORM: u32 = 61;
pub const BC1_TYPELESS: u32 = 70;
pub const BC1_UNORM: u32 = 71;
pub const BC1_UNORM_SRGB: u32 = 72;
pub const BC2_TYPELESS: u32 = 73;
pub const BC2_UNORM: u32 = 74;
pub const BC2_UNORM_SRGB: u32 = 75;
pub const BC3_TYPELESS: u32 = 76;
pub const BC3_UNORM: u32 = 77;
pub const BC3_UNORM_SRGB: u32 = 78;
pub const BC4_TYPELESS: u32 = 79;
pub const BC4_UNORM: u32 = 80;
pub const BC5_TYPELESS: u32 = 82;
pub const BC5_UNORM: u32 = 83;
pub const B8G8R8A8_UNORM: u32 = 87;
pub const B8G8R8A8_UNORM_SRGB: u32 = 91;
pub const BC6H_TYPELESS: u32 = 94;
pub const BC6H_UF16: u32 = 95;
pub const BC6H_SF16: u32 = 96;
pub const BC7_TYPELESS: u32 = 97;
pub const BC7_UNORM: u32 = 98;
pub const BC7_UNORM_SRGB: u32 = 99;
pub const B4G4R4A4_UNORM: u32 = 115;

/// DXGI code for `format`, choosing the sRGB variant when one exists.
///
/// Returns `None` for formats with no DXGI equivalent (24-bit BGR).
pub fn from_format(format: TextureFormat, srgb: bool) -> Option<u32> {
    use TextureFormat::*;
    let pick = |linear, gamma| if srgb { gamma } else { linear };
    Some(match format {
        Dxt1 => pick(BC1_UNORM, BC1_UNORM_SRGB),
        Dxt2 | Dxt3 => pick(BC2_UNORM, BC2_UNORM_SRGB),
        Dxt4 | Dxt5 => pick(BC3_UNORM, BC3_UNORM_SRGB),
        Bc4 | Ati1 => BC4_UNORM,
        Bc5 | Ati2 => BC5_UNORM,
        Bc6h => BC6H_UF16,
        Bc7 | Dx10 => pick(BC7_UNORM, BC7_UNORM_SRGB),
        Abgr8 | Argb8 | Grab8 | Rgba8 => pick(B8G8R8A8_UNORM, B8G8R8A8_UNORM_SRGB),
        Abgr4 | Argb4 | Grab4 | Rgba4 => B4G4R4A4_UNORM,
        R8 => R8_UNORM,
        Argb16 => R16G16B16A16_FLOAT,
        Argb32 => R32G32B32A32_FLOAT,
        Bgr8 => return None,
    })
}

/// Format and sRGB flag of a DXGI code, or `None` when unsupported.
pub fn to_format(code: u32) -> Option<(TextureFormat, bool)> {
    use TextureFormat::*;
    Some(match code {
        BC1_TYPELESS | BC1_UNORM => (Dxt1, false),
        BC1_UNORM_SRGB => (Dxt1, true),
        BC2_TYPELESS | BC2_UNORM => (Dxt3, false),
        BC2_UNORM_SRGB => (Dxt3, true),
        BC3_TYPELESS | BC3_UNORM => (Dxt5, false),
        BC3_UNORM_SRGB => (Dxt5, true),
        BC4_TYPELESS | BC4_UNORM => (Bc4, false),
        BC5_TYPELESS | BC5_UNORM => (Bc5, false),
        BC6H_TYPELESS | BC6H_UF16 | BC6H_SF16 => (Bc6h, false),
        BC7_TYPELESS | BC7_UNORM => (Bc7, false),
        BC7_UNORM_SRGB => (Bc7, true),
        B8G8R8A8_UNORM => (Argb8, false),
        B8G8R8A8_UNORM_SRGB => (Argb8, true),
        B4G4R4A4_UNORM => (Argb4, false),
        R8_UNORM => (R8, false),
        R16G16B16A16_FLOAT => (Argb16, false),
        R32G32B32A32_FLOAT => (Argb32, false),
        _ => return None,
    })
}
