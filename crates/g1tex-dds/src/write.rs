//! DDS header synthesis.

use g1tex_format::{TextureDescriptor, TextureFormat};
use zerocopy::IntoBytes;

use crate::header::{caps, flags, pixel, DdsHeader, DdsHeaderDxt10, DdsPixelFormat, FourCC};
use crate::{dxgi, Error, Result, DDS_MAGIC};

/// Whether `descriptor` needs the DX10 extension header.
///
/// BC4 and later codecs have no legacy FourCC that every reader agrees on,
/// and texture arrays cannot be expressed without one.
pub fn needs_dx10(descriptor: &TextureDescriptor) -> bool {
    use TextureFormat::*;
    descriptor.is_array() || matches!(descriptor.format, Bc4 | Bc5 | Bc6h | Bc7 | Dx10)
}

/// Build the magic, header and optional DX10 header for `descriptor`.
///
/// Uncompressed formats are always described with canonical ARGB masks; the
/// payload must already be in that order.
pub fn header_bytes(descriptor: &TextureDescriptor) -> Result<Vec<u8>> {
    let format = descriptor.format;
    let dx10 = needs_dx10(descriptor);

    let mut header = DdsHeader::empty();
    header.flags = flags::TEXTURE | flags::LINEARSIZE;
    header.width = descriptor.width;
    header.height = descriptor.height;
    header.pitch_or_linear_size = linear_size(format, descriptor.width, descriptor.height);
    header.caps = caps::TEXTURE;
    if descriptor.mipmaps != 0 {
        header.mipmap_count = descriptor.mipmaps;
        header.flags |= flags::MIPMAP;
        header.caps |= caps::MIPMAP;
    }
    if descriptor.cubemap {
        header.caps |= caps::CUBEMAP;
        header.caps2 |= caps::ALL_FACES;
    }

    let pf = &mut header.pixel_format;
    if dx10 {
        pf.flags = pixel::FOURCC;
        pf.four_cc = FourCC::DX10;
    } else {
        describe_legacy(format, pf);
    }
    if descriptor.normal_map {
        pf.flags |= pixel::NORMAL;
    }

    let mut out = Vec::with_capacity(crate::MAX_HEADER_SIZE);
    out.extend_from_slice(DDS_MAGIC);
    out.extend_from_slice(header.as_bytes());

    if dx10 {
        let dxgi_format =
            dxgi::from_format(format, descriptor.srgb).ok_or(Error::NoDxgiFormat(format))?;
        let ext = DdsHeaderDxt10 {
            dxgi_format,
            resource_dimension: DdsHeaderDxt10::TEXTURE2D,
            misc_flag: if descriptor.cubemap {
                DdsHeaderDxt10::MISC_TEXTURECUBE
            } else {
                0
            },
            array_size: descriptor.frames.max(1),
            misc_flags2: 0,
        };
        out.extend_from_slice(ext.as_bytes());
    }
    Ok(out)
}

/// Build a complete DDS file from a descriptor and a frame-major payload.
pub fn write_dds(descriptor: &TextureDescriptor, payload: &[u8]) -> Result<Vec<u8>> {
    let mut out = header_bytes(descriptor)?;
    out.reserve_exact(payload.len());
    out.extend_from_slice(payload);
    Ok(out)
}

fn describe_legacy(format: TextureFormat, pf: &mut DdsPixelFormat) {
    use TextureFormat::*;
    match format {
        Bgr8 => {
            pf.flags = pixel::RGB;
            pf.rgb_bit_count = 24;
            pf.set_masks(0x00FF_0000, 0x0000_FF00, 0x0000_00FF, 0);
        }
        R8 => {
            pf.flags = pixel::RGB;
            pf.rgb_bit_count = 8;
            pf.set_masks(0xFF, 0, 0, 0);
        }
        Abgr4 | Argb4 | Grab4 | Rgba4 => {
            pf.flags = pixel::RGBA;
            pf.rgb_bit_count = 16;
            pf.set_masks(0x0F00, 0x00F0, 0x000F, 0xF000);
        }
        Abgr8 | Argb8 | Grab8 | Rgba8 => {
            pf.flags = pixel::RGBA;
            pf.rgb_bit_count = 32;
            pf.set_masks(0x00FF_0000, 0x0000_FF00, 0x0000_00FF, 0xFF00_0000);
        }
        Argb16 => set_fourcc(pf, FourCC::A16B16G16R16F),
        Argb32 => set_fourcc(pf, FourCC::A32B32G32R32F),
        Dxt1 => set_fourcc(pf, FourCC::DXT1),
        Dxt2 => set_fourcc(pf, FourCC::DXT2),
        Dxt3 => set_fourcc(pf, FourCC::DXT3),
        Dxt4 => set_fourcc(pf, FourCC::DXT4),
        Dxt5 => set_fourcc(pf, FourCC::DXT5),
        Ati1 => set_fourcc(pf, FourCC::ATI1),
        Ati2 => set_fourcc(pf, FourCC::ATI2),
        Bc4 | Bc5 | Bc6h | Bc7 | Dx10 => set_fourcc(pf, FourCC::DX10),
    }
}

fn set_fourcc(pf: &mut DdsPixelFormat, four_cc: FourCC) {
    pf.flags = pixel::FOURCC;
    pf.four_cc = four_cc;
}

/// `pitchOrLinearSize`: bytes of the top level for block codecs, otherwise
/// the top level's pixel count times its bytes per pixel.
/// Size of level 0, saturated to the 32-bit header field.
fn linear_size(format: TextureFormat, width: u32, height: u32) -> u32 {
    let (bw, bh) = format.block_dim();
    width
        .div_ceil(bw)
        .saturating_mul(height.div_ceil(bh))
        .saturating_mul(format.bytes_per_block())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header::DdsHeader;
    use zerocopy::FromBytes;

    fn header_of(bytes: &[u8]) -> DdsHeader {
        DdsHeader::read_from_bytes(&bytes[4..128]).unwrap()
    }

    #[test]
    fn test_linear_size_saturates() {
        assert_eq!(linear_size(TextureFormat::Dxt1, 8, 8), 32);
        assert_eq!(linear_size(TextureFormat::Argb32, u32::MAX, u32::MAX), u32::MAX);
    }

    #[test]
    fn test_argb8_header() {
        let desc = TextureDescriptor::new(TextureFormat::Rgba8, 4, 4);
        let bytes = header_bytes(&desc).unwrap();
        assert_eq!(bytes.len(), 128);
        assert_eq!(&bytes[..4], b"DDS ");

        let header = header_of(&bytes);
        assert_eq!({ header.size }, 124);
        assert_eq!({ header.flags }, 0x1007 | 0x80000 | 0x20000);
        assert_eq!({ header.pitch_or_linear_size }, 64);
        assert_eq!({ header.mipmap_count }, 1);
        assert_eq!({ header.pixel_format.flags }, pixel::RGBA);
        assert_eq!({ header.pixel_format.rgb_bit_count }, 32);
        assert_eq!(
            header.pixel_format.masks(),
            (0x00FF_0000, 0x0000_FF00, 0x0000_00FF, 0xFF00_0000)
        );
    }

    #[test]
    fn test_dxt1_uses_legacy_fourcc() {
        let desc = TextureDescriptor::new(TextureFormat::Dxt1, 256, 256).with_mipmaps(9);
        let bytes = header_bytes(&desc).unwrap();
        assert_eq!(bytes.len(), 128);
        let header = header_of(&bytes);
        assert_eq!({ header.pixel_format.four_cc }, FourCC::DXT1);
        assert_eq!({ header.pitch_or_linear_size }, 64 * 64 * 8);
        assert_eq!({ header.caps }, caps::TEXTURE | caps::MIPMAP);
    }

    #[test]
    fn test_bc7_srgb_gets_dx10_header() {
        let mut desc = TextureDescriptor::new(TextureFormat::Bc7, 64, 64);
        desc.srgb = true;
        let bytes = header_bytes(&desc).unwrap();
        assert_eq!(bytes.len(), 148);
        let ext = DdsHeaderDxt10::read_from_bytes(&bytes[128..]).unwrap();
        assert_eq!({ ext.dxgi_format }, dxgi::BC7_UNORM_SRGB);
        assert_eq!({ ext.resource_dimension }, 3);
        assert_eq!({ ext.array_size }, 1);
    }

    #[test]
    fn test_cubemap_array() {
        let desc = TextureDescriptor::new(TextureFormat::Dxt5, 32, 32)
            .with_frames(3)
            .with_cubemap(true);
        let bytes = header_bytes(&desc).unwrap();
        let header = header_of(&bytes);
        assert_eq!({ header.caps2 }, caps::ALL_FACES);
        assert!(header.is_dx10());
        let ext = DdsHeaderDxt10::read_from_bytes(&bytes[128..]).unwrap();
        assert_eq!({ ext.array_size }, 3);
        assert_eq!({ ext.misc_flag }, DdsHeaderDxt10::MISC_TEXTURECUBE);
        assert_eq!({ ext.dxgi_format }, dxgi::BC3_UNORM);
    }

    #[test]
    fn test_r8_and_float_formats() {
        let header = header_of(&header_bytes(&TextureDescriptor::new(TextureFormat::R8, 8, 8)).unwrap());
        assert_eq!({ header.pixel_format.flags }, pixel::RGB);
        assert_eq!({ header.pixel_format.rgb_bit_count }, 8);
        assert_eq!({ header.pixel_format.r_bit_mask }, 0xFF);

        let header =
            header_of(&header_bytes(&TextureDescriptor::new(TextureFormat::Argb16, 8, 8)).unwrap());
        assert_eq!({ header.pixel_format.four_cc }, FourCC::A16B16G16R16F);
        assert_eq!({ header.pitch_or_linear_size }, 8 * 8 * 8);
    }

    #[test]
    fn test_normal_map_flag() {
        let mut desc = TextureDescriptor::new(TextureFormat::Ati2, 16, 16);
        desc.normal_map = true;
        let header = header_of(&header_bytes(&desc).unwrap());
        assert_eq!({ header.pixel_format.flags }, pixel::FOURCC | pixel::NORMAL);
    }

    #[test]
    fn test_bgr8_array_has_no_dxgi_format() {
        let desc = TextureDescriptor::new(TextureFormat::Bgr8, 8, 8).with_frames(2);
        assert!(matches!(
            header_bytes(&desc),
            Err(Error::NoDxgiFormat(TextureFormat::Bgr8))
        ));
    }

    #[test]
    fn test_write_appends_payload() {
        let desc = TextureDescriptor::new(TextureFormat::Argb8, 2, 2);
        let payload = [7u8; 16];
        let bytes = write_dds(&desc, &payload).unwrap();
        assert_eq!(bytes.len(), 128 + 16);
        assert_eq!(&bytes[128..], &payload);
    }
}
