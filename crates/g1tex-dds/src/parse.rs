//! DDS header parsing.

use g1tex_common::BinaryReader;
use g1tex_format::{TextureDescriptor, TextureFormat};

use crate::header::{caps, flags, pixel, DdsHeader, DdsHeaderDxt10, DdsPixelFormat, FourCC};
use crate::{dxgi, Error, Result, DDS_MAGIC};

/// A parsed DDS header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DdsInfo {
    /// Texture described by the headers.
    pub descriptor: TextureDescriptor,
    /// Offset of the first payload byte.
    pub payload_offset: usize,
    /// DXGI code when a DX10 header is present.
    pub dxgi_format: Option<u32>,
}

impl DdsInfo {
    /// Payload bytes of `data`, the buffer this info was parsed from.
    pub fn payload<'a>(&self, data: &'a [u8]) -> &'a [u8] {
        &data[self.payload_offset.min(data.len())..]
    }
}

/// Parse the headers of a DDS file.
///
/// The payload is not validated against the computed chain size; callers
/// decide how to reconcile the two.
pub fn parse(data: &[u8]) -> Result<DdsInfo> {
    let mut reader = BinaryReader::new(data);

    let magic: [u8; 4] = reader.read_array()?;
    if &magic != DDS_MAGIC {
        return Err(Error::InvalidMagic(magic));
    }

    let header: DdsHeader = reader.read_struct()?;
    let (size, width, height) = (header.size, header.width, header.height);
    if size != DdsHeader::SIZE {
        return Err(Error::InvalidHeader(format!(
            "header size {size} (expected {})",
            DdsHeader::SIZE
        )));
    }
    if width == 0 || height == 0 {
        return Err(Error::InvalidHeader(format!(
            "empty dimensions {width}x{height}"
        )));
    }

    let mut cubemap = false;
    if header.is_cubemap() {
        let faces = header.caps2 & caps::ALL_FACES;
        if faces != caps::ALL_FACES {
            return Err(Error::MissingCubeFaces(faces));
        }
        cubemap = true;
    }

    let pf = header.pixel_format;
    let mut frames = 1;
    let mut srgb = false;
    let mut dxgi_format = None;
    let format = if header.is_dx10() {
        let ext: DdsHeaderDxt10 = reader.read_struct()?;
        let code = ext.dxgi_format;
        let (format, is_srgb) = dxgi::to_format(code).ok_or(Error::UnknownDxgiFormat(code))?;
        frames = ext.array_size.max(1);
        cubemap |= ext.misc_flag & DdsHeaderDxt10::MISC_TEXTURECUBE != 0;
        srgb = is_srgb;
        dxgi_format = Some(code);
        format
    } else if pf.flags & pixel::FOURCC != 0 {
        from_fourcc(pf.four_cc)?
    } else if pf.flags & pixel::RGB != 0 {
        from_masks(&pf)?
    } else {
        return Err(Error::InvalidHeader(format!(
            "unsupported pixel format flags {:#x}",
            { pf.flags }
        )));
    };

    let mipmaps = if header.flags & flags::MIPMAP != 0 {
        header.mipmap_count.max(1)
    } else {
        1
    };

    let mut descriptor = TextureDescriptor::new(format, width, height)
        .with_mipmaps(mipmaps)
        .with_frames(frames)
        .with_cubemap(cubemap);
    descriptor.srgb = srgb;
    descriptor.normal_map = pf.flags & pixel::NORMAL != 0;

    Ok(DdsInfo {
        descriptor,
        payload_offset: reader.position(),
        dxgi_format,
    })
}

fn from_fourcc(four_cc: FourCC) -> Result<TextureFormat> {
    Ok(match four_cc {
        FourCC::DXT1 => TextureFormat::Dxt1,
        FourCC::DXT2 => TextureFormat::Dxt2,
        FourCC::DXT3 => TextureFormat::Dxt3,
        FourCC::DXT4 => TextureFormat::Dxt4,
        FourCC::DXT5 => TextureFormat::Dxt5,
        FourCC::ATI1 => TextureFormat::Ati1,
        FourCC::ATI2 => TextureFormat::Ati2,
        FourCC::BC4U => TextureFormat::Bc4,
        FourCC::BC5U => TextureFormat::Bc5,
        FourCC::A16B16G16R16F => TextureFormat::Argb16,
        FourCC::A32B32G32R32F => TextureFormat::Argb32,
        other => return Err(Error::UnknownFourCc(other.0)),
    })
}

/// Uncompressed formats are only accepted with the canonical masks written
/// by [`crate::write_dds`].
fn from_masks(pf: &DdsPixelFormat) -> Result<TextureFormat> {
    let bits = pf.rgb_bit_count;
    let has_alpha = pf.flags & pixel::ALPHAPIXELS != 0;
    let (r, g, b, a) = pf.masks();

    let expected = match bits {
        8 => (TextureFormat::R8, (0xFF, 0, 0, 0)),
        16 if has_alpha => (TextureFormat::Argb4, (0x0F00, 0x00F0, 0x000F, 0xF000)),
        24 if !has_alpha => (TextureFormat::Bgr8, (0x00FF_0000, 0x0000_FF00, 0x0000_00FF, 0)),
        32 if has_alpha => (
            TextureFormat::Argb8,
            (0x00FF_0000, 0x0000_FF00, 0x0000_00FF, 0xFF00_0000),
        ),
        16 | 24 | 32 => return Err(Error::BadChannelMask { bits, r, g, b, a }),
        _ => return Err(Error::UnsupportedBitDepth(bits)),
    };
    if expected.1 != (r, g, b, a) {
        return Err(Error::BadChannelMask { bits, r, g, b, a });
    }
    Ok(expected.0)
}
