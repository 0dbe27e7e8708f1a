//! G1T texture entry headers.
//!
//! Every texture in a G1T archive starts with an 8-byte header:
//!
//! | Byte | Content                                   |
//! |------|-------------------------------------------|
//! | 0    | mipmap count and z-mipmap count (nibbles) |
//! | 1    | type code                                 |
//! | 2    | log2 width and log2 height (nibbles)      |
//! | 3..8 | flag bytes                                |
//!
//! Little-endian archives store both nibble pairs low nibble first and
//! swap the nibbles of every flag byte. Big-endian archives keep the flag
//! bytes as they are and store the nibble pairs high nibble first.
//!
//! When the extended data flag is set, the header is followed by a local
//! extra data block of 12, 16 or 20 bytes.
//!
//! The archive also keeps one 32-bit global flag word per texture in a table
//! after its main header. [`Entry::flags`] places that word above the five
//! flag bytes, which is where the normal map bits live.

use g1tex_common::{BinaryReader, Endian};
use g1tex_format::{Platform, TextureDescriptor};

use crate::profile::{FormatProfile, TextureKind};
use crate::{Error, Result};

/// Size of the fixed entry header.
pub const ENTRY_HEADER_SIZE: usize = 8;

/// Bits of the combined flag word returned by [`Entry::flags`].
pub mod flags {
    /// A local extra data block follows the header.
    pub const EXTENDED_DATA: u64 = 0x0000_0000_0001;
    /// Colour data is sRGB.
    pub const SRGB: u64 = 0x0000_0000_2000;
    /// Set on most textures.
    pub const STANDARD: u64 = 0x0000_0001_1200;
    /// Usually set on normal maps. Lives in the global flag word.
    pub const NORMAL_MAP: u64 = 0x0300_0000_0000;

    /// Position of the global flag word.
    pub const GLOBAL_SHIFT: u32 = 40;
    /// The five entry flag bytes.
    pub const ENTRY_MASK: u64 = (1 << GLOBAL_SHIFT) - 1;
}

/// Frame count bits of [`ExtraData::flags`].
pub const TEXTURE_ARRAY_MASK: u32 = 0xF00F_0000;

/// Global flag words must leave room for the entry flag bytes.
const GLOBAL_FLAGS_LIMIT: u32 = 0x00FF_FFFF;

/// Decoded per-texture header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntryHeader {
    /// Number of mipmap levels.
    pub mipmaps: u8,
    /// Number of depth mipmap levels.
    pub z_mipmaps: u8,
    /// Type code.
    pub type_code: u8,
    /// log2 of the width.
    pub dx: u8,
    /// log2 of the height.
    pub dy: u8,
    /// Flag bytes, nibble order normalized.
    pub flags: [u8; 5],
}

impl EntryHeader {
    /// Decode a header stored with `endian` metadata.
    pub fn decode(bytes: [u8; ENTRY_HEADER_SIZE], endian: Endian) -> Self {
        let (lo0, hi0) = (bytes[0] & 0x0F, bytes[0] >> 4);
        let (lo2, hi2) = (bytes[2] & 0x0F, bytes[2] >> 4);
        let mut flags = [0u8; 5];
        flags.copy_from_slice(&bytes[3..]);
        match endian {
            Endian::Little => {
                for b in &mut flags {
                    *b = b.rotate_left(4);
                }
                Self {
                    mipmaps: hi0,
                    z_mipmaps: lo0,
                    type_code: bytes[1],
                    dx: lo2,
                    dy: hi2,
                    flags,
                }
            }
            Endian::Big => Self {
                mipmaps: lo0,
                z_mipmaps: hi0,
                type_code: bytes[1],
                dx: hi2,
                dy: lo2,
                flags,
            },
        }
    }

    /// Encode for an archive with `endian` metadata.
    pub fn encode(&self, endian: Endian) -> [u8; ENTRY_HEADER_SIZE] {
        let mut out = [0u8; ENTRY_HEADER_SIZE];
        out[1] = self.type_code;
        out[3..].copy_from_slice(&self.flags);
        match endian {
            Endian::Little => {
                out[0] = (self.mipmaps << 4) | (self.z_mipmaps & 0x0F);
                out[2] = (self.dy << 4) | (self.dx & 0x0F);
                for b in &mut out[3..] {
                    *b = b.rotate_left(4);
                }
            }
            Endian::Big => {
                out[0] = (self.z_mipmaps << 4) | (self.mipmaps & 0x0F);
                out[2] = (self.dx << 4) | (self.dy & 0x0F);
            }
        }
        out
    }


    /// The five flag bytes as one big-endian word.
    pub fn flag_word(&self) -> u64 {
        self.flags.iter().fold(0u64, |acc, b| (acc << 8) | *b as u64)
    }

    /// Replace the flag bytes from a big-endian word.
    pub fn set_flag_word(&mut self, word: u64) {
        for (i, b) in self.flags.iter_mut().enumerate() {
            *b = (word >> (8 * (4 - i))) as u8;
        }
    }

    /// Whether an extra data block follows.
    pub fn has_extra_data(&self) -> bool {
        self.flag_word() & flags::EXTENDED_DATA != 0
    }
}

/// A texture entry: header, optional extra data and the archive's global
/// flag word for the texture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Entry {
    pub header: EntryHeader,
    pub extra: Option<ExtraData>,
    /// Word from the archive's global flag table.
    pub global_flags: u32,
}

impl Entry {
    /// Read a header and its extra data block, if any.
    ///
    /// `global_flags` is the texture's word from the archive's flag table.
    pub fn read(reader: &mut BinaryReader<'_>, global_flags: u32) -> Result<Self> {
        if global_flags > GLOBAL_FLAGS_LIMIT {
            return Err(Error::InvalidEntry(format!(
                "global flags 0x{global_flags:08x} overlap the entry flag bytes"
            )));
        }
        let header = EntryHeader::decode(reader.read_array()?, reader.endian());
        if header.mipmaps == 0 {
            return Err(Error::InvalidEntry("mipmap count is 0".into()));
        }
        let extra = if header.has_extra_data() {
            Some(ExtraData::read(reader)?)
        } else {
            None
        };
        Ok(Self {
            header,
            extra,
            global_flags,
        })
    }

    /// Header and extra data bytes for an archive with `endian` metadata.
    ///
    /// The global flag word is not included; it belongs in the archive's
    /// flag table.
    pub fn encode(&self, endian: Endian) -> Vec<u8> {
        let mut out = self.header.encode(endian).to_vec();
        if let Some(extra) = &self.extra {
            out.extend(extra.encode(endian));
        }
        out
    }

    /// Global flags above the entry flag bytes.
    pub fn flags(&self) -> u64 {
        ((self.global_flags as u64) << flags::GLOBAL_SHIFT) | self.header.flag_word()
    }

    /// Split a combined flag word back into the header and global flags.
    pub fn set_flags(&mut self, word: u64) {
        self.header.set_flag_word(word & flags::ENTRY_MASK);
        self.global_flags = (word >> flags::GLOBAL_SHIFT) as u32 & GLOBAL_FLAGS_LIMIT;
    }

    /// Describe the texture, resolving the type code with `profile`.
    ///
    /// Width and height come from the extra data when present, otherwise
    /// from the log2 fields.
    pub fn descriptor(&self, platform: Platform, profile: FormatProfile) -> Result<TextureDescriptor> {
        let header = &self.header;
        let kind = TextureKind::resolve(profile, platform, header.type_code)?;
        if header.dx >= 16 || header.dy >= 16 {
            return Err(Error::InvalidEntry(format!(
                "dimension exponents {}x{} out of range",
                header.dx, header.dy
            )));
        }
        let mut width = 1u32 << header.dx;
        let mut height = 1u32 << header.dy;
        let mut frames = 1;
        if let Some(extra) = &self.extra {
            width = extra.width.unwrap_or(width);
            height = extra.height.unwrap_or(height);
            frames = extra.frames().max(1);
        }
        let word = self.flags();
        let mut descriptor = TextureDescriptor::new(kind.format, width, height)
            .with_platform(platform)
            .with_mipmaps(header.mipmaps as u32)
            .with_frames(frames);
        descriptor.srgb = word & flags::SRGB != 0;
        descriptor.normal_map = word & flags::NORMAL_MAP != 0;
        Ok(descriptor)
    }

    /// A fresh entry for a packed texture.
    pub fn for_texture(type_code: u8, descriptor: &TextureDescriptor) -> Result<Self> {
        let mut entry = Self {
            header: EntryHeader {
                type_code,
                ..EntryHeader::default()
            },
            ..Self::default()
        };
        entry.set_flags(flags::STANDARD);
        entry.update(descriptor)?;
        Ok(entry)
    }

    /// Point the entry at a repacked texture.
    ///
    /// Mipmaps, dimensions and frames follow `descriptor`, and the sRGB and
    /// normal map bits are set when it asks for them. The type code, z-mipmaps,
    /// depth and every other flag are kept. Dimensions that are not powers of
    /// two are carried in the extra data.
    pub fn update(&mut self, descriptor: &TextureDescriptor) -> Result<()> {
        let (width, height) = (descriptor.width, descriptor.height);
        if descriptor.mipmaps == 0 || descriptor.mipmaps > 0x0F {
            return Err(Error::InvalidEntry(format!(
                "{} mipmaps do not fit in a nibble",
                descriptor.mipmaps
            )));
        }
        let pow2 = width.is_power_of_two() && height.is_power_of_two();
        let (dx, dy) = if pow2 {
            (width.ilog2(), height.ilog2())
        } else {
            (0, 0)
        };
        if dx > 0x0F || dy > 0x0F {
            return Err(Error::InvalidEntry(format!(
                "{width}x{height} does not fit in the log2 size nibbles"
            )));
        }
        self.header.mipmaps = descriptor.mipmaps as u8;
        self.header.dx = dx as u8;
        self.header.dy = dy as u8;

        let mut word = self.flags();
        if descriptor.srgb {
            word |= flags::SRGB;
        }
        if descriptor.normal_map {
            word |= flags::NORMAL_MAP;
        }
        if !pow2 || descriptor.frames > 1 || self.extra.is_some() {
            word |= flags::EXTENDED_DATA;
            let mut extra = self.extra.unwrap_or_default();
            extra.set_frames(descriptor.frames);
            if pow2 {
                extra.width = None;
                extra.height = None;
            } else {
                extra.width = Some(width);
                extra.height = Some(height);
            }
            self.extra = Some(extra);
        } else {
            word &= !flags::EXTENDED_DATA;
        }
        self.set_flags(word);
        Ok(())
    }
}

/// Local extra data block following an entry header.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtraData {
    /// Depth of volume textures; zero otherwise.
    pub depth: f32,
    /// Array and misc flags, always stored big-endian.
    pub flags: u32,
    /// Actual width when it is not a power of two.
    pub width: Option<u32>,
    /// Actual height when it is not a power of two.
    pub height: Option<u32>,
}

impl ExtraData {
    /// Read a block in the reader's byte order.
    pub fn read(reader: &mut BinaryReader<'_>) -> Result<Self> {
        let size = reader.read_u32()?;
        if !matches!(size, 0x0C | 0x10 | 0x14) {
            return Err(Error::InvalidEntry(format!(
                "extra data size 0x{size:x} (expected 0x0c, 0x10 or 0x14)"
            )));
        }
        let depth = reader.read_f32()?;
        let flags = reader.read_u32_be()?;
        let width = if size >= 0x10 { Some(reader.read_u32()?) } else { None };
        let height = if size >= 0x14 { Some(reader.read_u32()?) } else { None };
        Ok(Self {
            depth,
            flags,
            width,
            height,
        })
    }

    /// Encoded size in bytes.
    pub fn size(&self) -> u32 {
        if self.height.is_some() {
            0x14
        } else if self.width.is_some() {
            0x10
        } else {
            0x0C
        }
    }

    /// Encode in `endian` byte order.
    pub fn encode(&self, endian: Endian) -> Vec<u8> {
        let size = self.size();
        let mut out = vec![0u8; size as usize];
        endian.write_u32(&mut out[0..4], size);
        endian.write_u32(&mut out[4..8], self.depth.to_bits());
        Endian::Big.write_u32(&mut out[8..12], self.flags);
        if size >= 0x10 {
            endian.write_u32(&mut out[12..16], self.width.unwrap_or(0));
        }
        if size >= 0x14 {
            endian.write_u32(&mut out[16..20], self.height.unwrap_or(0));
        }
        out
    }

    /// Frames in the texture array.
    pub fn frames(&self) -> u32 {
        ((self.flags >> 28) & 0x0F) + ((self.flags >> 12) & 0xF0)
    }

    /// Store `frames` in the array bits, keeping the other flags.
    ///
    /// Counts above 255 do not fit and keep only their low byte.
    pub fn set_frames(&mut self, frames: u32) {
        let bits = if frames <= 1 {
            0
        } else {
            ((frames & 0x0F) << 28) | ((frames & 0xF0) << 12)
        };
        self.flags = (self.flags & !TEXTURE_ARRAY_MASK) | bits;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use g1tex_format::TextureFormat;

    fn round_trip(entry: &Entry, endian: Endian) -> Entry {
        let bytes = entry.encode(endian);
        let mut reader = BinaryReader::with_endian(&bytes, endian);
        let read = Entry::read(&mut reader, entry.global_flags).unwrap();
        assert!(reader.is_empty());
        read
    }

    #[test]
    fn test_decode_little_endian() {
        // 10 mips, type 0x59, 256x128, flags 0x00_0001_1200 stored nibble-swapped.
        let bytes = [0xA0, 0x59, 0x78, 0x00, 0x00, 0x10, 0x21, 0x00];
        let header = EntryHeader::decode(bytes, Endian::Little);
        assert_eq!(header.mipmaps, 10);
        assert_eq!(header.z_mipmaps, 0);
        assert_eq!(header.type_code, 0x59);
        assert_eq!((header.dx, header.dy), (8, 7));
        assert_eq!(header.flag_word(), flags::STANDARD);
        assert_eq!(header.encode(Endian::Little), bytes);
    }

    #[test]
    fn test_decode_big_endian_swaps_pairs() {
        let bytes = [0x0A, 0x08, 0x87, 0x00, 0x00, 0x01, 0x12, 0x00];
        let header = EntryHeader::decode(bytes, Endian::Big);
        assert_eq!(header.mipmaps, 10);
        assert_eq!((header.dx, header.dy), (8, 7));
        assert_eq!(header.flag_word(), flags::STANDARD);
        assert_eq!(header.encode(Endian::Big), bytes);
    }

    #[test]
    fn test_frame_count_formula() {
        let extra = ExtraData {
            flags: 0x1001_0000,
            ..ExtraData::default()
        };
        assert_eq!(extra.frames(), 0x11);
        for frames in [2, 6, 15, 16, 200] {
            let mut extra = ExtraData {
                flags: 0x0000_0101,
                ..ExtraData::default()
            };
            extra.set_frames(frames);
            assert_eq!(extra.frames(), frames);
            assert_eq!(extra.flags & !TEXTURE_ARRAY_MASK, 0x0000_0101);
        }
    }

    #[test]
    fn test_read_with_extra_data() {
        let mut entry = Entry::default();
        entry.header.mipmaps = 1;
        entry.header.type_code = 0x01;
        entry.set_flags(flags::STANDARD | flags::EXTENDED_DATA);
        let mut extra = ExtraData {
            width: Some(300),
            height: Some(200),
            ..ExtraData::default()
        };
        extra.set_frames(4);
        entry.extra = Some(extra);
        assert_eq!(entry.encode(Endian::Big).len(), 8 + 0x14);

        let read = round_trip(&entry, Endian::Big);
        assert_eq!(read, entry);
        let desc = read.descriptor(Platform::Ps3, FormatProfile::Extract).unwrap();
        assert_eq!(desc.format, TextureFormat::Rgba8);
        assert_eq!((desc.width, desc.height, desc.frames), (300, 200, 4));
    }

    #[test]
    fn test_normal_map_bits_come_from_global_flags() {
        let mut entry = Entry::for_texture(0x5B, &TextureDescriptor::new(TextureFormat::Dxt5, 64, 64)).unwrap();
        let plain = entry.descriptor(Platform::Windows, FormatProfile::Extract).unwrap();
        assert!(!plain.normal_map);

        // Low bits of the first entry flag byte are not the normal map flag.
        entry.header.flags[0] = 0x03;
        let desc = entry.descriptor(Platform::Windows, FormatProfile::Extract).unwrap();
        assert!(!desc.normal_map);

        entry.global_flags = 0x03;
        let desc = entry.descriptor(Platform::Windows, FormatProfile::Extract).unwrap();
        assert!(desc.normal_map);
    }

    #[test]
    fn test_normal_map_written_to_global_flags() {
        let mut desc = TextureDescriptor::new(TextureFormat::Ati2, 128, 128);
        desc.normal_map = true;
        let entry = Entry::for_texture(0x5B, &desc).unwrap();
        assert_eq!(entry.global_flags, 0x03);
        assert_eq!(entry.header.flag_word(), flags::STANDARD);
        assert_eq!(entry.flags() & flags::NORMAL_MAP, flags::NORMAL_MAP);
    }

    #[test]
    fn test_oversized_global_flags_rejected() {
        let bytes = [0xA0, 0x59, 0x78, 0x00, 0x00, 0x10, 0x21, 0x00];
        let mut reader = BinaryReader::new(&bytes);
        assert!(matches!(
            Entry::read(&mut reader, 0x0100_0000),
            Err(Error::InvalidEntry(_))
        ));
    }

    #[test]
    fn test_rejects_bad_extra_size() {
        let bytes = 0x18u32.to_le_bytes();
        let mut reader = BinaryReader::new(&bytes);
        assert!(matches!(
            ExtraData::read(&mut reader),
            Err(Error::InvalidEntry(_))
        ));
    }

    #[test]
    fn test_zero_mipmaps_rejected() {
        let bytes = [0x00, 0x59, 0x78, 0, 0, 0, 0, 0];
        let mut reader = BinaryReader::new(&bytes);
        assert!(matches!(
            Entry::read(&mut reader, 0),
            Err(Error::InvalidEntry(_))
        ));
    }

    #[test]
    fn test_for_texture_power_of_two() {
        let mut desc = TextureDescriptor::new(TextureFormat::Dxt5, 512, 256).with_mipmaps(10);
        desc.srgb = true;
        let entry = Entry::for_texture(0x5B, &desc).unwrap();
        assert_eq!((entry.header.dx, entry.header.dy, entry.header.mipmaps), (9, 8, 10));
        assert!(entry.extra.is_none());
        assert_eq!(entry.flags(), flags::STANDARD | flags::SRGB);

        let read = round_trip(&entry, Endian::Little);
        assert_eq!(read.descriptor(Platform::Windows, FormatProfile::Extract).unwrap(), desc);
    }

    #[test]
    fn test_for_texture_keeps_both_odd_dimensions() {
        for (width, height, endian) in [
            (640, 256, Endian::Little),
            (256, 96, Endian::Big),
            (300, 200, Endian::Little),
        ] {
            let platform = if endian == Endian::Big {
                Platform::Ps3
            } else {
                Platform::Windows
            };
            let desc = TextureDescriptor::new(TextureFormat::Dxt5, width, height)
                .with_platform(platform)
                .with_mipmaps(3);
            let entry = Entry::for_texture(0x5B, &desc).unwrap();
            assert!(entry.header.has_extra_data());
            assert_eq!(entry.extra.unwrap().size(), 0x14);

            let read = round_trip(&entry, endian);
            let back = read.descriptor(platform, FormatProfile::Extract).unwrap();
            assert_eq!((back.width, back.height, back.mipmaps), (width, height, 3));
        }
    }

    #[test]
    fn test_for_texture_rejects_wide_exponents() {
        let desc = TextureDescriptor::new(TextureFormat::Dxt1, 1 << 16, 4);
        assert!(matches!(
            Entry::for_texture(0x59, &desc),
            Err(Error::InvalidEntry(_))
        ));
    }

    #[test]
    fn test_update_keeps_unrelated_fields() {
        let mut entry = Entry::for_texture(0x5B, &TextureDescriptor::new(TextureFormat::Dxt5, 64, 64)).unwrap();
        entry.header.z_mipmaps = 2;
        entry.global_flags = 0x10;
        entry.set_flags(entry.flags() | flags::EXTENDED_DATA);
        entry.extra = Some(ExtraData {
            depth: 1.5,
            flags: 0x0000_0100,
            ..ExtraData::default()
        });
        let entry = round_trip(&entry, Endian::Little);

        let mut updated = entry;
        let desc = TextureDescriptor::new(TextureFormat::Dxt5, 128, 32)
            .with_mipmaps(4)
            .with_frames(3);
        updated.update(&desc).unwrap();
        let updated = round_trip(&updated, Endian::Little);

        assert_eq!(updated.header.type_code, 0x5B);
        assert_eq!(updated.header.z_mipmaps, 2);
        assert_eq!(updated.global_flags, 0x10);
        let extra = updated.extra.unwrap();
        assert_eq!(extra.depth, 1.5);
        assert_eq!(extra.flags & !TEXTURE_ARRAY_MASK, 0x0000_0100);
        let back = updated.descriptor(Platform::Windows, FormatProfile::Extract).unwrap();
        assert_eq!((back.width, back.height, back.mipmaps, back.frames), (128, 32, 4, 3));
    }
}
