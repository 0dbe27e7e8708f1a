//! Texture type codes and per-platform conventions.
//!
//! A G1T entry names its pixel layout with a one-byte type code. The code
//! alone is not enough: several codes mean "the platform's default 32-bit
//! format", and whether the pixels are swizzled, and how, depends on the
//! platform the archive targets.

use std::fmt;
use std::str::FromStr;

use g1tex_format::{Platform, TextureFormat};
use g1tex_swizzle::morton;

use crate::{Error, Result};

/// Generation of the type table to resolve codes against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum FormatProfile {
    /// Codes seen when reading shipped archives.
    #[default]
    Extract,
    /// Extraction codes plus the DXT3 variants accepted when rebuilding.
    Repack,
}

impl fmt::Display for FormatProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FormatProfile::Extract => "extract",
            FormatProfile::Repack => "repack",
        })
    }
}

impl FromStr for FormatProfile {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, String> {
        match s.to_ascii_lowercase().as_str() {
            "extract" => Ok(FormatProfile::Extract),
            "repack" => Ok(FormatProfile::Repack),
            other => Err(format!("unknown profile '{other}' (expected extract or repack)")),
        }
    }
}

/// Format slot of a type table row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Slot {
    /// The platform's default 32-bit format.
    Default,
    Fixed(TextureFormat),
}

/// One row of the type table.
struct TypeRow {
    code: u8,
    slot: Slot,
    swizzled: bool,
    repack_only: bool,
}

const fn row(code: u8, slot: Slot, swizzled: bool) -> TypeRow {
    TypeRow {
        code,
        slot,
        swizzled,
        repack_only: false,
    }
}

const fn repack(code: u8, slot: Slot, swizzled: bool) -> TypeRow {
    TypeRow {
        code,
        slot,
        swizzled,
        repack_only: true,
    }
}

use Slot::{Default as Native, Fixed};
use TextureFormat::*;

const TYPE_TABLE: &[TypeRow] = &[
    row(0x00, Native, false),
    row(0x01, Native, false),
    row(0x02, Native, false),
    row(0x03, Fixed(Argb16), false),
    row(0x04, Fixed(Argb32), false),
    row(0x06, Fixed(Dxt1), false),
    repack(0x07, Fixed(Dxt3), false),
    row(0x08, Fixed(Dxt5), false),
    row(0x09, Native, true),
    row(0x10, Fixed(Dxt1), true),
    repack(0x11, Fixed(Dxt3), true),
    row(0x12, Fixed(Dxt5), true),
    row(0x21, Native, false),
    row(0x3C, Fixed(Argb4), false),
    row(0x3D, Fixed(Argb4), false),
    row(0x45, Fixed(Bgr8), true),
    row(0x59, Fixed(Dxt1), false),
    repack(0x5A, Fixed(Dxt3), false),
    row(0x5B, Fixed(Dxt5), false),
    row(0x5C, Fixed(Bc4), false),
    row(0x5E, Fixed(Bc6h), false),
    row(0x5F, Fixed(Bc7), false),
    row(0x60, Fixed(Dxt1), true),
    repack(0x61, Fixed(Dxt3), true),
    row(0x62, Fixed(Dxt5), true),
    // Not BC7 on the console; the closest format that still decodes.
    row(0x72, Fixed(Bc7), false),
];

/// A type code resolved against a platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextureKind {
    /// Raw type code.
    pub code: u8,
    /// Native pixel format.
    pub format: TextureFormat,
    /// Pixels are in a Morton-swizzled order.
    pub swizzled: bool,
    /// Rows are stored bottom-up.
    pub flipped: bool,
}

impl TextureKind {
    /// Resolve `code` for `platform` using the `profile` type table.
    pub fn resolve(profile: FormatProfile, platform: Platform, code: u8) -> Result<Self> {
        let row = TYPE_TABLE
            .iter()
            .find(|r| r.code == code && (profile == FormatProfile::Repack || !r.repack_only))
            .ok_or(Error::UnknownType {
                code,
                platform,
                profile,
            })?;
        let format = match row.slot {
            Slot::Default => default_format(platform),
            Slot::Fixed(format) => format,
        };
        Ok(Self {
            code,
            format,
            swizzled: row.swizzled,
            flipped: platform == Platform::N3ds && matches!(code, 0x09 | 0x45),
        })
    }
}

/// The 32-bit format a platform uses when a type code does not name one.
pub fn default_format(platform: Platform) -> TextureFormat {
    match platform {
        Platform::Ds | Platform::N3ds | Platform::Ps4 => TextureFormat::Grab8,
        Platform::Vita | Platform::Switch => TextureFormat::Argb8,
        _ => TextureFormat::Rgba8,
    }
}

/// Morton layout of a platform's swizzled textures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MortonLayout {
    /// Order at mip level 0.
    pub order: u32,
    /// Blocks per Morton element along x.
    pub width_factor: u32,
    /// The order is a fixed tile size rather than fitted to the texture.
    pub tiled: bool,
}

/// Morton layout for a `width x height` texture of `format` on `platform`.
pub fn morton_layout(
    platform: Platform,
    format: TextureFormat,
    width: u32,
    height: u32,
) -> MortonLayout {
    let (bw, bh) = format.block_dim();
    match platform {
        Platform::Ps4 | Platform::N3ds => MortonLayout {
            order: 3,
            width_factor: 2,
            tiled: true,
        },
        // Other G1T extractors write Wii U textures out still swizzled and
        // only apply the curve when repacking. Unpack undoes it here, so DDS
        // output differs from theirs while unpack and pack stay inverses.
        Platform::WiiU => MortonLayout {
            order: morton::fitted_order(width / bw / 2, height / bh),
            width_factor: 2,
            tiled: false,
        },
        _ => MortonLayout {
            order: morton::fitted_order(width / bw, height / bh),
            width_factor: 1,
            tiled: false,
        },
    }
}
