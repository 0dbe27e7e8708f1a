//! Texture unpacking and packing.
//!
//! Unpacking turns a raw archive payload into a complete DDS file:
//!
//! 1. Resolve the type code and reconcile the payload size
//! 2. Reorder the level-major archive surfaces to frame-major order
//! 3. Run the recipe in its inverse direction on every surface
//! 4. Prepend DDS headers describing the canonical format
//!
//! Packing parses a DDS file and runs the same stages backwards.

use std::fmt;

use g1tex_format::{mipmap, Platform, TextureDescriptor};
use g1tex_swizzle::layout;
use tracing::{debug, warn};

use crate::profile::{FormatProfile, TextureKind};
use crate::recipe::Recipe;
use crate::{Error, Result};

/// Options shared by [`unpack`] and [`pack`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct TranscodeOptions {
    /// Type table to resolve codes against.
    pub profile: FormatProfile,
    /// Flip rows in addition to any platform flip.
    pub force_flip: bool,
    /// Reject archive payloads larger than expected instead of truncating
    /// them. DDS payloads are always truncated.
    pub strict_size: bool,
}

impl Default for TranscodeOptions {
    fn default() -> Self {
        Self {
            profile: FormatProfile::Extract,
            force_flip: false,
            strict_size: true,
        }
    }
}

/// Non-fatal condition met while transcoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Warning {
    /// The payload held six surfaces per frame and was treated as a cubemap.
    CubemapDetected,
    /// The payload was larger than expected; trailing bytes were dropped.
    PayloadTruncated { expected: usize, actual: usize },
    /// The DDS had more mipmaps than requested; extra levels were dropped.
    MipmapsTruncated { from: u32, to: u32 },
    /// The DDS had fewer mipmaps than requested.
    MipmapsReduced { from: u32, to: u32 },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::CubemapDetected => f.write_str("payload holds six faces, treating as cubemap"),
            Warning::PayloadTruncated { expected, actual } => write!(
                f,
                "payload is {} bytes larger than the expected {expected} bytes",
                actual - expected
            ),
            Warning::MipmapsTruncated { from, to } => {
                write!(f, "truncating number of mipmaps from {from} to {to}")
            }
            Warning::MipmapsReduced { from, to } => {
                write!(f, "reducing number of mipmaps from {from} to {to}")
            }
        }
    }
}

/// Output of [`unpack`].
#[derive(Debug, Clone)]
pub struct Unpacked {
    /// Complete DDS file.
    pub dds: Vec<u8>,
    /// Native description of the texture, with the cubemap flag resolved.
    pub descriptor: TextureDescriptor,
    /// Non-fatal conditions met on the way.
    pub warnings: Vec<Warning>,
}

/// Where a DDS file is packed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackTarget {
    /// Type code of the archive entry.
    pub type_code: u8,
    /// Platform of the archive.
    pub platform: Platform,
    /// Mipmaps to keep; 0 keeps all levels of the DDS.
    pub mipmaps: u32,
}

/// Output of [`pack`].
#[derive(Debug, Clone)]
pub struct Packed {
    /// Level-major archive payload.
    pub payload: Vec<u8>,
    /// Native description of the packed texture.
    pub descriptor: TextureDescriptor,
    /// Non-fatal conditions met on the way.
    pub warnings: Vec<Warning>,
}

fn note(warnings: &mut Vec<Warning>, warning: Warning) {
    warn!("{warning}");
    warnings.push(warning);
}

/// Convert a raw archive payload into a DDS file.
///
/// The `format` of `descriptor` is replaced by the one `type_code` selects
/// for the descriptor's platform.
pub fn unpack(
    type_code: u8,
    mut descriptor: TextureDescriptor,
    mut payload: Vec<u8>,
    options: &TranscodeOptions,
) -> Result<Unpacked> {
    let kind = TextureKind::resolve(options.profile, descriptor.platform, type_code)?;
    descriptor.format = kind.format;
    descriptor.frames = descriptor.frames.max(1);
    let mut warnings = Vec::new();

    let expected = descriptor.payload_size()?;
    match mipmap::reconcile(expected, payload.len()) {
        Ok(mipmap::Reconciled::Exact) => {}
        Ok(mipmap::Reconciled::Cubemap) => {
            descriptor.cubemap = true;
            note(&mut warnings, Warning::CubemapDetected);
        }
        Err(g1tex_format::Error::SizeMismatch { expected, actual }) if !options.strict_size => {
            note(&mut warnings, Warning::PayloadTruncated { expected, actual });
            payload.truncate(expected);
        }
        Err(err) => return Err(err.into()),
    }

    debug!(
        code = type_code,
        format = %descriptor.format,
        width = descriptor.width,
        height = descriptor.height,
        mipmaps = descriptor.mipmaps,
        surfaces = descriptor.surfaces(),
        "unpacking texture"
    );

    let recipe = Recipe::for_texture(&descriptor, &kind, options.force_flip);
    let plan = recipe.plan(&descriptor)?;

    layout::to_frame_major(
        descriptor.format,
        descriptor.width,
        descriptor.height,
        descriptor.mipmaps,
        descriptor.surfaces(),
        &mut payload,
    );
    plan.unpack(&mut payload)?;

    let mut dds_descriptor = descriptor;
    dds_descriptor.format = descriptor.format.canonical();
    let dds = g1tex_dds::write_dds(&dds_descriptor, &payload)?;

    Ok(Unpacked {
        dds,
        descriptor,
        warnings,
    })
}

/// Convert a DDS file into a raw archive payload.
pub fn pack(dds: &[u8], target: &PackTarget, options: &TranscodeOptions) -> Result<Packed> {
    let info = g1tex_dds::parse(dds)?;
    let source = info.descriptor;
    let kind = TextureKind::resolve(options.profile, target.platform, target.type_code)?;
    if !source.format.is_layout_compatible(kind.format) {
        return Err(Error::FormatMismatch {
            dds: source.format,
            native: kind.format,
        });
    }
    let mut warnings = Vec::new();

    let mipmaps = match target.mipmaps {
        0 => source.mipmaps,
        wanted if source.mipmaps > wanted => {
            note(
                &mut warnings,
                Warning::MipmapsTruncated {
                    from: source.mipmaps,
                    to: wanted,
                },
            );
            wanted
        }
        wanted if source.mipmaps < wanted => {
            note(
                &mut warnings,
                Warning::MipmapsReduced {
                    from: wanted,
                    to: source.mipmaps,
                },
            );
            source.mipmaps
        }
        wanted => wanted,
    };

    let full_chain = source.chain_size()?;
    let surfaces = source.surfaces();
    let expected = source.payload_size()?;
    let data = info.payload(dds);
    if data.len() < expected {
        return Err(g1tex_format::Error::PayloadTooSmall {
            expected,
            actual: data.len(),
        }
        .into());
    }
    if data.len() > expected {
        note(
            &mut warnings,
            Warning::PayloadTruncated {
                expected,
                actual: data.len(),
            },
        );
    }

    let mut descriptor = TextureDescriptor::new(kind.format, source.width, source.height)
        .with_platform(target.platform)
        .with_mipmaps(mipmaps)
        .with_frames(source.frames)
        .with_cubemap(source.cubemap);
    descriptor.srgb = source.srgb;
    descriptor.normal_map = source.normal_map;

    // Keep the first `mipmaps` levels of every surface.
    let kept_chain = descriptor.chain_size()?;
    let mut payload = Vec::with_capacity(kept_chain * surfaces as usize);
    for surface in data[..expected].chunks_exact(full_chain) {
        payload.extend_from_slice(&surface[..kept_chain]);
    }

    debug!(
        code = target.type_code,
        format = %descriptor.format,
        width = descriptor.width,
        height = descriptor.height,
        mipmaps,
        surfaces,
        "packing texture"
    );

    let recipe = Recipe::for_texture(&descriptor, &kind, options.force_flip);
    let plan = recipe.plan(&descriptor)?;
    plan.pack(&mut payload)?;
    layout::to_level_major(
        descriptor.format,
        descriptor.width,
        descriptor.height,
        descriptor.mipmaps,
        descriptor.surfaces(),
        &mut payload,
    );

    Ok(Packed {
        payload,
        descriptor,
        warnings,
    })
}
