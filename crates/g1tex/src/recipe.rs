//! Ordered layout transforms for one texture.
//!
//! A [`Recipe`] lists the steps that turn archive pixels into DDS pixels.
//! Unpacking runs them in order, each in its [`Direction::Inverse`] form.
//! Packing runs them in reverse order in their [`Direction::Forward`] form.
//!
//! Geometric steps work per mip level of each surface. Before any data is
//! touched, [`Recipe::plan`] checks that every level can honour the
//! preconditions of the primitives and fixes the per-level parameters.

use g1tex_format::{mipmap, ChannelOrder, TextureDescriptor, TextureFormat};
use g1tex_swizzle::{flip, morton, permute, tile, AxisOrder, Direction};
use tracing::debug;

use crate::profile::{self, TextureKind};
use crate::{Error, Result};

/// One layout transform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Lanes are stored in `native` order instead of ARGB.
    Permute { native: ChannelOrder },
    /// Elements are grouped in `size x size` tiles at level 0.
    Tile { size: u32 },
    /// Elements follow a Z-order curve of `order` at level 0.
    Morton {
        order: u32,
        width_factor: u32,
        axes: AxisOrder,
    },
    /// Rows are stored bottom-up.
    Flip,
}

/// Steps from archive layout to DDS layout.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recipe {
    steps: Vec<Step>,
}

impl Recipe {
    /// Recipe for a texture of `kind` described by `descriptor`.
    pub fn for_texture(descriptor: &TextureDescriptor, kind: &TextureKind, force_flip: bool) -> Self {
        let mut steps = Vec::new();

        if let Some(native) = kind.format.channel_order() {
            if native != ChannelOrder::ARGB {
                steps.push(Step::Permute { native });
            }
        }

        if kind.swizzled {
            let layout = profile::morton_layout(
                descriptor.platform,
                kind.format,
                descriptor.width,
                descriptor.height,
            );
            if layout.order > 0 {
                steps.push(Step::Morton {
                    order: layout.order,
                    width_factor: layout.width_factor,
                    axes: AxisOrder::XOdd,
                });
                if layout.tiled {
                    steps.push(Step::Tile {
                        size: 1 << layout.order,
                    });
                }
            }
        }

        if force_flip || kind.flipped {
            steps.push(Step::Flip);
        }

        debug!(code = kind.code, format = %kind.format, ?steps, "selected recipe");
        Self { steps }
    }

    /// Steps in unpack order.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Whether the recipe leaves the payload untouched.
    pub fn is_identity(&self) -> bool {
        self.steps.is_empty()
    }

    /// Fix per-level parameters for `descriptor`, rejecting geometry the
    /// primitives cannot handle.
    pub fn plan(&self, descriptor: &TextureDescriptor) -> Result<Plan> {
        let format = descriptor.format;
        let width_factor = self
            .steps
            .iter()
            .find_map(|s| match s {
                Step::Morton { width_factor, .. } => Some((*width_factor).max(1)),
                _ => None,
            })
            .unwrap_or(1);

        let mut stages = Vec::with_capacity(self.steps.len());
        // Geometry evolves in pack order: linear raster first.
        let mut rasters: Vec<Raster> = (0..descriptor.mipmaps)
            .map(|level| Raster::linear(format, level, descriptor.width, descriptor.height, width_factor))
            .collect();

        for step in self.steps.iter().rev() {
            let stage = match *step {
                Step::Permute { native } => Stage::Permute {
                    bits_per_pixel: format.bits_per_pixel(),
                    native,
                },
                Step::Flip => {
                    if format.is_block_compressed() {
                        return Err(Error::UnsupportedFlip(format));
                    }
                    let ops = (0..descriptor.mipmaps)
                        .map(|level| {
                            let (width, _) = mipmap::level_blocks(format, level, descriptor.width, descriptor.height);
                            Some(LevelOp::Flip {
                                bits_per_pixel: format.bits_per_pixel(),
                                width,
                            })
                        })
                        .collect();
                    Stage::Levels(ops)
                }
                Step::Tile { size } => {
                    let mut ops = Vec::with_capacity(rasters.len());
                    for (level, raster) in rasters.iter_mut().enumerate() {
                        let size = size >> level;
                        if size <= 1 {
                            ops.push(None);
                            continue;
                        }
                        let raster_ok = raster.element_bytes > 0 && raster.count == 1;
                        if !raster_ok || raster.width % size != 0 || raster.height % size != 0 {
                            return Err(raster.reject(level, "tiled", size));
                        }
                        ops.push(Some(LevelOp::Tile {
                            size,
                            element_bytes: raster.element_bytes,
                            width: raster.width,
                        }));
                        raster.count = (raster.width / size) * (raster.height / size);
                        raster.width = size;
                        raster.height = size;
                    }
                    Stage::Levels(ops)
                }
                Step::Morton { order, axes, .. } => {
                    let mut ops = Vec::with_capacity(rasters.len());
                    for (level, raster) in rasters.iter().enumerate() {
                        let order = order.saturating_sub(level as u32);
                        if order == 0 {
                            ops.push(None);
                            continue;
                        }
                        let side = 1u32 << order;
                        let fits = raster.element_bytes > 0
                            && raster.width % side == 0
                            && raster.height % side == 0
                            && raster.width < 0x10000
                            && raster.height < 0x10000;
                        if !fits {
                            return Err(raster.reject(level, "Morton ordered", side));
                        }
                        ops.push(Some(LevelOp::Morton {
                            order,
                            axes,
                            width: raster.width,
                            height: raster.height,
                            element_bytes: raster.element_bytes,
                        }));
                    }
                    Stage::Levels(ops)
                }
            };
            stages.push(stage);
        }
        stages.reverse();

        Ok(Plan {
            format,
            width: descriptor.width,
            height: descriptor.height,
            mipmaps: descriptor.mipmaps,
            surfaces: descriptor.surfaces(),
            stages,
        })
    }
}

/// Element raster of one mip level, as seen by the next pack-order step.
#[derive(Debug, Clone, Copy)]
struct Raster {
    width: u32,
    height: u32,
    /// Number of `width x height` rasters stored back to back.
    count: u32,
    /// Zero when the level is not a whole number of elements wide.
    element_bytes: usize,
}

impl Raster {
    fn linear(format: TextureFormat, level: u32, width: u32, height: u32, width_factor: u32) -> Self {
        let (bx, by) = mipmap::level_blocks(format, level, width, height);
        let whole = bx % width_factor == 0;
        Self {
            width: bx / width_factor,
            height: by,
            count: 1,
            element_bytes: if whole {
                (format.bytes_per_block() * width_factor) as usize
            } else {
                0
            },
        }
    }

    fn reject(&self, level: usize, step: &'static str, size: u32) -> Error {
        Error::SwizzleGeometry {
            level: level as u32,
            width: self.width,
            height: self.height,
            step,
            size,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum LevelOp {
    Tile {
        size: u32,
        element_bytes: usize,
        width: u32,
    },
    Morton {
        order: u32,
        axes: AxisOrder,
        width: u32,
        height: u32,
        element_bytes: usize,
    },
    Flip {
        bits_per_pixel: u32,
        width: u32,
    },
}

impl LevelOp {
    fn apply(&self, direction: Direction, level: &mut [u8]) {
        match *self {
            LevelOp::Tile {
                size,
                element_bytes,
                width,
            } => tile::tile(direction, size, element_bytes, width, level),
            LevelOp::Morton {
                order,
                axes,
                width,
                height,
                element_bytes,
            } => {
                let chunk = width as usize * height as usize * element_bytes;
                for raster in level.chunks_exact_mut(chunk) {
                    morton::morton(direction, order, axes, width, height, element_bytes, raster);
                }
            }
            LevelOp::Flip {
                bits_per_pixel,
                width,
            } => flip::flip(bits_per_pixel, width, level),
        }
    }
}

#[derive(Debug, Clone)]
enum Stage {
    Permute {
        bits_per_pixel: u32,
        native: ChannelOrder,
    },
    /// One optional operation per mip level.
    Levels(Vec<Option<LevelOp>>),
}

/// A recipe bound to concrete texture geometry.
#[derive(Debug, Clone)]
pub struct Plan {
    format: TextureFormat,
    width: u32,
    height: u32,
    mipmaps: u32,
    surfaces: u32,
    stages: Vec<Stage>,
}

impl Plan {
    /// Convert a frame-major archive payload to DDS pixel layout.
    pub fn unpack(&self, buf: &mut [u8]) -> Result<()> {
        for stage in &self.stages {
            self.run(stage, Direction::Inverse, buf)?;
        }
        Ok(())
    }

    /// Convert a frame-major DDS payload to archive pixel layout.
    pub fn pack(&self, buf: &mut [u8]) -> Result<()> {
        for stage in self.stages.iter().rev() {
            self.run(stage, Direction::Forward, buf)?;
        }
        Ok(())
    }

    fn run(&self, stage: &Stage, direction: Direction, buf: &mut [u8]) -> Result<()> {
        match stage {
            Stage::Permute {
                bits_per_pixel,
                native,
            } => {
                let (from, to) = match direction {
                    Direction::Inverse => (*native, ChannelOrder::ARGB),
                    Direction::Forward => (ChannelOrder::ARGB, *native),
                };
                permute::permute(*bits_per_pixel, from, to, buf)?;
            }
            Stage::Levels(ops) => {
                let offsets = mipmap::level_offsets(self.format, self.mipmaps, self.width, self.height);
                let chain = mipmap::chain_size(self.format, self.mipmaps, self.width, self.height)?;
                for surface in buf.chunks_exact_mut(chain).take(self.surfaces as usize) {
                    for (level, op) in ops.iter().enumerate() {
                        let Some(op) = op else { continue };
                        let size = mipmap::level_size(self.format, level as u32, self.width, self.height);
                        let start = offsets[level];
                        op.apply(direction, &mut surface[start..start + size]);
                    }
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FormatProfile;
    use g1tex_format::Platform;

    fn kind(platform: Platform, code: u8) -> TextureKind {
        TextureKind::resolve(FormatProfile::Extract, platform, code).unwrap()
    }

    fn descriptor(kind: &TextureKind, platform: Platform, width: u32, height: u32) -> TextureDescriptor {
        TextureDescriptor::new(kind.format, width, height).with_platform(platform)
    }

    fn pattern(len: usize) -> Vec<u8> {
        (0..len).map(|i| (i * 13 + i / 256) as u8).collect()
    }

    #[test]
    fn test_windows_rgba_permutes_only() {
        let k = kind(Platform::Windows, 0x01);
        let recipe = Recipe::for_texture(&descriptor(&k, Platform::Windows, 4, 4), &k, false);
        assert_eq!(
            recipe.steps(),
            &[Step::Permute {
                native: ChannelOrder::RGBA
            }]
        );
    }

    #[test]
    fn test_windows_dxt_is_identity() {
        let k = kind(Platform::Windows, 0x59);
        let recipe = Recipe::for_texture(&descriptor(&k, Platform::Windows, 64, 64), &k, false);
        assert!(recipe.is_identity());
    }

    #[test]
    fn test_ps4_recipe_tiles_then_mortons() {
        let k = kind(Platform::Ps4, 0x62);
        let recipe = Recipe::for_texture(&descriptor(&k, Platform::Ps4, 256, 256), &k, false);
        assert_eq!(
            recipe.steps(),
            &[
                Step::Morton {
                    order: 3,
                    width_factor: 2,
                    axes: AxisOrder::XOdd
                },
                Step::Tile { size: 8 },
            ]
        );
    }

    #[test]
    fn test_3ds_bgr8_flips() {
        let k = kind(Platform::N3ds, 0x45);
        let recipe = Recipe::for_texture(&descriptor(&k, Platform::N3ds, 64, 64), &k, false);
        assert_eq!(recipe.steps().last(), Some(&Step::Flip));
    }

    #[test]
    fn test_tiled_morton_matches_single_morton() {
        // PS4 DXT1 256x256: 64x64 blocks paired into 32x64 elements of 16 bytes.
        let k = kind(Platform::Ps4, 0x60);
        let desc = descriptor(&k, Platform::Ps4, 256, 256);
        let plan = Recipe::for_texture(&desc, &k, false).plan(&desc).unwrap();

        let original = pattern(desc.payload_size().unwrap());
        let mut via_plan = original.clone();
        plan.pack(&mut via_plan).unwrap();

        let mut direct = original.clone();
        morton::morton(Direction::Forward, 3, AxisOrder::XOdd, 32, 64, 16, &mut direct);
        assert_eq!(via_plan, direct);
    }

    #[test]
    fn test_round_trip_with_mips_and_frames() {
        let k = kind(Platform::Vita, 0x09);
        let desc = descriptor(&k, Platform::Vita, 32, 16).with_mipmaps(6).with_frames(3);
        let plan = Recipe::for_texture(&desc, &k, true).plan(&desc).unwrap();

        let original = pattern(desc.payload_size().unwrap());
        let mut buf = original.clone();
        plan.pack(&mut buf).unwrap();
        assert_ne!(buf, original);
        plan.unpack(&mut buf).unwrap();
        assert_eq!(buf, original);
    }

    #[test]
    fn test_surfaces_are_swizzled_independently() {
        let k = kind(Platform::Vita, 0x10);
        let single = descriptor(&k, Platform::Vita, 32, 32).with_mipmaps(3);
        let array = single.with_frames(2);

        let chain = pattern(single.payload_size().unwrap());
        let mut one = chain.clone();
        Recipe::for_texture(&single, &k, false).plan(&single).unwrap().unpack(&mut one).unwrap();

        let mut two = [chain.clone(), chain].concat();
        Recipe::for_texture(&array, &k, false).plan(&array).unwrap().unpack(&mut two).unwrap();
        assert_eq!(&two[..one.len()], &one[..]);
        assert_eq!(&two[one.len()..], &one[..]);
    }

    #[test]
    fn test_rejects_unaligned_geometry() {
        // 3DS order 3 needs 8x8 tiles of two-pixel elements: 24 pixels wide
        // is 12 elements, not a multiple of 8.
        let k = kind(Platform::N3ds, 0x09);
        let desc = descriptor(&k, Platform::N3ds, 24, 16);
        let err = Recipe::for_texture(&desc, &k, false).plan(&desc).unwrap_err();
        assert!(matches!(err, Error::SwizzleGeometry { level: 0, .. }));
    }

    #[test]
    fn test_rejects_flip_of_compressed_blocks() {
        let k = kind(Platform::Windows, 0x59);
        let desc = descriptor(&k, Platform::Windows, 16, 16);
        let err = Recipe::for_texture(&desc, &k, true).plan(&desc).unwrap_err();
        assert!(matches!(err, Error::UnsupportedFlip(TextureFormat::Dxt1)));
    }
}
