//! Reversible pixel layout transforms.
//!
//! Console GPUs store textures in orders that favour memory locality. This
//! crate converts between those orders and the linear raster order used by
//! DDS files:
//!
//! - [`morton`] - Z-order curve within power-of-two tiles
//! - [`tile`] - Row-major square tiles
//! - [`permute`] - Reordering of the R, G, B and A lanes of packed pixels
//! - [`flip`] - Vertical mirror of scan lines
//! - [`layout`] - Level-major (archive) versus frame-major (DDS) surface order
//!
//! Every geometric transform works on whole elements (a pixel, or a
//! compressed block) and never looks inside them. Geometric preconditions
//! are caller contracts and are checked with assertions; only data-dependent
//! failures are reported through [`Error`].
//!
//! # Example
//!
//! ```
//! use g1tex_swizzle::{morton, AxisOrder, Direction};
//!
//! let mut data: Vec<u8> = (0..16).collect();
//! let original = data.clone();
//!
//! morton::morton(Direction::Forward, 2, AxisOrder::XOdd, 4, 4, 1, &mut data);
//! assert_ne!(data, original);
//! morton::morton(Direction::Inverse, 2, AxisOrder::XOdd, 4, 4, 1, &mut data);
//! assert_eq!(data, original);
//! ```

mod error;

pub mod flip;
pub mod layout;
pub mod morton;
pub mod permute;
pub mod tile;

pub use error::{Error, Result};
pub use morton::AxisOrder;

/// Which way a reversible transform runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Linear raster to swizzled order.
    Forward,
    /// Swizzled order back to linear raster.
    Inverse,
}
