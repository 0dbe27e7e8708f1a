//! Common utilities for g1tex.
//!
//! This crate provides foundational types used across all g1tex crates:
//!
//! - [`Endian`] - Explicit byte order of container metadata
//! - [`BinaryReader`] - Zero-copy, endian-aware reading from byte slices
//! - [`Error`] - Errors shared by the readers

mod endian;
mod error;
mod reader;

pub use endian::Endian;
pub use error::{Error, Result};
pub use reader::BinaryReader;

/// Re-export zerocopy traits for convenience
pub use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout};
