//! Error types for g1tex-common.

use thiserror::Error;

/// Errors raised while reading binary metadata.
#[derive(Debug, Error)]
pub enum Error {
    /// A read ran past the end of the buffer.
    #[error("unexpected end of data at offset {offset}: needed {needed} bytes, {available} left")]
    UnexpectedEof {
        offset: usize,
        needed: usize,
        available: usize,
    },
}

/// Result type alias using the common Error type.
pub type Result<T> = std::result::Result<T, Error>;
