//! Endian-aware cursor over a byte slice.
//!
//! G1T metadata is stored in the byte order of the target console, so every
//! multi-byte read goes through the [`Endian`] the reader was created with.
//! A few fields are big-endian on every platform; [`BinaryReader::read_u32_be`]
//! covers those.

use zerocopy::FromBytes;

use crate::{Endian, Error, Result};

/// Cursor reading integers, arrays and plain structs from a byte slice.
///
/// # Example
///
/// ```
/// use g1tex_common::{BinaryReader, Endian};
///
/// let data = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08];
/// let mut reader = BinaryReader::new(&data);
/// assert_eq!(reader.read_u32().unwrap(), 0x04030201);
///
/// let mut reader = BinaryReader::with_endian(&data, Endian::Big);
/// assert_eq!(reader.read_u32().unwrap(), 0x01020304);
/// ```
#[derive(Debug, Clone)]
pub struct BinaryReader<'a> {
    data: &'a [u8],
    position: usize,
    endian: Endian,
}

impl<'a> BinaryReader<'a> {
    /// Little-endian reader over `data`.
    #[inline]
    pub const fn new(data: &'a [u8]) -> Self {
        Self::with_endian(data, Endian::Little)
    }

    /// Reader over `data` using `endian` for multi-byte reads.
    #[inline]
    pub const fn with_endian(data: &'a [u8], endian: Endian) -> Self {
        Self {
            data,
            position: 0,
            endian,
        }
    }

    #[inline]
    pub const fn endian(&self) -> Endian {
        self.endian
    }

    /// Offset of the next byte to read.
    #[inline]
    pub const fn position(&self) -> usize {
        self.position
    }

    #[inline]
    pub const fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    /// Whether every byte has been consumed.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.position >= self.data.len()
    }

    /// Take the next `count` bytes.
    ///
    /// On failure the position is left unchanged.
    pub fn read_bytes(&mut self, count: usize) -> Result<&'a [u8]> {
        let available = self.remaining();
        if available < count {
            return Err(Error::UnexpectedEof {
                offset: self.position,
                needed: count,
                available,
            });
        }
        let bytes = &self.data[self.position..self.position + count];
        self.position += count;
        Ok(bytes)
    }

    #[inline]
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.read_bytes(N)?);
        Ok(out)
    }

    /// u32 in the reader's byte order.
    #[inline]
    pub fn read_u32(&mut self) -> Result<u32> {
        let endian = self.endian;
        self.read_bytes(4).map(|b| endian.read_u32(b))
    }

    /// u32 stored big-endian on every platform.
    #[inline]
    pub fn read_u32_be(&mut self) -> Result<u32> {
        self.read_bytes(4).map(|b| Endian::Big.read_u32(b))
    }

    /// f32 in the reader's byte order.
    #[inline]
    pub fn read_f32(&mut self) -> Result<f32> {
        self.read_u32().map(f32::from_bits)
    }

    /// Copy a plain struct out of the buffer.
    ///
    /// Fields keep their on-disk byte order, so this only suits layouts that
    /// are little-endian everywhere, such as DDS headers.
    pub fn read_struct<T: FromBytes>(&mut self) -> Result<T> {
        let offset = self.position;
        let size = std::mem::size_of::<T>();
        let bytes = self.read_bytes(size)?;
        T::read_from_bytes(bytes).map_err(|_| Error::UnexpectedEof {
            offset,
            needed: size,
            available: bytes.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_little_endian_reads() {
        let data = [0x01u8, 0x02, 0x03, 0x04, 0xFF, 0xFF, 0xFF, 0xFF];
        let mut reader = BinaryReader::new(&data);

        assert_eq!(reader.read_u32().unwrap(), 0x04030201);
        assert_eq!(reader.read_u32().unwrap(), 0xFFFFFFFF);
        assert!(reader.is_empty());
    }

    #[test]
    fn test_big_endian_reads() {
        let data = [0x00, 0x00, 0x00, 0x10, 0x3F, 0x80, 0x00, 0x00];
        let mut reader = BinaryReader::with_endian(&data, Endian::Big);

        assert_eq!(reader.read_u32().unwrap(), 0x0010);
        assert_eq!(reader.read_f32().unwrap(), 1.0);
    }

    #[test]
    fn test_forced_big_endian_field() {
        let data = [0x10, 0x00, 0x00, 0x00, 0x10, 0x00, 0x00, 0x00];
        let mut reader = BinaryReader::new(&data);

        assert_eq!(reader.read_u32().unwrap(), 0x10);
        assert_eq!(reader.read_u32_be().unwrap(), 0x1000_0000);
    }

    #[test]
    fn test_short_read_keeps_position() {
        let data = [0x01, 0x02, 0x03];
        let mut reader = BinaryReader::new(&data);
        assert_eq!(reader.read_array::<2>().unwrap(), [0x01, 0x02]);

        let err = reader.read_u32().unwrap_err();
        assert!(matches!(
            err,
            Error::UnexpectedEof {
                offset: 2,
                needed: 4,
                available: 1
            }
        ));
        assert_eq!(reader.position(), 2);
        assert_eq!(reader.remaining(), 1);
    }
}
