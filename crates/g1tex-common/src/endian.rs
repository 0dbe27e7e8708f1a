//! Byte order of container metadata.
//!
//! Pixel data is always handled as raw bytes. Only the multi-byte fields of
//! the archive metadata (headers, offset tables, extra data) depend on the
//! platform byte order, and that order is passed explicitly to every function
//! that touches them.

use byteorder::{BigEndian, ByteOrder, LittleEndian};

/// Byte order used for multi-byte metadata fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Endian {
    /// Least significant byte first.
    #[default]
    Little,
    /// Most significant byte first.
    Big,
}

impl Endian {
    /// Decode a `u32` from the first four bytes of `buf`.
    #[inline]
    pub fn read_u32(self, buf: &[u8]) -> u32 {
        match self {
            Endian::Little => LittleEndian::read_u32(buf),
            Endian::Big => BigEndian::read_u32(buf),
        }
    }

    /// Encode `value` into the first four bytes of `buf`.
    #[inline]
    pub fn write_u32(self, buf: &mut [u8], value: u32) {
        match self {
            Endian::Little => LittleEndian::write_u32(buf, value),
            Endian::Big => BigEndian::write_u32(buf, value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_both_orders() {
        let data = [0x12, 0x34, 0x56, 0x78];
        assert_eq!(Endian::Little.read_u32(&data), 0x78563412);
        assert_eq!(Endian::Big.read_u32(&data), 0x12345678);
    }

    #[test]
    fn test_write_then_read() {
        let mut buf = [0u8; 4];
        Endian::Big.write_u32(&mut buf, 0xDEADBEEF);
        assert_eq!(buf, [0xDE, 0xAD, 0xBE, 0xEF]);
        assert_eq!(Endian::Big.read_u32(&buf), 0xDEADBEEF);
        Endian::Little.write_u32(&mut buf, 0x0102);
        assert_eq!(buf, [0x02, 0x01, 0, 0]);
    }
}
