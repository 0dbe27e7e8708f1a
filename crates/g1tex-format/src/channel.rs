//! Channel order of packed RGBA pixels.

use std::fmt;
use std::str::FromStr;

use crate::{Error, Result};

/// Order of the four colour lanes in a packed pixel.
///
/// The first letter names the most significant lane of the pixel when the
/// pixel bytes are read as a big-endian word, i.e. the lane stored first in
/// memory.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChannelOrder([u8; 4]);

impl ChannelOrder {
    /// Canonical order used by DDS files written by g1tex.
    pub const ARGB: Self = Self(*b"ARGB");
    pub const RGBA: Self = Self(*b"RGBA");
    pub const ABGR: Self = Self(*b"ABGR");
    pub const GRAB: Self = Self(*b"GRAB");

    /// Build an order from four lane letters.
    pub fn new(lanes: [u8; 4]) -> Result<Self> {
        let valid = b"RGBA"
            .iter()
            .all(|c| lanes.iter().filter(|l| *l == c).count() == 1);
        if !valid {
            return Err(Error::BadChannelOrder(
                String::from_utf8_lossy(&lanes).into_owned(),
            ));
        }
        Ok(Self(lanes))
    }

    /// Slot of `lane` counted from the most significant end (0..4).
    pub fn slot(&self, lane: u8) -> usize {
        // Construction guarantees every lane is present.
        self.0.iter().position(|l| *l == lane).unwrap_or(0)
    }

    /// The order as a string slice.
    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.0).unwrap_or("????")
    }
}

impl FromStr for ChannelOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let bytes: [u8; 4] = s
            .to_ascii_uppercase()
            .as_bytes()
            .try_into()
            .map_err(|_| Error::BadChannelOrder(s.to_string()))?;
        Self::new(bytes)
    }
}

impl fmt::Display for ChannelOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Debug for ChannelOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChannelOrder({})", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_valid_orders() {
        assert_eq!("argb".parse::<ChannelOrder>().unwrap(), ChannelOrder::ARGB);
        assert_eq!("GRAB".parse::<ChannelOrder>().unwrap(), ChannelOrder::GRAB);
        assert_eq!(ChannelOrder::RGBA.slot(b'A'), 3);
        assert_eq!(ChannelOrder::ARGB.slot(b'A'), 0);
    }

    #[test]
    fn test_reject_invalid_orders() {
        assert!("RGB".parse::<ChannelOrder>().is_err());
        assert!("RRGB".parse::<ChannelOrder>().is_err());
        assert!("RGBX".parse::<ChannelOrder>().is_err());
        assert!(ChannelOrder::new(*b"AAAA").is_err());
    }
}
