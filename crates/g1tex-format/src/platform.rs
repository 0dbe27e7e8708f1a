//! Target platforms of G1T archives.

use std::fmt;

use g1tex_common::Endian;

/// Platform an archive was built for, as stored in the archive header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Platform {
    Ps2,
    Ps3,
    Xbox360,
    Wii,
    Ds,
    N3ds,
    Vita,
    Android,
    Ios,
    WiiU,
    Windows,
    Ps4,
    XboxOne,
    Switch,
    /// An id with no known name; kept verbatim.
    Unknown(u32),
}

const NAMED: [(Platform, u32, &str); 14] = [
    (Platform::Ps2, 0x00, "PS2"),
    (Platform::Ps3, 0x01, "PS3"),
    (Platform::Xbox360, 0x02, "Xbox 360"),
    (Platform::Wii, 0x03, "Wii"),
    (Platform::Ds, 0x04, "DS"),
    (Platform::N3ds, 0x05, "3DS"),
    (Platform::Vita, 0x06, "Vita"),
    (Platform::Android, 0x07, "Android"),
    (Platform::Ios, 0x08, "iOS"),
    (Platform::WiiU, 0x09, "WiiU"),
    (Platform::Windows, 0x0A, "Windows"),
    (Platform::Ps4, 0x0B, "PS4"),
    (Platform::XboxOne, 0x0C, "Xbox One"),
    (Platform::Switch, 0x10, "Switch"),
];

impl Platform {
    /// Platform for a raw header id.
    pub fn from_id(id: u32) -> Self {
        NAMED
            .iter()
            .find(|(_, i, _)| *i == id)
            .map(|(p, _, _)| *p)
            .unwrap_or(Platform::Unknown(id))
    }

    /// Raw header id.
    pub fn id(self) -> u32 {
        match self {
            Platform::Unknown(id) => id,
            known => NAMED
                .iter()
                .find(|(p, _, _)| *p == known)
                .map(|(_, i, _)| *i)
                .unwrap_or(u32::MAX),
        }
    }

    /// Display name, if the platform is known.
    pub fn name(self) -> Option<&'static str> {
        NAMED
            .iter()
            .find(|(p, _, _)| *p == self)
            .map(|(_, _, n)| *n)
    }

    /// Look a platform up by display name (case-insensitive) or numeric id.
    pub fn from_name(name: &str) -> Option<Self> {
        if let Some((p, _, _)) = NAMED.iter().find(|(_, _, n)| n.eq_ignore_ascii_case(name)) {
            return Some(*p);
        }
        let trimmed = name.trim();
        let id = match trimmed.strip_prefix("0x").or_else(|| trimmed.strip_prefix("0X")) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => trimmed.parse().ok()?,
        };
        Some(Self::from_id(id))
    }

    /// Byte order of archive metadata written for this platform.
    pub fn metadata_endian(self) -> Endian {
        match self {
            Platform::Ps3 | Platform::Wii | Platform::WiiU => Endian::Big,
            _ => Endian::Little,
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => f.write_str(name),
            None => write!(f, "0x{:02x}", self.id()),
        }
    }
}
