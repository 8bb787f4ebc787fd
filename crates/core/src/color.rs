//! 8-bit RGBA color used for palettes, backgrounds and overlay markers.
//!
//! Serializes as a hex string (`"#rrggbb"` when opaque, `"#rrggbbaa"`
//! otherwise) so recorded configs stay human-readable.

use crate::error::EngineError;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Straight-alpha RGBA color with 8-bit channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::opaque(0x00, 0x00, 0x00);

    /// Overlay color for field-cell markers.
    pub const FIELD_MARKER: Rgba = Rgba::opaque(0x30, 0xa0, 0x00);

    /// Fill color for point-mass markers.
    pub const MASS_FILL: Rgba = Rgba::opaque(0xff, 0x00, 0x00);

    /// Outline color for point-mass markers.
    pub const MASS_OUTLINE: Rgba = Rgba::opaque(0xff, 0xff, 0x00);

    /// Creates a fully opaque color.
    pub const fn opaque(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xff }
    }

    /// Parses `"#rrggbb"`, `"#rrggbbaa"` or the same without `#` (case insensitive).
    ///
    /// Returns `EngineError::InvalidColor` on any other input.
    pub fn from_hex(hex: &str) -> Result<Rgba, EngineError> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        if hex.len() != 6 && hex.len() != 8 {
            return Err(EngineError::InvalidColor(format!(
                "expected 6 or 8 hex digits, got {}",
                hex.len()
            )));
        }
        let channel = |range: std::ops::Range<usize>, name: &str| {
            hex.get(range)
                .ok_or_else(|| EngineError::InvalidColor(format!("invalid {name} component")))
                .and_then(|digits| {
                    u8::from_str_radix(digits, 16).map_err(|e| {
                        EngineError::InvalidColor(format!("invalid {name} component: {e}"))
                    })
                })
        };
        let r = channel(0..2, "red")?;
        let g = channel(2..4, "green")?;
        let b = channel(4..6, "blue")?;
        let a = if hex.len() == 8 {
            channel(6..8, "alpha")?
        } else {
            0xff
        };
        Ok(Rgba { r, g, b, a })
    }

    /// Formats the color as `"#rrggbb"`, or `"#rrggbbaa"` when not opaque.
    pub fn to_hex(self) -> String {
        let Rgba { r, g, b, a } = self;
        if a == 0xff {
            format!("#{r:02x}{g:02x}{b:02x}")
        } else {
            format!("#{r:02x}{g:02x}{b:02x}{a:02x}")
        }
    }

    /// Channels in R, G, B, A byte order.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgba::from_hex(&s).map_err(serde::de::Error::custom)
    }
}
