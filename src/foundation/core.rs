use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::foundation::error::{ExtrudeError, ExtrudeResult};

/// Straight (non-premultiplied) RGBA8 color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgba8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8 {
    /// Fully transparent white (`0xffffff00`), the default background.
    pub const TRANSPARENT_WHITE: Self = Self::new(255, 255, 255, 0);

    /// Build a color from its channels.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Unpack a `0xRRGGBBAA` integer.
    pub const fn from_u32(rgba: u32) -> Self {
        let [r, g, b, a] = rgba.to_be_bytes();
        Self { r, g, b, a }
    }

    /// Pack into a `0xRRGGBBAA` integer.
    pub const fn to_u32(self) -> u32 {
        u32::from_be_bytes([self.r, self.g, self.b, self.a])
    }

    /// Channel bytes in memory order.
    pub const fn to_bytes(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    /// Build from channel bytes in memory order.
    pub const fn from_bytes(px: [u8; 4]) -> Self {
        Self::new(px[0], px[1], px[2], px[3])
    }
}

impl Default for Rgba8 {
    fn default() -> Self {
        Self::TRANSPARENT_WHITE
    }
}

impl fmt::Display for Rgba8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:08x}", self.to_u32())
    }
}

/// Accepted forms:
///
/// - `0xRRGGBBAA` / `0xRRGGBB`: a hexadecimal integer read as packed RGBA, so short values are
///   zero-extended from the left (`0x7088ff` is `r=0, g=0x70, b=0x88, a=0xff`).
/// - `#RRGGBB`, `#RRGGBBAA`, `RRGGBB`, `RRGGBBAA`: CSS-style hex, six digits meaning opaque.
impl FromStr for Rgba8 {
    type Err = ExtrudeError;

    fn from_str(s: &str) -> ExtrudeResult<Self> {
        let s = s.trim();
        if let Some(digits) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
            if digits.is_empty() || digits.len() > 8 || !is_hex(digits) {
                return Err(ExtrudeError::config(format!(
                    "color \"{s}\" must have 1 to 8 hex digits after 0x"
                )));
            }
            let packed = u32::from_str_radix(digits, 16)
                .map_err(|_| ExtrudeError::config(format!("invalid hex color \"{s}\"")))?;
            return Ok(Self::from_u32(packed));
        }

        let digits = s.strip_prefix('#').unwrap_or(s);

        fn hex_byte(s: &str, pair: &str) -> ExtrudeResult<u8> {
            u8::from_str_radix(pair, 16)
                .map_err(|_| ExtrudeError::config(format!("invalid hex byte \"{pair}\" in \"{s}\"")))
        }

        if !is_hex(digits) {
            return Err(ExtrudeError::config(format!("invalid hex color \"{s}\"")));
        }
        match digits.len() {
            6 => Ok(Self::new(
                hex_byte(s, &digits[0..2])?,
                hex_byte(s, &digits[2..4])?,
                hex_byte(s, &digits[4..6])?,
                255,
            )),
            8 => Ok(Self::new(
                hex_byte(s, &digits[0..2])?,
                hex_byte(s, &digits[2..4])?,
                hex_byte(s, &digits[4..6])?,
                hex_byte(s, &digits[6..8])?,
            )),
            _ => Err(ExtrudeError::config(format!(
                "color \"{s}\" must be 0xRRGGBBAA, #RRGGBB or #RRGGBBAA"
            ))),
        }
    }
}

impl Serialize for Rgba8 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Rgba8 {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Hex(String),
            Packed(u32),
            Arr(Vec<u8>),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Hex(s) => s.parse().map_err(serde::de::Error::custom),
            Repr::Packed(v) => Ok(Self::from_u32(v)),
            Repr::Arr(v) => match v.as_slice() {
                [r, g, b] => Ok(Self::new(*r, *g, *b, 255)),
                [r, g, b, a] => Ok(Self::new(*r, *g, *b, *a)),
                _ => Err(serde::de::Error::custom(
                    "rgba array must have len 3 ([r,g,b]) or 4 ([r,g,b,a])",
                )),
            },
        }
    }
}

fn is_hex(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Layout of the tiles in an input tileset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSpec {
    /// Tile width in pixels.
    pub tile_width: u32,
    /// Tile height in pixels.
    pub tile_height: u32,
    /// Pixels between the image edge and the first row/column of tiles.
    #[serde(default)]
    pub margin: u32,
    /// Pixels between neighboring tiles.
    #[serde(default)]
    pub spacing: u32,
}

impl GridSpec {
    /// A tight grid (no margin, no spacing).
    pub fn new(tile_width: u32, tile_height: u32) -> Self {
        Self {
            tile_width,
            tile_height,
            margin: 0,
            spacing: 0,
        }
    }

    /// Set the margin.
    pub fn with_margin(mut self, margin: u32) -> Self {
        self.margin = margin;
        self
    }

    /// Set the spacing.
    pub fn with_spacing(mut self, spacing: u32) -> Self {
        self.spacing = spacing;
        self
    }

    /// Reject grids that can never produce a tile.
    pub fn validate(&self) -> ExtrudeResult<()> {
        if self.tile_width == 0 {
            return Err(ExtrudeError::invalid("tile width must be > 0"));
        }
        if self.tile_height == 0 {
            return Err(ExtrudeError::invalid("tile height must be > 0"));
        }
        Ok(())
    }
}

/// How far tiles are extruded, and what fills the margin and spacing bands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtrusionSpec {
    /// Pixels replicated outward from every tile edge.
    #[serde(default = "default_extrusion")]
    pub extrusion: u32,
    /// Color of the margin and spacing bands.
    #[serde(default)]
    pub background: Rgba8,
}

fn default_extrusion() -> u32 {
    1
}

impl Default for ExtrusionSpec {
    fn default() -> Self {
        Self {
            extrusion: default_extrusion(),
            background: Rgba8::TRANSPARENT_WHITE,
        }
    }
}

impl ExtrusionSpec {
    /// Extrude by `extrusion` pixels over the default background.
    pub fn new(extrusion: u32) -> Self {
        Self {
            extrusion,
            ..Self::default()
        }
    }

    /// Set the background color.
    pub fn with_background(mut self, background: Rgba8) -> Self {
        self.background = background;
        self
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
