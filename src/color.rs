use crate::error::Error;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// An 8-bit-per-channel ARGB color.
///
/// The persisted form is the signed 32-bit ARGB integer the original
/// settings files carry; `#`-prefixed hex web colors are accepted on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Color {
    pub a: u8,
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { a: 255, r, g, b }
    }

    pub const fn argb(a: u8, r: u8, g: u8, b: u8) -> Self {
        Self { a, r, g, b }
    }

    pub const fn from_argb_i32(value: i32) -> Self {
        let [a, r, g, b] = value.to_be_bytes();
        Self { a, r, g, b }
    }

    pub const fn to_argb_i32(self) -> i32 {
        i32::from_be_bytes([self.a, self.r, self.g, self.b])
    }

    /// Parse either form the settings reader accepts: a leading `#` selects
    /// hex web color (`#RGB`, `#RRGGBB` or `#AARRGGBB`), anything else must
    /// be a signed 32-bit decimal ARGB value.
    pub fn parse(s: &str) -> Result<Self, Error> {
        let trimmed = s.trim();
        let invalid = || Error::InvalidColor(s.to_string());

        if let Some(hex) = trimmed.strip_prefix('#') {
            let value = u32::from_str_radix(hex, 16).map_err(|_| invalid())?;
            return match hex.len() {
                3 => {
                    let expand = |nibble: u32| (nibble * 0x11) as u8;
                    Ok(Self::rgb(
                        expand(value >> 8 & 0xf),
                        expand(value >> 4 & 0xf),
                        expand(value & 0xf),
                    ))
                }
                6 => Ok(Self::from_argb_i32((0xff00_0000_u32 | value) as i32)),
                8 => Ok(Self::from_argb_i32(value as i32)),
                _ => Err(invalid()),
            };
        }

        trimmed
            .parse::<i32>()
            .map(Self::from_argb_i32)
            .map_err(|_| invalid())
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::WHITE
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_argb_i32())
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
