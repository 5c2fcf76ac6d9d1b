use core::{fmt, str::FromStr};
use snafu::{ensure, Snafu};

#[derive(Debug, Snafu, PartialEq, Eq)]
#[snafu(module)]
pub enum ParseColorError {
    #[snafu(display("Expected 6 hex digits after the optional `#`, got {len} characters"))]
    InvalidLength { len: usize },
    #[snafu(display("Invalid hex digit in color string"))]
    InvalidDigit,
    #[snafu(display("Expected 3 (RGB) or 4 (RGBA) bytes, got {len}"))]
    InvalidByteCount { len: usize },
}

/// An 8-bit-per-channel RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct PaletteColor {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl PaletteColor {
    pub const BLACK: Self = Self::new(0, 0, 0);
    pub const WHITE: Self = Self::new(255, 255, 255);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    /// Builds a color from wider integers, clamping each channel into `0..=255`.
    pub fn clamped(red: i32, green: i32, blue: i32) -> Self {
        let clamp = |c: i32| c.clamp(0, 255) as u8;
        Self::new(clamp(red), clamp(green), clamp(blue))
    }

    pub const fn with_red(self, red: u8) -> Self {
        Self { red, ..self }
    }

    pub const fn with_green(self, green: u8) -> Self {
        Self { green, ..self }
    }

    pub const fn with_blue(self, blue: u8) -> Self {
        Self { blue, ..self }
    }

    #[inline]
    pub const fn to_rgb(self) -> [u8; 3] {
        [self.red, self.green, self.blue]
    }

    /// Reads a color from a 3-byte RGB or 4-byte RGBA slice. Alpha is ignored.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, ParseColorError> {
        match *bytes {
            [r, g, b] | [r, g, b, _] => Ok(Self::new(r, g, b)),
            _ => parse_color_error::InvalidByteCountSnafu { len: bytes.len() }.fail(),
        }
    }

    /// Parses `#rrggbb` or `rrggbb`, in either case.
    pub fn from_hex(hex: &str) -> Result<Self, ParseColorError> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);

        ensure!(
            digits.len() == 6,
            parse_color_error::InvalidLengthSnafu { len: digits.len() }
        );
        ensure!(
            digits.bytes().all(|b| b.is_ascii_hexdigit()),
            parse_color_error::InvalidDigitSnafu
        );

        // all ASCII at this point, so byte offsets are char boundaries
        let channel = |i: usize| {
            u8::from_str_radix(&digits[i..i + 2], 16)
                .map_err(|_| ParseColorError::InvalidDigit)
        };

        Ok(Self::new(channel(0)?, channel(2)?, channel(4)?))
    }

    /// Formats as `#rrggbb` with lower-case digits.
    #[cfg(feature = "alloc")]
    pub fn to_hex(self) -> alloc::string::String {
        alloc::format!("{self}")
    }

    /// Converts to the 15-bit `0bbbbbgggggrrrrr` word used by CGB palette memory.
    #[inline]
    pub const fn to_rgb555(self) -> u16 {
        let r = (self.red >> 3) as u16;
        let g = (self.green >> 3) as u16;
        let b = (self.blue >> 3) as u16;

        (b << 10) | (g << 5) | r
    }

    /// Expands a 15-bit CGB palette word. The top bit is ignored.
    #[inline]
    pub const fn from_rgb555(word: u16) -> Self {
        Self::new(
            expand_5bit(word),
            expand_5bit(word >> 5),
            expand_5bit(word >> 10),
        )
    }
}

#[inline]
const fn expand_5bit(c: u16) -> u8 {
    let c = (c & 0b1_1111) as u8;
    (c << 3) | (c >> 2)
}

impl fmt::Display for PaletteColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.red, self.green, self.blue)
    }
}

impl FromStr for PaletteColor {
    type Err = ParseColorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl From<[u8; 3]> for PaletteColor {
    fn from([red, green, blue]: [u8; 3]) -> Self {
        Self::new(red, green, blue)
    }
}

impl From<[u8; 4]> for PaletteColor {
    fn from([red, green, blue, _]: [u8; 4]) -> Self {
        Self::new(red, green, blue)
    }
}

impl From<PaletteColor> for [u8; 3] {
    fn from(color: PaletteColor) -> Self {
        color.to_rgb()
    }
}

impl PartialEq<[u8; 3]> for PaletteColor {
    fn eq(&self, other: &[u8; 3]) -> bool {
        *self == Self::from(*other)
    }
}

impl PartialEq<[u8; 4]> for PaletteColor {
    fn eq(&self, other: &[u8; 4]) -> bool {
        *self == Self::from(*other)
    }
}

/// Malformed strings never compare equal.
impl PartialEq<str> for PaletteColor {
    fn eq(&self, other: &str) -> bool {
        Self::from_hex(other).map_or(false, |c| c == *self)
    }
}

impl PartialEq<&str> for PaletteColor {
    fn eq(&self, other: &&str) -> bool {
        *self == **other
    }
}
