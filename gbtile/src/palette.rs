use crate::{consts::PALETTE_SIZE, tile::ColorIndex, PaletteColor};
use byteorder::ByteOrder;
use snafu::{OptionExt, Snafu};

#[derive(Debug, Snafu, PartialEq, Eq)]
#[snafu(module)]
pub enum PaletteError {
    #[snafu(display("Palette slot {index} is out of range, must be between 0 and 3"))]
    IndexOutOfRange { index: usize },
    #[snafu(display("Color {color} is not in the palette"))]
    ColorNotFound { color: PaletteColor },
}

/// A four color palette. Slot order is color index order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Palette {
    colors: [PaletteColor; PALETTE_SIZE],
}

impl Palette {
    /// The classic DMG grey ramp, lightest first.
    pub const DMG: Self = Self::new([
        PaletteColor::new(0xff, 0xff, 0xff),
        PaletteColor::new(0xaa, 0xaa, 0xaa),
        PaletteColor::new(0x55, 0x55, 0x55),
        PaletteColor::new(0x00, 0x00, 0x00),
    ]);

    pub const fn new(colors: [PaletteColor; PALETTE_SIZE]) -> Self {
        Self { colors }
    }

    pub fn get(&self, index: usize) -> Result<PaletteColor, PaletteError> {
        self.colors
            .get(index)
            .copied()
            .context(palette_error::IndexOutOfRangeSnafu { index })
    }

    /// Looks up an already validated color index. Cannot fail.
    #[inline]
    pub fn color(&self, index: ColorIndex) -> PaletteColor {
        self.colors[index.as_usize()]
    }

    pub fn set(&mut self, index: usize, color: PaletteColor) -> Result<(), PaletteError> {
        let slot = self
            .colors
            .get_mut(index)
            .context(palette_error::IndexOutOfRangeSnafu { index })?;
        *slot = color;
        Ok(())
    }

    /// Returns a copy with slot `index` replaced, leaving `self` untouched.
    pub fn with_color(mut self, index: usize, color: PaletteColor) -> Result<Self, PaletteError> {
        self.set(index, color)?;
        Ok(self)
    }

    /// Finds the first slot holding exactly `color`.
    ///
    /// Slots are scanned from 0 to 3, so a color present twice always resolves to the lower slot.
    pub fn index_of(&self, color: impl Into<PaletteColor>) -> Result<ColorIndex, PaletteError> {
        let color = color.into();
        self.colors
            .iter()
            .position(|&c| c == color)
            .and_then(|i| ColorIndex::new(i as u8).ok())
            .context(palette_error::ColorNotFoundSnafu { color })
    }

    pub fn colors(&self) -> &[PaletteColor; PALETTE_SIZE] {
        &self.colors
    }

    pub fn iter(&self) -> impl Iterator<Item = PaletteColor> + '_ {
        self.colors.iter().copied()
    }

    /// Encodes the palette as four 15-bit CGB color words in byte order `B`.
    ///
    /// Palette RAM on hardware is little-endian.
    pub fn to_rgb555_bytes<B: ByteOrder>(&self) -> [u8; PALETTE_SIZE * 2] {
        let mut words = [0u16; PALETTE_SIZE];
        for (word, color) in words.iter_mut().zip(self.iter()) {
            *word = color.to_rgb555();
        }

        let mut out = [0; PALETTE_SIZE * 2];
        B::write_u16_into(&words, &mut out);
        out
    }

    pub fn from_rgb555_bytes<B: ByteOrder>(bytes: &[u8; PALETTE_SIZE * 2]) -> Self {
        let mut words = [0u16; PALETTE_SIZE];
        B::read_u16_into(bytes, &mut words);
        Self::new(words.map(PaletteColor::from_rgb555))
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::DMG
    }
}

impl From<[PaletteColor; PALETTE_SIZE]> for Palette {
    fn from(colors: [PaletteColor; PALETTE_SIZE]) -> Self {
        Self::new(colors)
    }
}
