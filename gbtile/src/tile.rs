use crate::{
    consts::{RGBA_BYTES, TILE_BYTES, TILE_SIZE},
    Palette,
};
use core::fmt;
use snafu::{ensure, Snafu};

#[derive(Debug, Snafu, PartialEq, Eq)]
#[snafu(module)]
pub enum TileError {
    #[snafu(display("Color index {value} is out of range, must be between 0 and 3"))]
    InvalidColorIndex { value: u8 },
    #[snafu(display("Tile must be 8x8 pixels, got {rows} rows with a {columns}-pixel row"))]
    InvalidShape { rows: usize, columns: usize },
    #[snafu(display("An encoded tile is 16 bytes, got {len}"))]
    InvalidLength { len: usize },
}

/// A 2-bit pixel value selecting one of the four palette slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ColorIndex(u8);

impl ColorIndex {
    pub const MAX: u8 = 3;

    pub fn new(value: u8) -> Result<Self, TileError> {
        ensure!(
            value <= Self::MAX,
            tile_error::InvalidColorIndexSnafu { value }
        );
        Ok(Self(value))
    }

    /// Keeps the lowest two bits. Used where the value is known to fit, like bitplane decoding.
    #[inline]
    const fn from_bits(bits: u8) -> Self {
        Self(bits & 0b11)
    }

    #[inline]
    pub const fn get(self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl TryFrom<u8> for ColorIndex {
    type Error = TileError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<ColorIndex> for u8 {
    fn from(index: ColorIndex) -> Self {
        index.0
    }
}

impl fmt::Display for ColorIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

pub type TileRows = [[ColorIndex; TILE_SIZE]; TILE_SIZE];

/// An 8x8 block of color indices.
///
/// Equality is structural: two tiles are equal when all 64 pixels match.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Tile {
    rows: TileRows,
}

impl Tile {
    pub const fn new(rows: TileRows) -> Self {
        Self { rows }
    }

    /// Builds a tile from raw rows of color index values, checking the 8x8 shape and that every
    /// value is in `0..=3`.
    pub fn from_rows<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self, TileError> {
        let mut out = [[ColorIndex::default(); TILE_SIZE]; TILE_SIZE];

        let bad_row = rows.iter().map(|r| r.as_ref().len()).find(|&l| l != TILE_SIZE);
        ensure!(
            rows.len() == TILE_SIZE && bad_row.is_none(),
            tile_error::InvalidShapeSnafu {
                rows: rows.len(),
                columns: bad_row.unwrap_or(TILE_SIZE),
            }
        );

        for (out_row, row) in out.iter_mut().zip(rows) {
            for (pixel, &value) in out_row.iter_mut().zip(row.as_ref()) {
                *pixel = ColorIndex::new(value)?;
            }
        }

        Ok(Self::new(out))
    }

    #[inline]
    pub fn rows(&self) -> &TileRows {
        &self.rows
    }

    /// Returns the pixel at column `x`, row `y`, or `None` outside the tile.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> Option<ColorIndex> {
        self.rows.get(y)?.get(x).copied()
    }

    /// Encodes the tile as 2bpp planar data: per row a low-bit byte then a high-bit byte, with the
    /// leftmost pixel in bit 7.
    pub fn to_2bpp(&self) -> [u8; TILE_BYTES] {
        let mut out = [0; TILE_BYTES];

        for (row, bytes) in self.rows.iter().zip(out.chunks_exact_mut(2)) {
            let mut low = 0u8;
            let mut high = 0u8;
            for (x, &pixel) in row.iter().enumerate() {
                let shift = 7 - x;
                low |= (pixel.get() & 0b01) << shift;
                high |= ((pixel.get() >> 1) & 0b01) << shift;
            }
            bytes[0] = low;
            bytes[1] = high;
        }

        out
    }

    /// Decodes 16 bytes of 2bpp planar data.
    pub fn from_2bpp(bytes: &[u8]) -> Result<Self, TileError> {
        ensure!(
            bytes.len() == TILE_BYTES,
            tile_error::InvalidLengthSnafu { len: bytes.len() }
        );

        let mut rows = [[ColorIndex::default(); TILE_SIZE]; TILE_SIZE];
        for (row, pair) in rows.iter_mut().zip(bytes.chunks_exact(2)) {
            let (low, high) = (pair[0], pair[1]);
            for (x, pixel) in row.iter_mut().enumerate() {
                let shift = 7 - x;
                *pixel = ColorIndex::from_bits(((high >> shift) & 1) << 1 | ((low >> shift) & 1));
            }
        }

        Ok(Self::new(rows))
    }

    /// Renders the tile to 8x8 RGBA pixels through `palette`. Alpha is always 255.
    pub fn to_rgba(&self, palette: &Palette) -> [u8; TILE_SIZE * TILE_SIZE * RGBA_BYTES] {
        let mut out = [0; TILE_SIZE * TILE_SIZE * RGBA_BYTES];

        for (pixel, dst) in self
            .rows
            .iter()
            .flatten()
            .zip(out.chunks_exact_mut(RGBA_BYTES))
        {
            let [r, g, b] = palette.color(*pixel).to_rgb();
            dst.copy_from_slice(&[r, g, b, 255]);
        }

        out
    }
}

impl fmt::Debug for Tile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Tile [")?;
        for row in &self.rows {
            write!(f, "   ")?;
            for pixel in row {
                write!(f, " {pixel}")?;
            }
            writeln!(f)?;
        }
        write!(f, "]")
    }
}

impl TryFrom<&[u8]> for Tile {
    type Error = TileError;

    fn try_from(bytes: &[u8]) -> Result<Self, Self::Error> {
        Self::from_2bpp(bytes)
    }
}
