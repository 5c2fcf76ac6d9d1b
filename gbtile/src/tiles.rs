use crate::{
    consts::{RGBA_BYTES, TILE_BYTES, TILE_SIZE},
    palette::PaletteError,
    tile::TileError,
    ColorIndex, Palette, PaletteColor, Tile,
};
use alloc::vec::Vec;
use core::ops::Index;
use itertools::iproduct;
use snafu::{ensure, OptionExt, ResultExt, Snafu};

#[derive(Debug, Snafu, PartialEq, Eq)]
#[snafu(module)]
pub enum SliceError {
    #[snafu(display(
        "Image of {width}x{height} pixels ({len} bytes) can't be cut into 8x8 tiles: width and height must be non-zero multiples of 8 and the buffer a whole number of rows"
    ))]
    InvalidDimensions {
        width: usize,
        height: usize,
        len: usize,
    },
    #[snafu(display("Pixel at ({x}, {y}) has a color outside the palette"))]
    UnknownColor {
        x: usize,
        y: usize,
        source: PaletteError,
    },
    #[snafu(display("A tile bank must be a multiple of 16 bytes, got {len}"))]
    InvalidBankLength { len: usize },
    #[snafu(display("Invalid tile data"))]
    InvalidTile { source: TileError },
}

/// An ordered sequence of tiles, usually the cells of an image in row-major order.
///
/// Duplicates are allowed; [`TileMap::from_tiles`](crate::TileMap::from_tiles) removes them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tiles {
    tiles: Vec<Tile>,
}

impl Tiles {
    pub fn new(tiles: Vec<Tile>) -> Self {
        Self { tiles }
    }

    /// Cuts an RGBA image into 8x8 tiles, left to right, top to bottom.
    ///
    /// Every pixel's RGB value must be exactly one of the palette colors; alpha is ignored.
    /// `width` is in pixels and the height is implied by the buffer length.
    pub fn from_rgba(rgba: &[u8], palette: &Palette, width: usize) -> Result<Self, SliceError> {
        let height = check_dimensions(width, rgba.len(), RGBA_BYTES)?;

        let indices = rgba
            .chunks_exact(RGBA_BYTES)
            .enumerate()
            .map(|(i, pixel)| {
                let color = PaletteColor::new(pixel[0], pixel[1], pixel[2]);
                palette
                    .index_of(color)
                    .context(slice_error::UnknownColorSnafu {
                        x: i % width,
                        y: i / width,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        log::debug!("resolved {width}x{height} image against palette");

        Self::from_indices(&indices, width)
    }

    /// Cuts a buffer of already resolved color indices into 8x8 tiles.
    pub fn from_indices(indices: &[ColorIndex], width: usize) -> Result<Self, SliceError> {
        let height = check_dimensions(width, indices.len(), 1)?;

        let tiles = iproduct!(
            (0..height).step_by(TILE_SIZE),
            (0..width).step_by(TILE_SIZE)
        )
        .map(|(y, x)| {
            let mut rows = [[ColorIndex::default(); TILE_SIZE]; TILE_SIZE];
            for (tile_y, row) in rows.iter_mut().enumerate() {
                let start = (y + tile_y) * width + x;
                row.copy_from_slice(&indices[start..start + TILE_SIZE]);
            }
            Tile::new(rows)
        })
        .collect::<Vec<_>>();

        log::debug!(
            "sliced {width}x{height} image into {} tiles",
            tiles.len()
        );

        Ok(Self::new(tiles))
    }

    /// Decodes a tile bank: consecutive 16-byte 2bpp tiles.
    pub fn from_2bpp(bytes: &[u8]) -> Result<Self, SliceError> {
        ensure!(
            bytes.len() % TILE_BYTES == 0,
            slice_error::InvalidBankLengthSnafu { len: bytes.len() }
        );

        bytes
            .chunks_exact(TILE_BYTES)
            .map(|chunk| Tile::from_2bpp(chunk).context(slice_error::InvalidTileSnafu))
            .collect()
    }

    /// Encodes all tiles back to back, 16 bytes each.
    pub fn to_2bpp(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.tiles.len() * TILE_BYTES);
        for tile in &self.tiles {
            out.extend_from_slice(&tile.to_2bpp());
        }
        out
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiles.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Tile> {
        self.tiles.get(index)
    }

    pub fn iter(&self) -> core::slice::Iter<'_, Tile> {
        self.tiles.iter()
    }

    pub fn as_slice(&self) -> &[Tile] {
        &self.tiles
    }

    pub fn into_vec(self) -> Vec<Tile> {
        self.tiles
    }
}

/// Checks that a buffer of `len` bytes holds whole 8x8 tiles for the given width, returning the
/// height in pixels.
fn check_dimensions(width: usize, len: usize, bytes_per_pixel: usize) -> Result<usize, SliceError> {
    let row_len = width
        .checked_mul(bytes_per_pixel)
        .context(slice_error::InvalidDimensionsSnafu {
            width,
            height: 0usize,
            len,
        })?;
    let height = if row_len == 0 { 0 } else { len / row_len };

    ensure!(
        width > 0
            && width % TILE_SIZE == 0
            && len % row_len == 0
            && height > 0
            && height % TILE_SIZE == 0,
        slice_error::InvalidDimensionsSnafu { width, height, len }
    );

    Ok(height)
}

impl Index<usize> for Tiles {
    type Output = Tile;

    fn index(&self, index: usize) -> &Tile {
        &self.tiles[index]
    }
}

impl From<Vec<Tile>> for Tiles {
    fn from(tiles: Vec<Tile>) -> Self {
        Self::new(tiles)
    }
}

impl FromIterator<Tile> for Tiles {
    fn from_iter<I: IntoIterator<Item = Tile>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl IntoIterator for Tiles {
    type Item = Tile;
    type IntoIter = alloc::vec::IntoIter<Tile>;

    fn into_iter(self) -> Self::IntoIter {
        self.tiles.into_iter()
    }
}

impl<'a> IntoIterator for &'a Tiles {
    type Item = &'a Tile;
    type IntoIter = core::slice::Iter<'a, Tile>;

    fn into_iter(self) -> Self::IntoIter {
        self.tiles.iter()
    }
}
