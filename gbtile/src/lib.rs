//! Encoder for the Game Boy 2bpp tile format.
//!
//! Takes an image whose pixels are already reduced to the four colors of a [`Palette`], cuts it
//! into 8x8 [`Tile`]s, and deduplicates those into a tile bank plus a [`TileMap`] that says which
//! bank entry sits in which screen cell.
//!
//! # Tile format
//!
//! Each tile is 16 bytes: two bytes per row, top row first. The first byte of a row holds the low
//! bit of every pixel's color index, the second byte the high bit. Bit 7 is the leftmost pixel.
//!
//! ```plain
//! .- one tile row ------------------------------------.
//! |         Byte[0]         |         Byte[1]         |
//! |  7  6  5  4  3  2  1  0 |  7  6  5  4  3  2  1  0 |
//! |-------------------------+-------------------------|
//! | low bits, pixels 0..7   | high bits, pixels 0..7  |
//! `---------------------------------------------------`
//! ```
//!
//! See [consts] for the fixed dimensions.
//!
//! # Features
//!
//! - `std` (default): implements `std::error::Error` for all error types.
//! - `alloc`: enables [`Tiles`], [`TileMap`] and hex string output. Without it, only the color
//!   types and the single-tile codec are available.
#![cfg_attr(not(any(test, feature = "std")), no_std)]

#[cfg(feature = "alloc")]
extern crate alloc;

pub mod color;
pub mod palette;
pub mod tile;
#[cfg(feature = "alloc")]
pub mod tilemap;
#[cfg(feature = "alloc")]
pub mod tiles;

pub use color::PaletteColor;
pub use palette::Palette;
pub use tile::{ColorIndex, Tile};
#[cfg(feature = "alloc")]
pub use tilemap::TileMap;
#[cfg(feature = "alloc")]
pub use tiles::Tiles;

pub mod consts {
    /// Width and height of a tile, in pixels.
    pub const TILE_SIZE: usize = 8;

    /// Number of bytes in one encoded tile: a low and a high bitplane byte per row.
    pub const TILE_BYTES: usize = TILE_SIZE * 2;

    /// Number of colors in a palette, and the number of distinct color indices.
    pub const PALETTE_SIZE: usize = 4;

    /// Bytes per pixel of the RGBA buffers consumed and produced by this crate.
    pub const RGBA_BYTES: usize = 4;
}
