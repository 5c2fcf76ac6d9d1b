use crate::{Tile, Tiles};
use alloc::vec::Vec;
use byteorder::ByteOrder;
use hashbrown::{hash_map::Entry, HashMap};
use snafu::{ensure, OptionExt, Snafu};

#[derive(Debug, Snafu, PartialEq, Eq)]
#[snafu(module)]
pub enum TileMapError {
    #[snafu(display("Tile index {index} at cell {cell} does not fit into {bits} bits"))]
    IndexOverflow {
        cell: usize,
        index: usize,
        bits: u32,
    },
    #[snafu(display("Tile offset {offset} pushes the index of cell {cell} past usize::MAX"))]
    OffsetOverflow { cell: usize, offset: usize },
}

/// One tile bank index per screen cell.
///
/// Every entry is `offset + position`, where `position` points into the deduplicated [`Tiles`]
/// returned alongside the map by [`TileMap::from_tiles`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileMap {
    map: Vec<usize>,
    offset: usize,
}

impl TileMap {
    /// Removes duplicate tiles and builds the map referencing the remaining ones.
    ///
    /// Tiles keep the order in which they are first seen, so the earliest screen cells get the
    /// lowest indices and a tile appearing several times always maps to its first occurrence.
    /// `offset` is added to every index, for tile banks that don't start at 0.
    pub fn from_tiles(tiles: &Tiles, offset: usize) -> Result<(TileMap, Tiles), TileMapError> {
        let mut unique: Vec<Tile> = Vec::new();
        let mut seen: HashMap<Tile, usize> = HashMap::with_capacity(tiles.len());
        let mut map = Vec::with_capacity(tiles.len());

        for (cell, tile) in tiles.iter().enumerate() {
            let position = match seen.entry(*tile) {
                Entry::Occupied(e) => *e.get(),
                Entry::Vacant(e) => {
                    let position = unique.len();
                    log::trace!("cell {cell}: new tile {position}");
                    unique.push(*tile);
                    *e.insert(position)
                }
            };
            let index = position
                .checked_add(offset)
                .context(tile_map_error::OffsetOverflowSnafu { cell, offset })?;
            map.push(index);
        }

        log::debug!(
            "deduplicated {} tiles into {} unique tiles (offset {offset})",
            tiles.len(),
            unique.len()
        );

        Ok((TileMap { map, offset }, Tiles::new(unique)))
    }

    pub fn indices(&self) -> &[usize] {
        &self.map
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Looks up the tile of every cell in the deduplicated bank.
    ///
    /// Yields `None` for cells whose index doesn't point into `unique`, which only happens if the
    /// bank isn't the one this map was built with.
    pub fn resolve<'a>(&'a self, unique: &'a Tiles) -> impl Iterator<Item = Option<&'a Tile>> + 'a {
        self.map.iter().map(move |&index| {
            index
                .checked_sub(self.offset)
                .and_then(|position| unique.get(position))
        })
    }

    /// One byte per cell, the layout of the hardware background map.
    pub fn to_u8_bytes(&self) -> Result<Vec<u8>, TileMapError> {
        self.map
            .iter()
            .enumerate()
            .map(|(cell, &index)| {
                u8::try_from(index)
                    .ok()
                    .context(tile_map_error::IndexOverflowSnafu {
                        cell,
                        index,
                        bits: u8::BITS,
                    })
            })
            .collect()
    }

    /// Two bytes per cell in byte order `B`.
    pub fn to_u16_bytes<B: ByteOrder>(&self) -> Result<Vec<u8>, TileMapError> {
        let mut words = Vec::with_capacity(self.map.len());
        for (cell, &index) in self.map.iter().enumerate() {
            ensure!(
                index <= usize::from(u16::MAX),
                tile_map_error::IndexOverflowSnafu {
                    cell,
                    index,
                    bits: u16::BITS,
                }
            );
            words.push(index as u16);
        }

        let mut out = alloc::vec![0; words.len() * 2];
        B::write_u16_into(&words, &mut out);
        Ok(out)
    }
}
