//! GBDK C source output: a header with sizes and `extern` declarations, a definitions file
//! with the tile bank, map, and palette as array initializers, and an optional `main.c`.

use byteorder::LittleEndian;
use gbtile::{tilemap::TileMapError, Palette, TileMap, Tiles};
use itertools::Itertools;

pub struct Asset<'a> {
    pub name: &'a str,
    /// Map size in tiles.
    pub width: usize,
    pub height: usize,
    pub tiles: &'a Tiles,
    pub map: &'a TileMap,
    /// Store map entries as `uint16_t` instead of `unsigned char`.
    pub wide_map: bool,
    pub palette: &'a Palette,
    /// First CGB background palette slot the palette is loaded into.
    pub palette_offset: u8,
}

impl Asset<'_> {
    fn map_type(&self) -> &'static str {
        if self.wide_map {
            "uint16_t"
        } else {
            "unsigned char"
        }
    }

    pub fn header(&self) -> String {
        let file = camel_case(self.name);
        let c = constant_case(self.name);

        format!(
            "\
/**
 * {file}.h
 *
 * Generated with gbtile
 */

#include <stdint.h>

#define {c}_TILE_WIDTH 8
#define {c}_TILE_HEIGHT 8
#define {c}_WIDTH {width}
#define {c}_HEIGHT {height}
#define {c}_TILE_COUNT {tile_count}
#define {c}_MAP_SIZE {map_size}
#define {c}_TILE_OFFSET {offset}
#define {c}_PALETTE_OFFSET {palette_offset}

extern const unsigned char {file}Tiles[{c}_TILE_COUNT * 16];
extern const {map_type} {file}Map[{c}_MAP_SIZE];
extern const uint16_t {file}Palette[4];
",
            width = self.width,
            height = self.height,
            tile_count = self.tiles.len(),
            map_size = self.map.len(),
            offset = self.map.offset(),
            palette_offset = self.palette_offset,
            map_type = self.map_type(),
        )
    }

    /// Fails if a map entry doesn't fit the declared element type.
    pub fn definitions(&self) -> Result<String, TileMapError> {
        let file = camel_case(self.name);
        let c = constant_case(self.name);
        let map_type = self.map_type();

        let tile_data = self
            .tiles
            .iter()
            .map(|tile| tile.to_2bpp().iter().map(|b| format!("0x{b:02x}")).join(", "))
            .join(",\n    ");
        let map_data = if self.wide_map {
            self.map.to_u16_bytes::<LittleEndian>()?;
            self.map.indices().iter().map(|i| format!("0x{i:04x}")).join(", ")
        } else {
            self.map
                .to_u8_bytes()?
                .iter()
                .map(|b| format!("0x{b:02x}"))
                .join(", ")
        };
        let palette_data = self
            .palette
            .iter()
            .map(|color| format!("RGB8({}, {}, {})", color.red, color.green, color.blue))
            .join(", ");

        Ok(format!(
            "\
/**
 * {file}.c
 *
 * Generated with gbtile
 */

#include \"{file}.h\"
#include <gb/cgb.h>

const unsigned char {file}Tiles[{c}_TILE_COUNT * 16] = {{
    {tile_data}
}};

const {map_type} {file}Map[{c}_MAP_SIZE] = {{
    {map_data}
}};

const uint16_t {file}Palette[4] = {{
    {palette_data}
}};
"
        ))
    }

    /// A `main.c` that loads the tiles, map, and palette and shows the background.
    ///
    /// `set_bkg_tiles` takes a byte map, so this only fits assets without `wide_map`.
    pub fn main_source(&self) -> String {
        let file = camel_case(self.name);
        let c = constant_case(self.name);

        format!(
            "\
/**
 * main.c
 *
 * Generated with gbtile
 */

#include \"{file}.c\"
#include <gb/cgb.h>
#include <gb/gb.h>

void main() {{
  DISPLAY_ON;
  SHOW_BKG;

  set_bkg_data({c}_TILE_OFFSET, {c}_TILE_COUNT, {file}Tiles);
  set_bkg_tiles(0, 0, {c}_WIDTH, {c}_HEIGHT, {file}Map);
  set_bkg_palette({c}_PALETTE_OFFSET, 1, {file}Palette);
}}
"
        )
    }
}

fn words(name: &str) -> impl Iterator<Item = &str> {
    name.split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
}

/// `my-title screen` -> `myTitleScreen`
fn camel_case(name: &str) -> String {
    words(name)
        .enumerate()
        .map(|(i, word)| {
            let lower = word.to_ascii_lowercase();
            if i == 0 {
                return lower;
            }
            let mut chars = lower.chars();
            chars
                .next()
                .map(|first| first.to_ascii_uppercase().to_string() + chars.as_str())
                .unwrap_or_default()
        })
        .collect()
}

/// `my-title screen` -> `MY_TITLE_SCREEN`
fn constant_case(name: &str) -> String {
    words(name).map(|w| w.to_ascii_uppercase()).join("_")
}
