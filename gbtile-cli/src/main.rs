use argh::FromArgs;
use byteorder::LittleEndian;
use gbtile::{consts::TILE_SIZE, Palette, PaletteColor, TileMap, Tiles};
use image::{ImageFormat, RgbaImage};
use log::{debug, info};
use std::{error::Error, str::FromStr};

mod gbdk;

/// Game Boy tile converter.
#[derive(FromArgs)]
struct Cli {
    #[argh(subcommand)]
    command: Command,
}

#[derive(FromArgs)]
#[argh(subcommand)]
enum Command {
    Convert(Convert),
    Render(Render),
}

/// Converts an image already reduced to four colors into a tile bank, tile map, and palette.
#[derive(FromArgs)]
#[argh(subcommand, name = "convert")]
struct Convert {
    /// the four palette colors in slot order, e.g. `#e0f8d0,#88c070,#346856,#081820`. Taken from
    /// the image in order of appearance if omitted.
    #[argh(option)]
    palette: Option<PaletteArg>,

    /// index of the first tile in VRAM, added to every map entry
    #[argh(option, default = "0")]
    offset: usize,

    /// write the map as 16-bit little-endian entries instead of bytes
    #[argh(switch)]
    wide_map: bool,

    /// also write GBDK `.h` and `.c` sources using this asset name
    #[argh(option)]
    name: Option<String>,

    /// CGB background palette slot (0-7) the GBDK sources load the palette into
    #[argh(option, default = "0")]
    palette_offset: u8,

    /// with `--name`, also write a `<output>_main.c` that displays the image
    #[argh(switch)]
    main: bool,

    /// the input image (PNG or BMP)
    #[argh(positional)]
    input: String,
    /// output path without extension; `.2bpp`, `.tilemap` and `.pal` are appended
    #[argh(positional)]
    output: String,
}

/// Renders a 2bpp tile bank as a PNG sheet.
#[derive(FromArgs)]
#[argh(subcommand, name = "render")]
struct Render {
    /// the four palette colors in slot order. Defaults to the DMG grey ramp.
    #[argh(option)]
    palette: Option<PaletteArg>,

    /// read the palette from a `.pal` file written by `convert` instead
    #[argh(option)]
    pal_file: Option<String>,

    /// tiles per row of the sheet
    #[argh(option, default = "16")]
    columns: usize,

    /// the input tile bank
    #[argh(positional)]
    input: String,
    /// the output PNG
    #[argh(positional)]
    output: String,
}

struct PaletteArg(Palette);

impl FromStr for PaletteArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let colors = s
            .split(',')
            .map(|hex| PaletteColor::from_hex(hex.trim()).map_err(|e| format!("`{hex}`: {e}")))
            .collect::<Result<Vec<_>, _>>()?;

        let colors: [PaletteColor; 4] = colors
            .try_into()
            .map_err(|c: Vec<_>| format!("expected 4 colors, got {}", c.len()))?;

        Ok(PaletteArg(Palette::new(colors)))
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let Cli { command } = argh::from_env();

    match command {
        Command::Convert(options) => convert(options),
        Command::Render(options) => render(options),
    }
}

fn convert(options: Convert) -> Result<(), Box<dyn Error>> {
    let Convert {
        palette,
        offset,
        wide_map,
        name,
        palette_offset,
        main,
        input,
        output,
    } = options;

    if palette_offset >= 8 {
        return Err(format!("palette offset must be 0-7, got {palette_offset}").into());
    }
    if main && name.is_none() {
        return Err("--main needs --name".into());
    }
    if main && wide_map {
        return Err("--main loads the map with set_bkg_tiles, which takes a byte map; drop --wide-map".into());
    }

    let image = image::io::Reader::open(&input)?
        .with_guessed_format()?
        .decode()?
        .into_rgba8();
    let (width, height) = image.dimensions();

    info!("Converting {width}x{height} image `{input}`");

    let palette = match palette {
        Some(PaletteArg(palette)) => palette,
        None => palette_from_image(&image)?,
    };
    debug!(
        "palette: {}",
        palette.iter().map(|c| c.to_hex()).collect::<Vec<_>>().join(", ")
    );

    let tiles = Tiles::from_rgba(image.as_raw(), &palette, width as usize)?;
    let (map, unique) = TileMap::from_tiles(&tiles, offset)?;

    info!(
        "{} cells, {} unique tiles (indices {offset}..={})",
        map.len(),
        unique.len(),
        offset + unique.len().saturating_sub(1)
    );

    let map_bytes = if wide_map {
        map.to_u16_bytes::<LittleEndian>()?
    } else {
        map.to_u8_bytes()?
    };

    write_output(&format!("{output}.2bpp"), &unique.to_2bpp())?;
    write_output(&format!("{output}.tilemap"), &map_bytes)?;
    write_output(
        &format!("{output}.pal"),
        &palette.to_rgb555_bytes::<LittleEndian>(),
    )?;

    if let Some(name) = name {
        let asset = gbdk::Asset {
            name: &name,
            width: width as usize / TILE_SIZE,
            height: height as usize / TILE_SIZE,
            tiles: &unique,
            map: &map,
            wide_map,
            palette: &palette,
            palette_offset,
        };
        write_output(&format!("{output}.h"), asset.header().as_bytes())?;
        write_output(&format!("{output}.c"), asset.definitions()?.as_bytes())?;
        if main {
            write_output(&format!("{output}_main.c"), asset.main_source().as_bytes())?;
        }
    }

    Ok(())
}

fn render(options: Render) -> Result<(), Box<dyn Error>> {
    let Render {
        palette,
        pal_file,
        columns,
        input,
        output,
    } = options;

    if columns == 0 {
        return Err("columns must be at least 1".into());
    }

    let palette = match (palette, pal_file) {
        (Some(_), Some(_)) => return Err("use either --palette or --pal-file, not both".into()),
        (Some(PaletteArg(palette)), None) => palette,
        (None, Some(path)) => {
            let bytes: [u8; 8] = std::fs::read(&path)?
                .try_into()
                .map_err(|_| format!("`{path}` is not an 8-byte palette file"))?;
            Palette::from_rgb555_bytes::<LittleEndian>(&bytes)
        }
        (None, None) => Palette::default(),
    };

    let tiles = Tiles::from_2bpp(&std::fs::read(&input)?)?;
    if tiles.is_empty() {
        return Err(format!("`{input}` contains no tiles").into());
    }

    info!("Rendering {} tiles from `{input}`", tiles.len());

    let columns = columns.min(tiles.len());
    let rows = (tiles.len() + columns - 1) / columns;
    let mut sheet = RgbaImage::new((columns * TILE_SIZE) as u32, (rows * TILE_SIZE) as u32);

    for (i, tile) in tiles.iter().enumerate() {
        let (tile_x, tile_y) = ((i % columns) * TILE_SIZE, (i / columns) * TILE_SIZE);
        let rgba = tile.to_rgba(&palette);
        for (p, pixel) in rgba.chunks_exact(4).enumerate() {
            let x = tile_x + p % TILE_SIZE;
            let y = tile_y + p / TILE_SIZE;
            sheet.put_pixel(
                x as u32,
                y as u32,
                image::Rgba([pixel[0], pixel[1], pixel[2], pixel[3]]),
            );
        }
    }

    sheet.save_with_format(&output, ImageFormat::Png)?;
    info!(
        "Written {}x{} sheet to `{output}`",
        sheet.width(),
        sheet.height()
    );

    Ok(())
}

/// Collects the distinct colors of an already quantized image in order of appearance.
///
/// Fewer than four colors are padded by repeating the last one (black for an empty image).
fn palette_from_image(image: &RgbaImage) -> Result<Palette, Box<dyn Error>> {
    let mut colors: Vec<PaletteColor> = Vec::with_capacity(4);
    for pixel in image.pixels() {
        let color = PaletteColor::from(pixel.0);
        if colors.contains(&color) {
            continue;
        }
        if colors.len() == 4 {
            return Err(format!(
                "image has more than 4 colors (found {color} after {}), quantize it first or pass --palette",
                colors.iter().map(|c| c.to_hex()).collect::<Vec<_>>().join(", ")
            )
            .into());
        }
        colors.push(color);
    }

    let pad = colors.last().copied().unwrap_or(PaletteColor::BLACK);
    colors.resize(4, pad);

    let colors: [PaletteColor; 4] = colors
        .try_into()
        .map_err(|_| "palette must have exactly 4 colors")?;
    Ok(Palette::new(colors))
}

fn write_output(path: &str, bytes: &[u8]) -> Result<(), Box<dyn Error>> {
    std::fs::write(path, bytes)?;
    info!("Written {} bytes to `{path}`", bytes.len());
    Ok(())
}
