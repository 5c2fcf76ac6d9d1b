use gbtile::{tile::TileError, ColorIndex, Palette, PaletteColor, Tile};

fn worked_example() -> Tile {
    Tile::from_rows(&[
        [0, 2, 3, 3, 3, 3, 2, 0],
        [0, 3, 0, 0, 0, 0, 3, 0],
        [0, 3, 0, 0, 0, 0, 3, 0],
        [0, 3, 0, 0, 0, 0, 3, 0],
        [0, 3, 1, 3, 3, 3, 3, 0],
        [0, 1, 1, 1, 3, 1, 3, 0],
        [0, 3, 1, 3, 1, 3, 2, 0],
        [0, 2, 3, 3, 3, 2, 0, 0],
    ])
    .unwrap()
}

#[test]
fn solid_index_one_sets_only_low_plane() {
    let tile = Tile::from_rows(&[[1u8; 8]; 8]).unwrap();
    assert_eq!(tile.to_2bpp(), [0xffu8, 0x00].repeat(8)[..]);
}

#[test]
fn worked_example_encodes_to_known_bytes() {
    assert_eq!(
        worked_example().to_2bpp(),
        [
            0x3c, 0x7e, 0x42, 0x42, 0x42, 0x42, 0x42, 0x42, 0x7e, 0x5e, 0x7e, 0x0a, 0x7c, 0x56,
            0x38, 0x7c,
        ]
    );
}

#[test]
fn worked_example_decodes_back() {
    let tile = worked_example();
    assert_eq!(Tile::from_2bpp(&tile.to_2bpp()), Ok(tile));
    assert_eq!(tile.get(1, 0), ColorIndex::new(2).ok());
    assert_eq!(tile.get(8, 0), None);
    assert_eq!(tile.get(0, 8), None);
}

#[test]
fn rejects_wrong_shapes() {
    let seven_rows = vec![[0u8; 8]; 7];
    let nine_rows = vec![[0u8; 8]; 9];
    let short_row = [
        vec![0u8; 8],
        vec![0; 8],
        vec![0; 8],
        vec![0; 7],
        vec![0; 8],
        vec![0; 8],
        vec![0; 8],
        vec![0; 8],
    ];

    assert_eq!(
        Tile::from_rows(&seven_rows),
        Err(TileError::InvalidShape { rows: 7, columns: 8 })
    );
    assert_eq!(
        Tile::from_rows(&nine_rows),
        Err(TileError::InvalidShape { rows: 9, columns: 8 })
    );
    assert_eq!(
        Tile::from_rows(&short_row),
        Err(TileError::InvalidShape { rows: 8, columns: 7 })
    );
}

#[test]
fn rejects_out_of_range_pixels() {
    let mut rows = [[0u8; 8]; 8];
    rows[5][2] = 4;
    assert_eq!(
        Tile::from_rows(&rows),
        Err(TileError::InvalidColorIndex { value: 4 })
    );
    assert_eq!(ColorIndex::new(3).map(u8::from), Ok(3));
    assert!(ColorIndex::try_from(255u8).is_err());
}

#[test]
fn rejects_wrong_byte_counts() {
    assert_eq!(
        Tile::from_2bpp(&[0; 15]),
        Err(TileError::InvalidLength { len: 15 })
    );
    assert_eq!(
        Tile::from_2bpp(&[0; 17]),
        Err(TileError::InvalidLength { len: 17 })
    );
    assert!(Tile::try_from(&[0u8; 16][..]).is_ok());
}

#[test]
fn structural_equality() {
    let a = worked_example();
    let b = Tile::from_2bpp(&a.to_2bpp()).unwrap();
    assert_eq!(a, b);

    let mut rows = *a.rows();
    rows[7][7] = ColorIndex::new(1).unwrap();
    assert_ne!(a, Tile::new(rows));
}

#[test]
fn renders_through_palette() {
    let palette = Palette::new([
        PaletteColor::new(10, 20, 30),
        PaletteColor::new(40, 50, 60),
        PaletteColor::new(70, 80, 90),
        PaletteColor::new(100, 110, 120),
    ]);
    let rgba = worked_example().to_rgba(&palette);

    assert_eq!(rgba.len(), 8 * 8 * 4);
    // (1, 0) is index 2, (1, 5) is index 1
    assert_eq!(rgba[4..8], [70u8, 80, 90, 255]);
    assert_eq!(rgba[(5 * 8 + 1) * 4..(5 * 8 + 2) * 4], [40u8, 50, 60, 255]);
    assert!(rgba.chunks_exact(4).all(|p| p[3] == 255));
}
