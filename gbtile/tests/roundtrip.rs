use gbtile::{ColorIndex, Tile};

/// Deterministic byte stream so every run checks the same buffers.
fn xorshift_bytes(mut state: u32, len: usize) -> Vec<u8> {
    (0..len)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            state as u8
        })
        .collect()
}

#[test]
fn decode_then_encode_is_identity() {
    let bank = xorshift_bytes(0x2bb0_1989, 16 * 512);
    for bytes in bank.chunks_exact(16) {
        let tile = Tile::from_2bpp(bytes).unwrap();
        assert_eq!(&tile.to_2bpp()[..], bytes);
    }
}

#[test]
fn encode_then_decode_is_identity() {
    let pixels = xorshift_bytes(0xdead_beef, 64 * 512);
    for values in pixels.chunks_exact(64) {
        let rows = values
            .chunks_exact(8)
            .map(|row| row.iter().map(|v| v & 0b11).collect::<Vec<_>>())
            .collect::<Vec<_>>();
        let tile = Tile::from_rows(&rows).unwrap();
        assert_eq!(Tile::from_2bpp(&tile.to_2bpp()).unwrap(), tile);
    }
}

#[test]
fn every_bit_pattern_of_a_row_survives() {
    for low in 0..=255u8 {
        for high in [0x00, 0xff, 0xa5, low, !low] {
            let mut bytes = [0u8; 16];
            bytes[6] = low;
            bytes[7] = high;
            let tile = Tile::from_2bpp(&bytes).unwrap();
            assert_eq!(tile.to_2bpp(), bytes);

            for x in 0..8 {
                let expected = ((high >> (7 - x)) & 1) << 1 | ((low >> (7 - x)) & 1);
                assert_eq!(tile.get(x, 3), Some(ColorIndex::new(expected).unwrap()));
            }
        }
    }
}
