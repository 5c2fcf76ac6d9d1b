use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use gbtile::{Palette, TileMap, Tiles};
use image::{Rgba, RgbaImage};

/// Synthetic quantized screens: one with a handful of repeating tiles, one where nearly every
/// tile is different.
fn images() -> Vec<(&'static str, RgbaImage)> {
    let palette = Palette::DMG;
    let color = |index: u32| {
        let [r, g, b] = palette.get(index as usize % 4).unwrap().to_rgb();
        Rgba([r, g, b, 255])
    };

    let mut state = 0x1234_5678u32;
    let mut noise = move || {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        state
    };

    vec![
        (
            "repeating 160x144",
            RgbaImage::from_fn(160, 144, |x, y| color((x / 8 + y / 8) % 3 + x % 2)),
        ),
        (
            "noise 256x256",
            RgbaImage::from_fn(256, 256, |_, _| color(noise())),
        ),
    ]
}

fn slice(c: &mut Criterion) {
    let mut group = c.benchmark_group("slice");

    for (name, image) in images() {
        let width = image.width() as usize;
        let pixel_count = width * image.height() as usize;

        group.throughput(criterion::Throughput::Elements(pixel_count as u64));
        group.bench_with_input(BenchmarkId::new("from_rgba", name), &image, |b, image| {
            b.iter(|| Tiles::from_rgba(image.as_raw(), &Palette::DMG, width).unwrap())
        });
    }
}

fn dedup(c: &mut Criterion) {
    let mut group = c.benchmark_group("dedup");

    for (name, image) in images() {
        let width = image.width() as usize;
        let tiles = Tiles::from_rgba(image.as_raw(), &Palette::DMG, width).unwrap();

        group.throughput(criterion::Throughput::Elements(tiles.len() as u64));
        group.bench_with_input(BenchmarkId::new("from_tiles", name), &tiles, |b, tiles| {
            b.iter(|| TileMap::from_tiles(tiles, 0).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("to_2bpp", name), &tiles, |b, tiles| {
            b.iter(|| tiles.to_2bpp())
        });
    }
}

criterion_group!(benches, slice, dedup);
criterion_main!(benches);
