use std::io::{Cursor, Write};

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use dted::header::{DATA, DSI_NBLAT, DSI_NBLON};
use tempfile::TempDir;

/// Level 2 tile dimensions below 50° latitude.
const LAT_COUNT: usize = 3601;
const LON_COUNT: usize = 3601;

/// Create a synthetic level 2 tile with a simple elevation gradient.
fn tile_bytes() -> Vec<u8> {
    let mut data = vec![b'0'; DATA as usize];
    data[DSI_NBLAT as usize..DSI_NBLAT as usize + 4].copy_from_slice(b"3601");
    data[DSI_NBLON as usize..DSI_NBLON as usize + 4].copy_from_slice(b"3601");

    for col in 0..LON_COUNT {
        data.extend_from_slice(&[0xAA, 0, 0, 0, 0, 0, 0, 0]);
        for row in 0..LAT_COUNT {
            let elev = ((row + col) % 4000) as u16;
            data.extend_from_slice(&elev.to_be_bytes());
        }
        data.extend_from_slice(&[0, 0, 0, 0]);
    }
    data
}

fn bench_decode_file(c: &mut Criterion) {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("n45_e005_1arc_v3.dt2");
    let mut file = std::fs::File::create(&path).unwrap();
    file.write_all(&tile_bytes()).unwrap();

    c.bench_function("decode_level2_file", |b| {
        b.iter(|| black_box(dted::Tile::from_file(black_box(&path)).unwrap()));
    });
}

fn bench_decode_memory(c: &mut Criterion) {
    let bytes = tile_bytes();

    c.bench_function("decode_level2_memory", |b| {
        b.iter(|| {
            black_box(dted::Tile::from_reader(Cursor::new(black_box(&bytes[..]))).unwrap())
        });
    });
}

fn bench_space_init(c: &mut Criterion) {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("n45_e005_1arc_v3.dt2"), tile_bytes()).unwrap();

    c.bench_function("space_init", |b| {
        b.iter(|| black_box(dted::Space::init(tmp.path(), 5.72, 45.18).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_decode_file,
    bench_decode_memory,
    bench_space_init
);
criterion_main!(benches);
