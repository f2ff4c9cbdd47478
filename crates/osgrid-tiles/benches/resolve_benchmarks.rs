//! Benchmarks for tile URL resolution.
//!
//! Run with: cargo bench --package osgrid-tiles
//! Or: cargo bench --package osgrid-tiles --bench resolve_benchmarks

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use osgrid_tiles::{tile_source, Protocol, TileAddress, TileSource, TileSourceConfig};

// =============================================================================
// SINGLE TILE BENCHMARKS
// =============================================================================

fn bench_single_tile(c: &mut Criterion) {
    let mut group = c.benchmark_group("single_tile");

    for protocol in [Protocol::LegacyBbox, Protocol::Matrix] {
        let source = tile_source("bench-key", protocol).unwrap();
        let address = TileAddress::new(12, -20, 3);

        group.bench_with_input(
            BenchmarkId::new("resolve_tile_url", protocol),
            &address,
            |b, address| b.iter(|| source.resolve_tile_url(black_box(address))),
        );
    }

    let source = tile_source("bench-key", Protocol::Matrix).unwrap();
    group.bench_function("resolve_host_tile", |b| {
        b.iter(|| source.resolve_host_tile(black_box(12.0), black_box(-20.0), black_box(3.0)))
    });

    group.finish();
}

// =============================================================================
// VIEWPORT BENCHMARKS
// =============================================================================

fn viewport(cols: i64, rows: i64, zoom: u32) -> Vec<TileAddress> {
    (-rows..0)
        .flat_map(|row| (0..cols).map(move |col| TileAddress::new(col, row, zoom)))
        .collect()
}

fn bench_viewport(c: &mut Criterion) {
    let mut group = c.benchmark_group("viewport");

    // A 1920x1080 screen needs roughly 8x5 matrix tiles
    let tiles = viewport(8, 5, 6);
    group.throughput(Throughput::Elements(tiles.len() as u64));

    let with_extras = TileSource::new(
        TileSourceConfig::new("bench-key", Protocol::Matrix)
            .with_param("style", "default")
            .with_param("TRANSPARENT", "true"),
    )
    .unwrap();

    for (name, source) in [
        ("legacy", tile_source("bench-key", Protocol::LegacyBbox).unwrap()),
        ("matrix", tile_source("bench-key", Protocol::Matrix).unwrap()),
        ("matrix_passthrough", with_extras),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| {
                for address in &tiles {
                    let _ = source.resolve_tile_url(black_box(address));
                }
            })
        });
    }

    group.finish();
}

// =============================================================================
// CONSTRUCTION BENCHMARKS
// =============================================================================

fn bench_construction(c: &mut Criterion) {
    let mut group = c.benchmark_group("construction");

    group.bench_function("tile_source_matrix", |b| {
        b.iter(|| tile_source(black_box("bench-key"), Protocol::Matrix))
    });

    let yaml = "api_key: bench-key\nprotocol: legacy-bbox\nextra_params:\n  TRANSPARENT: \"true\"\n";
    group.bench_function("from_yaml", |b| {
        b.iter(|| {
            TileSourceConfig::from_yaml_str(black_box(yaml)).and_then(TileSource::new)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_single_tile, bench_viewport, bench_construction);
criterion_main!(benches);
