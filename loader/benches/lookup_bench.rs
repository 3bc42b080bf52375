//! Criterion harness: single point-lookup latency on each path, against a
//! seeded in-memory world.

use criterion::{criterion_group, criterion_main, Criterion};
use loader::benchmark::{read_cached, read_relational};
use loader::denormalize::flatten_all;
use loader::extract::PaginatedExtractor;
use loader::keydb::MemoryStore;
use loader::populate::populate;
use loader::relational::WorldDb;
use loader::synthetic::{generate_synthetic, seed_world, WorldParams};
use world_core::constants::BENCHMARK_CITY_IDS;

fn setup() -> (WorldDb, MemoryStore) {
    let mut db = WorldDb::open_in_memory().expect("open in-memory SQLite");
    seed_world(&mut db, &generate_synthetic(&WorldParams::standard())).expect("seed");

    let cities = PaginatedExtractor::default()
        .extract_all(&mut db)
        .expect("extract");
    let records = flatten_all(&cities).expect("flatten");
    let mut store = MemoryStore::new();
    populate(&mut store, &records).expect("populate");

    (db, store)
}

fn bench_point_lookups(c: &mut Criterion) {
    let (db, mut store) = setup();
    let mut group = c.benchmark_group("point_lookup");

    group.bench_function("relational", |b| {
        b.iter(|| {
            for &id in &BENCHMARK_CITY_IDS {
                read_relational(&db, id).expect("relational read");
            }
        });
    });

    group.bench_function("cache_decode", |b| {
        b.iter(|| {
            for &id in &BENCHMARK_CITY_IDS {
                read_cached(&mut store, id).expect("cache read");
            }
        });
    });

    group.finish();
}

fn bench_extraction(c: &mut Criterion) {
    let (mut db, _) = setup();
    let mut group = c.benchmark_group("extract_all");
    group.sample_size(20);

    group.bench_function("page_500", |b| {
        b.iter(|| {
            PaginatedExtractor::default()
                .extract_all(&mut db)
                .expect("extract")
        });
    });
    group.finish();
}

criterion_group!(benches, bench_point_lookups, bench_extraction);
criterion_main!(benches);
