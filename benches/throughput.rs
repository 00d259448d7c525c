//! Throughput Benchmark for itemkv
//!
//! This benchmark measures the in-memory store and the handlers on top of it
//! under various workloads.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use itemkv::handlers::{CreateHandler, GetHandler, Request};
use itemkv::item::Item;
use itemkv::storage::MemoryStore;
use std::sync::Arc;
use std::time::Duration;

const TABLE: &str = "items";

fn item(i: u64) -> Item {
    Item::new(format!("id:{}", i), format!("name:{}", i), chrono::Utc::now())
}

/// Benchmark put operations
fn bench_put(c: &mut Criterion) {
    let store = Arc::new(MemoryStore::with_table(TABLE));

    let mut group = c.benchmark_group("put");
    group.throughput(Throughput::Elements(1));

    group.bench_function("put_item", |b| {
        let mut i = 0u64;
        b.iter(|| {
            let key = format!("id:{}", i);
            store.put_record(TABLE, &key, item(i).into_record()).unwrap();
            i += 1;
        });
    });

    group.finish();
}

/// Benchmark get operations
fn bench_get(c: &mut Criterion) {
    let store = Arc::new(MemoryStore::with_table(TABLE));

    // Pre-populate with data
    for i in 0..100_000 {
        store
            .put_record(TABLE, &format!("id:{}", i), item(i).into_record())
            .unwrap();
    }

    let mut group = c.benchmark_group("get");
    group.throughput(Throughput::Elements(1));

    group.bench_function("get_existing", |b| {
        let mut i = 0u64;
        b.iter(|| {
            let key = format!("id:{}", i % 100_000);
            black_box(store.get_record(TABLE, &key).unwrap());
            i += 1;
        });
    });

    group.bench_function("get_missing", |b| {
        let mut i = 0u64;
        b.iter(|| {
            let key = format!("missing:{}", i);
            black_box(store.get_record(TABLE, &key).unwrap());
            i += 1;
        });
    });

    group.finish();
}

/// Benchmark the handlers end to end (parse, store, encode)
fn bench_handlers(c: &mut Criterion) {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .build()
        .unwrap();
    let store = Arc::new(MemoryStore::with_table(TABLE));
    let create = CreateHandler::new(Arc::clone(&store), TABLE);
    let get = GetHandler::new(Arc::clone(&store), TABLE);

    let seeded = runtime.block_on(create.handle(Request::with_body(r#"{"name":"widget"}"#)));
    let seeded: serde_json::Value = serde_json::from_str(&seeded.body).unwrap();
    let seeded_id = seeded["id"].as_str().unwrap().to_string();

    let mut group = c.benchmark_group("handlers");
    group.throughput(Throughput::Elements(1));

    group.bench_function("create", |b| {
        b.iter(|| {
            black_box(runtime.block_on(create.handle(Request::with_body(r#"{"name":"widget"}"#))));
        });
    });

    group.bench_function("get", |b| {
        b.iter(|| {
            black_box(runtime.block_on(get.handle(Request::with_id(seeded_id.as_str()))));
        });
    });

    group.finish();
}

/// Benchmark concurrent access
fn bench_concurrent(c: &mut Criterion) {
    use std::thread;

    let mut group = c.benchmark_group("concurrent");
    group.measurement_time(Duration::from_secs(10));

    group.bench_function("4_threads_mixed", |b| {
        b.iter(|| {
            let store = Arc::new(MemoryStore::with_table(TABLE));
            let handles: Vec<_> = (0..4u64)
                .map(|t| {
                    let store = Arc::clone(&store);
                    thread::spawn(move || {
                        for i in 0..10_000u64 {
                            let key = format!("id:{}:{}", t, i);
                            store.put_record(TABLE, &key, item(i).into_record()).unwrap();
                            store.get_record(TABLE, &key).unwrap();
                        }
                    })
                })
                .collect();

            for handle in handles {
                handle.join().unwrap();
            }

            black_box(store.len());
        });
    });

    group.finish();
}

criterion_group!(benches, bench_put, bench_get, bench_handlers, bench_concurrent);

criterion_main!(benches);
