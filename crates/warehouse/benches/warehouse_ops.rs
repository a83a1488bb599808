use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use depot_warehouse::{Removal, Warehouse, WarehouseRegistry};

fn item_names(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("item-{i}")).collect()
}

fn bench_add_remove_latency(c: &mut Criterion) {
    let mut group = c.benchmark_group("add_remove_latency");
    group.sample_size(1000);

    group.bench_function("add_then_remove_single_item", |b| {
        let mut warehouse = Warehouse::new("bench", 1_000.0).unwrap();
        b.iter(|| {
            warehouse.add_item(black_box("bolt"), black_box(5.0)).unwrap();
            warehouse
                .remove_item(black_box("bolt"), Removal::Amount(5.0))
                .unwrap();
        });
    });

    group.bench_function("rejected_add_over_capacity", |b| {
        let mut warehouse = Warehouse::new("bench", 10.0).unwrap();
        b.iter(|| {
            let _ = black_box(warehouse.add_item("bolt", black_box(11.0)));
        });
    });

    group.finish();
}

fn bench_fill_throughput(c: &mut Criterion) {
    let mut group = c.benchmark_group("fill_throughput");

    for item_count in [10usize, 100, 1000].iter() {
        let names = item_names(*item_count);
        group.throughput(Throughput::Elements(*item_count as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(item_count),
            item_count,
            |b, &count| {
                b.iter(|| {
                    let mut registry = WarehouseRegistry::new();
                    let id = registry.create("bench", count as f64).unwrap();
                    for name in &names {
                        registry.add_item(id, name, 1.0).unwrap();
                    }
                    black_box(registry.get(id).map(|w| w.free_space()))
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_add_remove_latency, bench_fill_throughput);
criterion_main!(benches);
