use criterion::{
    black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion, Throughput,
};

use chrono::Utc;
use wms_core::{BinId, SkuId};
use wms_inventory::{
    consolidation_proposals, parse_inventory_csv, remise_tasks, InventoryState, TransferStock,
};

/// Synthetic snapshot: `rows` rows spread over 50 SKUs and 40 bins.
fn synthetic_csv(rows: usize) -> String {
    let mut csv = String::from("sku,description,bin,qty,capacity\n");
    for i in 0..rows {
        csv.push_str(&format!(
            "SKU{:03},Item {},{}{:02},{},200\n",
            i % 50,
            i % 50,
            ["A", "B", "C", "D"][i % 4],
            i % 10,
            (i * 7) % 40 + 1
        ));
    }
    csv
}

fn loaded_state(rows: usize) -> InventoryState {
    let mut state = InventoryState::new();
    state.replace_stock(parse_inventory_csv(&synthetic_csv(rows)));
    state
}

fn bench_csv_import(c: &mut Criterion) {
    let mut group = c.benchmark_group("csv_import");

    for rows in [10, 100, 1000, 10000].iter() {
        let csv = synthetic_csv(*rows);
        group.throughput(Throughput::Elements(*rows as u64));
        group.bench_with_input(BenchmarkId::new("parse", rows), &csv, |b, csv| {
            b.iter(|| black_box(parse_inventory_csv(black_box(csv))));
        });
    }

    group.finish();
}

fn bench_task_generation(c: &mut Criterion) {
    let mut group = c.benchmark_group("task_generation");

    for rows in [100, 1000, 10000].iter() {
        let state = loaded_state(*rows);
        group.bench_with_input(BenchmarkId::new("remise", rows), &state, |b, state| {
            b.iter(|| black_box(remise_tasks(state)));
        });
        group.bench_with_input(BenchmarkId::new("consolidation", rows), &state, |b, state| {
            b.iter(|| black_box(consolidation_proposals(state)));
        });
    }

    group.finish();
}

fn bench_transfer(c: &mut Criterion) {
    let mut group = c.benchmark_group("transfer");

    group.bench_function("round_trip_1000_rows", |b| {
        let there = TransferStock {
            from_bin: BinId::new("A00"),
            to_bin: BinId::new("B01"),
            sku_id: SkuId::new("SKU000"),
            qty: 1,
            occurred_at: Utc::now(),
        };
        let back = TransferStock {
            from_bin: there.to_bin.clone(),
            to_bin: there.from_bin.clone(),
            ..there.clone()
        };

        // Fresh state per batch keeps the transfer log short.
        b.iter_batched(
            || loaded_state(1000),
            |mut state| {
                state.transfer(black_box(&there)).unwrap();
                state.transfer(black_box(&back)).unwrap();
                state
            },
            BatchSize::SmallInput,
        );
    });

    group.finish();
}

criterion_group!(benches, bench_csv_import, bench_task_generation, bench_transfer);
criterion_main!(benches);
