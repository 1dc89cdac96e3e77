//! Performance benchmarks for the harvest analytics pipeline.
//!
//! The engine recomputes every derived structure on each state change, so
//! the full pipeline must stay cheap at realistic dataset sizes (hundreds of
//! workers, a season of dates).
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use harvest_engine::analytics::{DateIndex, aggregate_range};
use harvest_engine::config::EngineConfig;
use harvest_engine::models::{GroupFilter, QueryState, SortDirection, SortKey, WorkerRecord};
use harvest_engine::session::compute_view;

/// Builds a synthetic season: `worker_count` workers weighing on every
/// third day of a 90-day window.
fn synthetic_workers(worker_count: usize) -> Vec<WorkerRecord> {
    let season_start = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
    let records: Vec<serde_json::Value> = (0..worker_count)
        .map(|i| {
            let mut weighings = serde_json::Map::new();
            for day in (0..90u64).step_by(3) {
                let date = season_start
                    .checked_add_days(chrono::Days::new(day))
                    .unwrap()
                    .format("%Y-%m-%d")
                    .to_string();
                let base = (i % 17 + 1) as f64;
                weighings.insert(date, serde_json::json!([base, base * 1.5, base * 0.5]));
            }
            serde_json::json!({
                "id": format!("{:08}-{}", i, i % 10),
                "name": format!("Trabajador Número {i:04}"),
                "group": format!("Cuadrilla {}", i % 6),
                "weighings": weighings
            })
        })
        .collect();
    serde_json::from_value(serde_json::Value::Array(records)).expect("synthetic dataset")
}

fn bench_aggregation(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate_range");

    for worker_count in [100, 500, 1000] {
        let workers = synthetic_workers(worker_count);
        let index = DateIndex::from_workers(&workers);
        let range = index.snap_range(None, None);

        group.throughput(Throughput::Elements(worker_count as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(worker_count),
            &workers,
            |b, workers| {
                b.iter(|| aggregate_range(black_box(workers), black_box(range)));
            },
        );
    }

    group.finish();
}

fn bench_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_view");

    for worker_count in [100, 500, 1000] {
        let workers = synthetic_workers(worker_count);
        let index = DateIndex::from_workers(&workers);
        let config = EngineConfig::default();

        let mut state = QueryState::default();
        if let Some((from, to)) = index.snap_range(None, None) {
            state.date_from = Some(from);
            state.date_to = Some(to);
        }
        state.search_text = "trabajador".to_string();
        state.group = GroupFilter::Group("Cuadrilla 2".to_string());
        state.sort_key = SortKey::Total;
        state.sort_direction = SortDirection::Desc;

        group.throughput(Throughput::Elements(worker_count as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(worker_count),
            &workers,
            |b, workers| {
                b.iter(|| {
                    compute_view(
                        black_box(workers),
                        black_box(&config),
                        black_box(&index),
                        black_box(&state),
                    )
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_aggregation, bench_full_pipeline);
criterion_main!(benches);
