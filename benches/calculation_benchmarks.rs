//! Performance benchmarks for the Prima Engine.
//!
//! Covers the pipeline called directly and through the HTTP router:
//! - Single record, direct call
//! - Single record over HTTP
//! - Batch of 100 and 1000 records over HTTP
//! - Scaling with the number of unpaid absences
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use chrono::{Duration, NaiveDate};
use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use prima_engine::api::{AppState, create_router};
use prima_engine::calculation::PrimaCalculator;
use prima_engine::clock::FixedClock;
use prima_engine::config::FiscalConfig;

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn create_calculator() -> PrimaCalculator {
    let clock = FixedClock::new(NaiveDate::from_ymd_opt(2025, 7, 1).unwrap());
    PrimaCalculator::with_clock(FiscalConfig::default(), clock)
}

fn create_test_state() -> AppState {
    AppState::new(create_calculator())
}

/// Creates a record with `absence_count` unpaid absences spread over the semester.
fn create_record(index: usize, absence_count: usize) -> serde_json::Value {
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    let absences: Vec<String> = (0..absence_count)
        .map(|i| (start + Duration::days((i * 7 % 181) as i64)).to_string())
        .collect();
    let salary = 1_500_000 + (index as i64 % 50) * 1_000_000;

    serde_json::json!({
        "name": format!("Empleado {:04}", index),
        "entry_date": "2020-01-01",
        "monthly_salaries": {
            "enero": salary, "febrero": salary, "marzo": salary,
            "abril": salary, "mayo": salary, "junio": salary + 250_000
        },
        "calculation_period": "primer_semestre",
        "salary_method": if index % 2 == 0 { "promedio" } else { "actual" },
        "unpaid_absences": absences
    })
}

fn post(body: String) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/calculate")
        .header("Content-Type", "application/json")
        .body(Body::from(body))
        .unwrap()
}

/// Benchmark: validation plus pipeline, no HTTP.
fn bench_single_record_direct(c: &mut Criterion) {
    let calculator = create_calculator();
    let record = create_record(7, 2);

    c.bench_function("single_record_direct", |b| {
        b.iter(|| black_box(calculator.calculate(black_box(&record))))
    });
}

/// Benchmark: one record through the router.
fn bench_single_record_http(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(create_test_state());
    let body = create_record(7, 2).to_string();

    c.bench_function("single_record_http", |b| {
        b.to_async(&rt).iter(|| async {
            let response = router.clone().oneshot(post(body.clone())).await.unwrap();
            black_box(response)
        })
    });
}

fn bench_batch(c: &mut Criterion, size: usize) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let state = create_test_state();

    let requests: Vec<String> = (0..size)
        .map(|i| create_record(i, i % 4).to_string())
        .collect();

    let mut group = c.benchmark_group("batch_processing");
    group.throughput(Throughput::Elements(size as u64));
    if size >= 1000 {
        group.sample_size(10);
    }

    group.bench_function(format!("batch_{}", size), |b| {
        b.to_async(&rt).iter(|| async {
            let mut results = Vec::with_capacity(size);
            for body in &requests {
                let router = create_router(state.clone());
                let response = router.oneshot(post(body.clone())).await.unwrap();
                results.push(response);
            }
            black_box(results)
        })
    });

    group.finish();
}

/// Benchmark: Batch of 100 records.
fn bench_batch_100(c: &mut Criterion) {
    bench_batch(c, 100);
}

/// Benchmark: Batch of 1000 records.
fn bench_batch_1000(c: &mut Criterion) {
    bench_batch(c, 1000);
}

/// Benchmark: Various absence counts to understand scaling behavior.
fn bench_absence_scaling(c: &mut Criterion) {
    let calculator = create_calculator();
    let mut group = c.benchmark_group("absence_scaling");

    for absence_count in [0usize, 5, 30, 180].iter() {
        let record = create_record(1, *absence_count);

        group.throughput(Throughput::Elements(*absence_count as u64));
        group.bench_with_input(
            BenchmarkId::new("absences", absence_count),
            absence_count,
            |b, _| b.iter(|| black_box(calculator.calculate(&record))),
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_single_record_direct,
    bench_single_record_http,
    bench_batch_100,
    bench_batch_1000,
    bench_absence_scaling,
);
criterion_main!(benches);
