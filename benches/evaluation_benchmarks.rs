//! Performance benchmarks for the Till Variance Engine.
//!
//! Covers the evaluation core on its own and behind the HTTP router:
//! - Three-tender evaluation: < 20μs mean
//! - Single request through the router: < 100μs mean
//! - Batch of 100 requests: < 20ms mean
//!
//! Run with: `cargo bench`
//! HTML reports are generated in `target/criterion/`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};

use till_engine::api::{AppState, EvaluationRequest, create_router};
use till_engine::config::ConfigLoader;
use till_engine::evaluation::{TillEventInput, evaluate_till_event};
use till_engine::models::{CapturedInput, CurrencyData, ExpectedTender, Money, TillEventType};

use axum::{body::Body, http::Request};
use tower::ServiceExt;

fn load_config() -> ConfigLoader {
    ConfigLoader::load("./config/store_001").expect("Failed to load config")
}

/// Creates a three-tender request with an expected and counted amount for every tender.
fn create_request(event_type: TillEventType, counted: &str) -> EvaluationRequest {
    let tenders = [("cash_usd", "USD"), ("cash_cad", "CAD"), ("cash_eur", "EUR")];
    EvaluationRequest {
        event_type,
        terminal_id: "reg_01".to_string(),
        till_id: "till_07".to_string(),
        currency_data: Some(
            tenders
                .iter()
                .enumerate()
                .map(|(i, (id, currency))| CurrencyData {
                    tender_id: id.to_string(),
                    currency_code: currency.to_string(),
                    tender_name: id.to_string(),
                    is_foreign_tender: i > 0,
                })
                .collect(),
        ),
        expected: tenders
            .iter()
            .map(|(id, currency)| {
                ExpectedTender::new(*id, Some(Money::parse("250.00", *currency).unwrap()))
            })
            .collect(),
        captured: tenders
            .iter()
            .map(|_| CapturedInput {
                transfer_amount: Some(counted.to_string()),
                float_amount: None,
            })
            .collect(),
    }
}

/// Benchmark: evaluation core without HTTP.
fn bench_evaluate_core(c: &mut Criterion) {
    let loader = load_config();
    let mut group = c.benchmark_group("evaluate_core");

    for event_type in [TillEventType::TillIn, TillEventType::TillCount] {
        let input: TillEventInput = create_request(event_type, "252.00").into();
        group.bench_with_input(
            BenchmarkId::new("event", event_type.as_str()),
            &input,
            |b, input| b.iter(|| black_box(evaluate_till_event(input, loader.config()))),
        );
    }

    group.finish();
}

/// Benchmark: single evaluation through the router.
///
/// Target: < 100μs mean
fn bench_single_request(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let router = create_router(AppState::new(load_config()));
    let body =
        serde_json::to_string(&create_request(TillEventType::TillCount, "240.00")).unwrap();

    c.bench_function("single_request", |b| {
        b.to_async(&rt).iter(|| async {
            let router = router.clone();
            let response = router
                .oneshot(
                    Request::builder()
                        .method("POST")
                        .uri("/evaluate")
                        .header("Content-Type", "application/json")
                        .body(Body::from(body.clone()))
                        .unwrap(),
                )
                .await
                .unwrap();
            black_box(response)
        })
    });
}

/// Benchmark: Batch of 100 evaluations across all events.
///
/// Target: < 20ms mean
fn bench_batch_100(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let state = AppState::new(load_config());

    let requests: Vec<String> = (0..100)
        .map(|i| {
            let event_type = TillEventType::ALL[i % TillEventType::ALL.len()];
            let counted = format!("{}.00", 240 + i % 20);
            serde_json::to_string(&create_request(event_type, &counted)).unwrap()
        })
        .collect();

    let mut group = c.benchmark_group("batch_processing");
    group.throughput(Throughput::Elements(100));

    group.bench_function("batch_100", |b| {
        b.to_async(&rt).iter(|| async {
            let mut results = Vec::with_capacity(100);
            for body in &requests {
                let router = create_router(state.clone());
                let response = router
                    .oneshot(
                        Request::builder()
                            .method("POST")
                            .uri("/evaluate")
                            .header("Content-Type", "application/json")
                            .body(Body::from(body.clone()))
                            .unwrap(),
                    )
                    .await
                    .unwrap();
                results.push(response);
            }
            black_box(results)
        })
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_evaluate_core,
    bench_single_request,
    bench_batch_100,
);
criterion_main!(benches);
