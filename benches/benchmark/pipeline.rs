use std::hint::black_box;

use criterion::{criterion_group, Criterion};
use flow_rail::{val, Fault, Handler};

use crate::common::{configure_criterion, simulate_activity_check, simulate_db_query, DomainError};

fn flow_user_service(user_id: u64) -> Result<Result<String, String>, Fault> {
    let flow = val(user_id)
        .with_handler(Handler::on(|e: &DomainError| format!("user service: {e}")))
        .map(|id| Ok(simulate_db_query(*id)?))?
        .side_effect(|user| Ok(simulate_activity_check(user)?))?
        .map(|user| Ok(user.username.clone()))?;
    Ok(flow.into_result())
}

fn result_user_service(user_id: u64) -> Result<String, String> {
    simulate_db_query(user_id)
        .and_then(|user| simulate_activity_check(&user).map(|_| user))
        .map(|user| user.username)
        .map_err(|e| format!("user service: {e}"))
}

pub fn bench_flow_vs_result_success(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline/vs_result");

    group.bench_function("flow_success", |b| {
        b.iter(|| {
            let result = flow_user_service(black_box(42));
            let _ = black_box(result).is_ok();
        })
    });

    group.bench_function("result_baseline_success", |b| {
        b.iter(|| {
            let result = result_user_service(black_box(42));
            let _ = black_box(result).is_ok();
        })
    });

    group.finish();
}

pub fn bench_flow_vs_result_error(c: &mut Criterion) {
    let mut group = c.benchmark_group("pipeline/vs_result");

    group.bench_function("flow_error", |b| {
        b.iter(|| {
            let result = flow_user_service(black_box(100));
            let _ = black_box(result).is_ok();
        })
    });

    group.bench_function("result_baseline_error", |b| {
        b.iter(|| {
            let result = result_user_service(black_box(100));
            let _ = black_box(result).is_ok();
        })
    });

    group.finish();
}

criterion_group! {
    name = pipeline_benches;
    config = configure_criterion();
    targets =
        bench_flow_vs_result_success,
        bench_flow_vs_result_error,
}
