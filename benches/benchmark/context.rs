use std::hint::black_box;

use criterion::{criterion_group, BenchmarkId, Criterion};
use flow_rail::{Fault, FlowContext, Handler};

use crate::common::{configure_criterion, DomainError};

pub fn bench_handler_lookup_depth(c: &mut Criterion) {
    let mut group = c.benchmark_group("context/handler_lookup");
    let fault = Fault::new(DomainError::NotFound(1));

    for depth in [1usize, 4, 16] {
        let ctx = FlowContext::with_handler(Handler::on(|e: &DomainError| e.to_string()));
        for _ in 1..depth {
            ctx.push(Handler::on(|e: &std::num::ParseIntError| e.to_string()));
        }

        group.bench_with_input(BenchmarkId::from_parameter(depth), &depth, |b, _| {
            b.iter(|| black_box(ctx.to_message(black_box(&fault))))
        });
    }

    group.finish();
}

pub fn bench_push_pop(c: &mut Criterion) {
    let ctx = FlowContext::new();
    let handler = Handler::any();

    c.bench_function("context/push_pop", |b| {
        b.iter(|| {
            ctx.push(handler.clone());
            black_box(ctx.pop());
        })
    });
}

criterion_group! {
    name = context_benches;
    config = configure_criterion();
    targets =
        bench_handler_lookup_depth,
        bench_push_pop,
}
