use std::hint::black_box;

use criterion::{criterion_group, BenchmarkId, Criterion};
use flow_rail::{val, Flow, FlowContext, Ownership, Resource};

use crate::common::{configure_criterion, Connection};

pub fn bench_register_and_release(c: &mut Criterion) {
    let mut group = c.benchmark_group("resources/register_release");

    for count in [1usize, 4, 32] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            b.iter(|| {
                let resources: Vec<_> =
                    (0..count).map(|_| Resource::new(Connection::default())).collect();
                let flow = val(resources);
                black_box(flow.release());
            })
        });
    }

    group.finish();
}

pub fn bench_bind_transfer(c: &mut Criterion) {
    let mut group = c.benchmark_group("resources/bind");

    for ownership in [Ownership::Retain, Ownership::Transfer] {
        group.bench_function(format!("{ownership:?}"), |b| {
            b.iter(|| {
                let outer = val(Resource::new(Connection::default()));
                let inner = FlowContext::new();
                let flow = outer
                    .bind_with(ownership, |_, _| {
                        Ok(Flow::val(Resource::new(Connection::default()), &inner))
                    })
                    .map(|flow| flow.release());
                let _ = black_box(flow);
            })
        });
    }

    group.finish();
}

criterion_group! {
    name = resource_benches;
    config = configure_criterion();
    targets =
        bench_register_and_release,
        bench_bind_transfer,
}
