use crate::common::{configure_criterion, person_with_phone_numbers, valid_payload};
use criterion::{criterion_group, BatchSize, Criterion};
use form_rail::container::FormContainer;
use form_rail::types::SharedData;
use std::hint::black_box;
use std::sync::Arc;

pub fn bench_bind(c: &mut Criterion) {
    let schema = person_with_phone_numbers();
    let data: SharedData = Arc::new(valid_payload());
    let mut group = c.benchmark_group("container/bind");

    group.bench_function("unbound", |b| b.iter(|| black_box(FormContainer::unbound(schema))));

    group.bench_function("shared_payload", |b| {
        b.iter(|| {
            let container =
                FormContainer::builder(schema).shared_data(Arc::clone(&data)).build();
            black_box(container)
        })
    });

    group.finish();
}

pub fn bench_full_clean(c: &mut Criterion) {
    let schema = person_with_phone_numbers();
    let mut group = c.benchmark_group("container/full_clean");

    group.bench_function("valid", |b| {
        b.iter_batched(
            || FormContainer::new(schema, valid_payload()),
            |mut container| black_box(container.is_valid()),
            BatchSize::SmallInput,
        )
    });

    group.bench_function("cached", |b| {
        let mut container = FormContainer::new(schema, valid_payload());
        let _ = container.is_valid();
        b.iter(|| black_box(container.is_valid()))
    });

    group.bench_function("add_error", |b| {
        b.iter_batched(
            || FormContainer::new(schema, valid_payload()),
            |mut container| {
                let _ = container.add_error(Some("person"), Some("last_name"), "Taken.");
                black_box(container)
            },
            BatchSize::SmallInput,
        )
    });

    group.finish();
}

criterion_group! {
    name = container_benches;
    config = configure_criterion();
    targets =
        bench_bind,
        bench_full_clean,
}
