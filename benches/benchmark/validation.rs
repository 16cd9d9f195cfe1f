use crate::common::configure_criterion;
use criterion::{criterion_group, Criterion};
use form_rail::forms::CharField;
use form_rail::validation::Validation;
use std::hint::black_box;

pub fn bench_field_clean(c: &mut Criterion) {
    let field = CharField::new("phone_number").min_length(2).max_length(15);
    let mut group = c.benchmark_group("validation/field");

    group.bench_function("clean_valid", |b| {
        b.iter(|| black_box(field.clean(black_box(Some("  555-0100  ")))))
    });

    group.bench_function("clean_missing", |b| b.iter(|| black_box(field.clean(black_box(None)))));

    group.bench_function("clean_accumulating", |b| {
        let strict = CharField::new("code").min_length(8).max_length(2);
        b.iter(|| black_box(strict.clean(black_box(Some("abcde")))))
    });

    group.finish();
}

pub fn bench_collect(c: &mut Criterion) {
    let field = CharField::new("phone_number").min_length(2);
    let inputs: Vec<String> =
        (0..100).map(|i| if i % 5 == 0 { "1".to_owned() } else { format!("555-{i}") }).collect();

    c.bench_function("validation/collect_mixed", |b| {
        b.iter(|| {
            let result: Validation<String, Vec<_>> =
                inputs.iter().map(|input| field.clean(Some(input.as_str()))).collect();
            black_box(result)
        })
    });
}

criterion_group! {
    name = validation_benches;
    config = configure_criterion();
    targets =
        bench_field_clean,
        bench_collect,
}
