use criterion::criterion_main;

mod container;
mod validation;

criterion_main!(
    validation::validation_benches,
    container::container_benches,
    scaling::scaling_benches,
    rendering::rendering_benches,
);
