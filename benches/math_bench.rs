use criterion::{criterion_group, criterion_main};

mod common;

criterion_group!(
    math_benches,
    common::bench_log_pow_math,
    common::bench_mul_div,
    common::bench_amount_math,
    common::bench_segment_math,
);
criterion_main!(math_benches);
