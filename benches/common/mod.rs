#![allow(dead_code)]

use criterion::{BenchmarkId, Criterion};
use izi_swap_query::math::amount_math::{get_amount_x, get_amount_y};
use izi_swap_query::math::log_pow_math::{get_log_sqrt_price_floor, get_sqrt_price};
use izi_swap_query::math::math_helpers::{mul_div_ceil, mul_div_floor};
use izi_swap_query::math::swap_math_x2y::x2y_range;
use izi_swap_query::math::swap_math_y2x::y2x_range;
use izi_swap_query::{IziSwapPool, Orders, Q96, State, U256};
use std::hint::black_box;

const POINTS: [i32; 5] = [-600_000, -23_028, 0, 23_028, 600_000];

fn rate() -> U256 {
    get_sqrt_price(1).unwrap()
}

pub fn bench_log_pow_math(c: &mut Criterion) {
    let mut group = c.benchmark_group("log_pow_math");
    for point in POINTS {
        group.bench_with_input(BenchmarkId::new("get_sqrt_price", point), &point, |b, &p| {
            b.iter(|| get_sqrt_price(black_box(p)).unwrap())
        });
        let sqrt_price = get_sqrt_price(point).unwrap();
        group.bench_with_input(
            BenchmarkId::new("get_log_sqrt_price_floor", point),
            &sqrt_price,
            |b, &s| b.iter(|| get_log_sqrt_price_floor(black_box(s)).unwrap()),
        );
    }
    group.finish();
}

pub fn bench_mul_div(c: &mut Criterion) {
    let a = U256::from(u128::MAX);
    let b = get_sqrt_price(23_028).unwrap();
    c.bench_function("mul_div_floor", |bench| {
        bench.iter(|| mul_div_floor(black_box(a), black_box(b), black_box(Q96)).unwrap())
    });
    c.bench_function("mul_div_ceil", |bench| {
        bench.iter(|| mul_div_ceil(black_box(a), black_box(b), black_box(Q96)).unwrap())
    });
}

pub fn bench_amount_math(c: &mut Criterion) {
    let liquidity = 1_000_000_000_000_000u128;
    let (left, right) = (-10_240, 10_240);
    let sqrt_l = get_sqrt_price(left).unwrap();
    let sqrt_r = get_sqrt_price(right).unwrap();
    let rate = rate();

    c.bench_function("get_amount_y", |b| {
        b.iter(|| get_amount_y(black_box(liquidity), sqrt_l, sqrt_r, rate, true).unwrap())
    });
    c.bench_function("get_amount_x", |b| {
        b.iter(|| get_amount_x(black_box(liquidity), left, right, sqrt_r, rate, true).unwrap())
    });
}

pub fn bench_segment_math(c: &mut Criterion) {
    let rate = rate();
    let state = State::at_point(5_000, 1_000_000_000_000, 400_000_000_000).unwrap();
    let mut group = c.benchmark_group("segment_math");
    for amount in [1_000u128, 1_000_000_000_000, u128::MAX / 4] {
        group.bench_with_input(BenchmarkId::new("x2y_range", amount), &amount, |b, &a| {
            b.iter(|| x2y_range(black_box(&state), 0, rate, a).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("y2x_range", amount), &amount, |b, &a| {
            b.iter(|| y2x_range(black_box(&state), 10_000, rate, a).unwrap())
        });
    }
    group.finish();
}

/// Several liquidity levels and a ladder of limit orders on both sides.
fn laddered_pool() -> IziSwapPool {
    let liquidity_points: Vec<i32> = (-20..=20).map(|i| i * 4_000).collect();
    let liquidity: Vec<u128> = (0..liquidity_points.len())
        .map(|i| {
            if i + 1 == liquidity_points.len() {
                0
            } else {
                1_000_000_000_000 + (i as u128 % 5) * 250_000_000_000
            }
        })
        .collect();
    let selling_y_point: Vec<i32> = (1..=100).map(|i| -i * 400).rev().collect();
    let selling_x_point: Vec<i32> = (1..=100).map(|i| i * 400).collect();
    let orders = Orders::new(
        liquidity,
        liquidity_points,
        vec![5_000_000_000; selling_x_point.len()],
        selling_x_point,
        vec![5_000_000_000; selling_y_point.len()],
        selling_y_point,
    )
    .unwrap();
    let state = State::at_point(0, 1_000_000_000_000, 0).unwrap();
    IziSwapPool::new(state, orders, rate(), 40, 2000).unwrap()
}

pub fn bench_swaps(c: &mut Criterion) {
    let pool = laddered_pool();
    let mut group = c.benchmark_group("swap");
    for amount in [1_000_000u128, 1_000_000_000_000, 1_000_000_000_000_000] {
        group.bench_with_input(BenchmarkId::new("x2y", amount), &amount, |b, &a| {
            b.iter(|| pool.swap_x2y(black_box(a), -79_000).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("y2x", amount), &amount, |b, &a| {
            b.iter(|| pool.swap_y2x(black_box(a), 79_000).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("x2y_desire_y", amount), &amount, |b, &a| {
            b.iter(|| pool.swap_x2y_desire_y(black_box(a), -79_000).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("y2x_desire_x", amount), &amount, |b, &a| {
            b.iter(|| pool.swap_y2x_desire_x(black_box(a), 79_000).unwrap())
        });
    }
    group.finish();
}
