#![allow(dead_code)]

use criterion::{BenchmarkId, Criterion};
use fixed_pow_math::math::bit_math::most_significant_bit;
use fixed_pow_math::math::{exp, ln, mul_div, pow};
use fixed_pow_math::{mul_pow, scaled_pow, I256, U256, WAD};
use std::hint::black_box;

const MEMORY_PARAM: u64 = 999_993_123_563_518_195;

pub fn bench_math_helpers(c: &mut Criterion) {
    let one_36 = WAD * WAD;
    let half = one_36 / U256::from(2u8);

    c.bench_function("mul_div_single_word", |b| {
        b.iter(|| mul_div(black_box(WAD), black_box(WAD), black_box(WAD)))
    });
    c.bench_function("mul_div_wide", |b| {
        b.iter(|| mul_div(black_box(half), black_box(half), black_box(one_36)))
    });
}

pub fn bench_bit_math(c: &mut Criterion) {
    c.bench_function("most_significant_bit", |b| {
        b.iter(|| most_significant_bit(black_box(U256::from(50_000u32))))
    });
}

pub fn bench_log_exp(c: &mut Criterion) {
    let near_one = U256::from(950_000_000_000_000_000u64);
    let large = WAD * U256::from(50_000u32);
    let exponent = I256::try_from(10_820_000_000_000_000_000i128).unwrap();

    c.bench_function("ln_near_one", |b| b.iter(|| ln(black_box(near_one))));
    c.bench_function("ln_large", |b| b.iter(|| ln(black_box(large))));
    c.bench_function("exp", |b| b.iter(|| exp(black_box(exponent))));
    c.bench_function("pow_fractional", |b| {
        b.iter(|| pow(black_box(large), black_box(WAD / U256::from(2u8))))
    });
}

pub fn bench_scaled_pow(c: &mut Criterion) {
    let mut group = c.benchmark_group("scaled_pow");
    let base = U256::from(MEMORY_PARAM);
    for exponent in [1u32, 100, 5_000, 50_000] {
        group.bench_with_input(BenchmarkId::from_parameter(exponent), &exponent, |b, &e| {
            b.iter(|| scaled_pow(black_box(base), black_box(U256::from(e))))
        });
    }
    group.finish();
}

pub fn bench_mul_pow(c: &mut Criterion) {
    let mut group = c.benchmark_group("mul_pow");
    for decimals in [2u8, 6, 18] {
        let unit = U256::from(10u8).pow(U256::from(decimals));
        let value = U256::from(180u8) * unit;
        let base = U256::from(85u8) * unit / U256::from(10u8);
        let exponent = U256::from(6u8) * unit / U256::from(10u8);
        group.bench_with_input(BenchmarkId::from_parameter(decimals), &decimals, |b, &d| {
            b.iter(|| mul_pow(black_box(value), black_box(base), black_box(exponent), d))
        });
    }
    group.finish();
}
