//! Benchmarks for indicator implementations.

use chrono::{Days, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use swing_core::traits::Indicator;
use swing_core::types::{PriceBar, PriceSeries};
use swing_indicators::{IndicatorPipeline, Rsi, Sma};

fn generate_test_data(size: usize) -> Vec<f64> {
    (0..size)
        .map(|i| 100.0 + (i as f64 * 0.1).sin() * 10.0)
        .collect()
}

fn generate_series(size: usize) -> PriceSeries {
    let start = NaiveDate::from_ymd_opt(2000, 1, 1).expect("valid date");
    let bars = generate_test_data(size)
        .into_iter()
        .enumerate()
        .map(|(i, close)| {
            PriceBar::new(
                start + Days::new(i as u64),
                close,
                close * 1.01,
                close * 0.99,
                close,
                1_000 + (i % 17) as u64 * 100,
            )
        })
        .collect();
    PriceSeries::new("BENCH", bars).expect("generated bars are ordered")
}

fn benchmark_sma(c: &mut Criterion) {
    let mut group = c.benchmark_group("SMA");

    for size in [1000, 10000, 100000].iter() {
        let data = generate_test_data(*size);

        group.bench_with_input(BenchmarkId::new("dma_50", size), &data, |b, data| {
            let sma = Sma::new(50);
            b.iter(|| sma.calculate(black_box(data)))
        });
    }

    group.finish();
}

fn benchmark_rsi(c: &mut Criterion) {
    let mut group = c.benchmark_group("RSI");

    for size in [1000, 10000, 100000].iter() {
        let data = generate_test_data(*size);

        group.bench_with_input(BenchmarkId::new("simple_means", size), &data, |b, data| {
            let rsi = Rsi::new(14);
            b.iter(|| rsi.calculate(black_box(data)))
        });
    }

    group.finish();
}

fn benchmark_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("Pipeline");

    for size in [250, 2500, 25000].iter() {
        let series = generate_series(*size);
        let pipeline = IndicatorPipeline::new();

        group.bench_with_input(BenchmarkId::new("compute", size), &series, |b, series| {
            b.iter(|| pipeline.compute(black_box(series)))
        });

        group.bench_with_input(BenchmarkId::new("latest", size), &series, |b, series| {
            b.iter(|| pipeline.compute(black_box(series)).and_then(|f| f.latest()))
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_sma, benchmark_rsi, benchmark_pipeline);
criterion_main!(benches);
