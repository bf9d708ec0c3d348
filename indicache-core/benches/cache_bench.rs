//! Criterion benchmarks for the cache hot paths.
//!
//! Benchmarks:
//! 1. Drawer entry resolution, cold cache vs warm cache
//! 2. Keyed buffer inserts and lookups at several sizes

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use indicache_core::buffer::{candle_overflow_listener, KeyedBuffer, DEFAULT_MAX_CONFLICTS};
use indicache_core::config::BufferConfig;
use indicache_core::domain::{AppliedPrice, Bar, BarSeries};
use indicache_core::indicators::Drawer;
use indicache_core::DrawerParams;

// ── Helpers ──────────────────────────────────────────────────────────

fn make_series(n: usize) -> BarSeries {
    let base = chrono::NaiveDate::from_ymd_opt(2020, 1, 2)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
        .and_utc()
        .timestamp();
    let bars = (0..n)
        .map(|i| {
            let close = 100.0 + (i as f64 * 0.1).sin() * 10.0;
            Bar {
                timestamp: base + i as i64 * 61,
                open: close - 0.3,
                high: close + 1.5,
                low: close - 1.5,
                close,
                volume: 1_000_000 + (i as u64 % 500_000),
            }
        })
        .collect();
    BarSeries::new(bars)
}

fn buffer_config(n: usize) -> BufferConfig {
    BufferConfig {
        initial_capacity: n * 2,
        ..BufferConfig::default()
    }
}

// ── 1. Entry resolution ──────────────────────────────────────────────

fn bench_entry_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("drawer_entries");

    for &n in &[1_000usize, 10_000] {
        let series = make_series(n);
        let stamps: Vec<i64> = series.bars().iter().map(|b| b.timestamp).collect();
        let params = DrawerParams::new(14, AppliedPrice::Close);

        group.bench_with_input(BenchmarkId::new("cold", n), &n, |b, &n| {
            b.iter(|| {
                let mut candle = Drawer::candle(params.clone(), series.clone(), &buffer_config(n));
                for &ts in &stamps {
                    black_box(candle.get_entry(ts));
                }
            })
        });

        let mut warm = Drawer::candle(params.clone(), series.clone(), &buffer_config(n));
        for &ts in &stamps {
            warm.get_entry(ts);
        }
        group.bench_with_input(BenchmarkId::new("warm", n), &n, |b, _| {
            b.iter(|| {
                for &ts in &stamps {
                    black_box(warm.get_entry(ts));
                }
            })
        });
    }

    group.finish();
}

// ── 2. Keyed buffer ──────────────────────────────────────────────────

fn bench_keyed_buffer(c: &mut Criterion) {
    let mut group = c.benchmark_group("keyed_buffer");

    for &n in &[1_000usize, 50_000] {
        group.bench_with_input(BenchmarkId::new("insert", n), &n, |b, &n| {
            b.iter(|| {
                let mut buf = KeyedBuffer::with_capacity(64);
                buf.set_overflow_listener(candle_overflow_listener, DEFAULT_MAX_CONFLICTS);
                for i in 0..n as i64 {
                    buf.insert(i * 61, i);
                }
                black_box(buf.len())
            })
        });

        let mut filled = KeyedBuffer::with_capacity(n * 2);
        for i in 0..n as i64 {
            filled.insert(i * 61, i);
        }
        group.bench_with_input(BenchmarkId::new("get", n), &n, |b, &n| {
            b.iter(|| {
                let mut hits = 0;
                for i in 0..n as i64 {
                    if filled.get(black_box(i * 61)).is_some() {
                        hits += 1;
                    }
                }
                black_box(hits)
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_entry_resolution, bench_keyed_buffer);
criterion_main!(benches);
