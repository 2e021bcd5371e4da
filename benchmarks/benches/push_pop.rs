// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::num::NonZeroUsize;
use std::time::Duration;

use criterion::measurement::WallTime;
use criterion::{
    BatchSize, BenchmarkGroup, BenchmarkId, Criterion, Throughput, black_box, criterion_group,
    criterion_main,
};

use growbuf::{GrowableBuffer, GrowableVec};

/// Sampling settings for one benchmark group.
///
/// `FAST_BENCH=1 cargo bench -p benchmarks --bench push_pop` trades accuracy
/// for a quick smoke run.
struct BenchProfile {
    measurement: Duration,
    samples: usize,
}

impl BenchProfile {
    fn from_env() -> Self {
        match std::env::var("FAST_BENCH").as_deref() {
            Ok("1") => Self {
                measurement: Duration::from_millis(500),
                samples: 10,
            },
            _ => Self {
                measurement: Duration::from_secs(3),
                samples: 50,
            },
        }
    }

    fn group<'a>(&self, c: &'a mut Criterion, name: &str) -> BenchmarkGroup<'a, WallTime> {
        let mut group = c.benchmark_group(name);
        group.measurement_time(self.measurement);
        group.sample_size(self.samples);
        group
    }
}

fn slots(n: usize) -> NonZeroUsize {
    NonZeroUsize::new(n).expect("slot count must be non-zero")
}

fn u32_size() -> NonZeroUsize {
    slots(core::mem::size_of::<u32>())
}

// =============================================================================
// Vec vs GrowableBuffer vs GrowableVec
// =============================================================================

fn bench_push_growing(c: &mut Criterion) {
    let mut group = BenchProfile::from_env().group(c, "push_growing");

    for size in [100, 1_000, 10_000, 100_000] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |b, &s| {
            b.iter(|| {
                let mut vec = Vec::with_capacity(1);
                for i in 0..s {
                    vec.push(i as u32);
                }
                black_box(vec)
            });
        });

        group.bench_with_input(BenchmarkId::new("GrowableBuffer", size), &size, |b, &s| {
            b.iter(|| {
                let mut buffer =
                    GrowableBuffer::create(slots(1), u32_size()).expect("create failed");
                for i in 0..s {
                    buffer
                        .push(&(i as u32).to_ne_bytes())
                        .expect("push failed");
                }
                black_box(buffer)
            });
        });

        group.bench_with_input(BenchmarkId::new("GrowableVec", size), &size, |b, &s| {
            b.iter(|| {
                let mut vec = GrowableVec::<u32>::with_capacity(slots(1)).expect("create failed");
                for i in 0..s {
                    vec.push(i as u32).expect("push failed");
                }
                black_box(vec)
            });
        });
    }

    group.finish();
}

fn bench_push_preallocated(c: &mut Criterion) {
    let mut group = BenchProfile::from_env().group(c, "push_preallocated");

    for size in [100, 1_000, 10_000, 100_000] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |b, &s| {
            b.iter(|| {
                let mut vec = Vec::with_capacity(s);
                for i in 0..s {
                    vec.push(i as u32);
                }
                black_box(vec)
            });
        });

        group.bench_with_input(BenchmarkId::new("GrowableVec", size), &size, |b, &s| {
            b.iter(|| {
                let mut vec = GrowableVec::<u32>::with_capacity(slots(s)).expect("create failed");
                for i in 0..s {
                    vec.push(i as u32).expect("push failed");
                }
                black_box(vec)
            });
        });
    }

    group.finish();
}

fn bench_pop_all(c: &mut Criterion) {
    let mut group = BenchProfile::from_env().group(c, "pop_all");

    for size in [100, 1_000, 10_000, 100_000] {
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("Vec", size), &size, |b, &s| {
            b.iter_batched(
                || (0..s as u32).collect::<Vec<u32>>(),
                |mut vec| {
                    while let Some(value) = vec.pop() {
                        black_box(value);
                    }
                    black_box(vec)
                },
                BatchSize::LargeInput,
            );
        });

        group.bench_with_input(BenchmarkId::new("GrowableBuffer::pop", size), &size, |b, &s| {
            b.iter_batched(
                || {
                    let mut buffer =
                        GrowableBuffer::create(slots(s), u32_size()).expect("create failed");
                    for i in 0..s {
                        buffer
                            .push(&(i as u32).to_ne_bytes())
                            .expect("push failed");
                    }
                    buffer
                },
                |mut buffer| {
                    while let Ok(bytes) = buffer.pop() {
                        black_box(bytes);
                    }
                    black_box(buffer)
                },
                BatchSize::LargeInput,
            );
        });

        group.bench_with_input(
            BenchmarkId::new("GrowableBuffer::pop_with", size),
            &size,
            |b, &s| {
                b.iter_batched(
                    || {
                        let mut buffer =
                            GrowableBuffer::create(slots(1), u32_size()).expect("create failed");
                        for i in 0..s {
                            buffer
                                .push(&(i as u32).to_ne_bytes())
                                .expect("push failed");
                        }
                        buffer
                    },
                    |mut buffer| {
                        let mut sum = 0u64;
                        while let Ok(byte) = buffer.pop_with(|bytes| bytes[0]) {
                            sum += byte as u64;
                        }
                        black_box(sum);
                        black_box(buffer)
                    },
                    BatchSize::LargeInput,
                );
            },
        );

        group.bench_with_input(BenchmarkId::new("GrowableVec::pop", size), &size, |b, &s| {
            b.iter_batched(
                || {
                    let mut vec =
                        GrowableVec::<u32>::with_capacity(slots(s)).expect("create failed");
                    for i in 0..s {
                        vec.push(i as u32).expect("push failed");
                    }
                    vec
                },
                |mut vec| {
                    while let Ok(value) = vec.pop() {
                        black_box(value);
                    }
                    black_box(vec)
                },
                BatchSize::LargeInput,
            );
        });
    }

    group.finish();
}

criterion_group!(
    push_pop_benches,
    bench_push_growing,
    bench_push_preallocated,
    bench_pop_all
);

criterion_main!(push_pop_benches);
