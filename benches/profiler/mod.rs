// SPDX-FileCopyrightText: 2026 Meridian contributors
// SPDX-License-Identifier: MIT

use std::str::FromStr;
use std::time::Duration;

use criterion::Criterion;

use pprof::criterion::{Output, PProfProfiler};

fn env_or<T: FromStr>(name: &str, default: T) -> T {
    std::env::var(name)
        .ok()
        .and_then(|raw| raw.trim().parse().ok())
        .unwrap_or(default)
}

/// Criterion config with flamegraph profiling, tunable through
/// `MERIDIAN_BENCH_*` environment variables.
pub fn criterion() -> Criterion {
    let frequency: i32 = env_or("MERIDIAN_BENCH_PROFILE_FREQ", 100).clamp(1, 1000);
    let sample_size: usize = env_or("MERIDIAN_BENCH_SAMPLE_SIZE", 60).clamp(10, 200);
    let warmup_secs: u64 = env_or("MERIDIAN_BENCH_WARMUP_SECS", 3).clamp(1, 60);
    let measurement_secs: u64 = env_or("MERIDIAN_BENCH_MEASUREMENT_SECS", 5).clamp(1, 120);

    Criterion::default()
        .sample_size(sample_size)
        .warm_up_time(Duration::from_secs(warmup_secs))
        .measurement_time(Duration::from_secs(measurement_secs))
        .with_profiler(PProfProfiler::new(frequency, Output::Flamegraph(None)))
}
