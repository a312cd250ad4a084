// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

mod with_latest_from_bench;

use combine_latest_bench::bench_combine_latest;
use criterion::{criterion_group, criterion_main};
use with_latest_from_bench::bench_with_latest_from;

criterion_group!(stream_benches, bench_combine_latest, bench_with_latest_from);
criterion_main!(stream_benches);
