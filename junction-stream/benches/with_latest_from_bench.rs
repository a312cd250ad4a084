// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use criterion::{BenchmarkId, Criterion, Throughput};
use futures::stream::{self, StreamExt};
use junction_core::StreamItem;
use junction_stream::WithLatestFromExt;
use std::hint::black_box;
use tokio::runtime::Runtime;

pub fn bench_with_latest_from(c: &mut Criterion) {
    let mut group = c.benchmark_group("with_latest_from");
    let sizes = [100usize, 1000usize, 10000];
    let rt = Runtime::new().expect("tokio runtime");

    for &size in &sizes {
        let id = BenchmarkId::from_parameter(format!("m{size}"));
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(id, &size, |bencher, &size| {
            bencher.iter(|| {
                rt.block_on(async move {
                    let driving = stream::iter(0..size).map(StreamItem::Value);
                    let context = stream::iter([1usize]).map(StreamItem::Value);
                    let mut joined = driving.with_latest_from(context, |d, c| d * c);
                    while let Some(v) = joined.next().await {
                        black_box(v);
                    }
                });
            });
        });
    }

    group.finish();
}
