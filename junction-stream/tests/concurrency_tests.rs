// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use junction_stream::prelude::*;
use junction_test_utils::{collect_values, test_channel};
use std::thread;

const PER_PRODUCER: u64 = 2_000;

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_scan_combine_latest_accumulator_is_monotonic_across_threads() -> anyhow::Result<()> {
    // Arrange
    let (t1, s1) = test_channel::<u64>();
    let (t2, s2) = test_channel::<u64>();
    let (t3, s3) = test_channel::<u64>();
    let counts = scan_combine_latest3_with_defaults(
        0_u64,
        s1,
        s2,
        s3,
        (Some(0), Some(0), Some(0)),
        |_, _, _, count| count + 1,
    );

    // Act
    let producers: Vec<_> = [t1, t2, t3]
        .into_iter()
        .map(|tx| {
            thread::spawn(move || {
                for value in 0..PER_PRODUCER {
                    tx.send(value).expect("operator alive");
                }
            })
        })
        .collect();
    for producer in producers {
        producer.join().expect("producer panicked");
    }

    // Assert
    let emitted = collect_values(counts).await;
    let expected: Vec<u64> = (1..=3 * PER_PRODUCER).collect();
    assert_eq!(emitted, expected);
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_combine_latest_sees_consistent_snapshots_across_threads() -> anyhow::Result<()> {
    // Arrange
    let (t1, s1) = test_channel::<u64>();
    let (t2, s2) = test_channel::<u64>();
    let combined = combine_latest2_with_defaults(s1, s2, (Some(0), Some(0)), |a, b| (*a, *b));

    // Act
    let left = thread::spawn(move || {
        for value in 1..=PER_PRODUCER {
            t1.send(value).expect("operator alive");
        }
    });
    let right = thread::spawn(move || {
        for value in 1..=PER_PRODUCER {
            t2.send(value).expect("operator alive");
        }
    });
    left.join().expect("producer panicked");
    right.join().expect("producer panicked");

    // Assert
    let snapshots = collect_values(combined).await;
    assert_eq!(snapshots.len() as u64, 2 * PER_PRODUCER);
    for pair in snapshots.windows(2) {
        let ((a0, b0), (a1, b1)) = (pair[0], pair[1]);
        assert!(a1 >= a0 && b1 >= b0, "slots went backwards: {pair:?}");
        assert_eq!((a1 - a0) + (b1 - b0), 1, "each emission reflects exactly one arrival");
    }
    assert_eq!(snapshots.last(), Some(&(PER_PRODUCER, PER_PRODUCER)));
    Ok(())
}
