// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use junction_core::{JunctionError, StreamItem};
use junction_stream::prelude::*;
use junction_test_utils::helpers::{assert_stream_ended, collect_values};
use junction_test_utils::{
    assert_no_element_emitted, settle, test_channel, test_channel_with_errors, unwrap_stream,
};
use futures::StreamExt;

#[tokio::test]
async fn test_combine_latest_interleaved_scenario() -> anyhow::Result<()> {
    // Arrange
    let (a_tx, a) = test_channel::<i32>();
    let (b_tx, b) = test_channel::<&str>();
    let mut combined = combine_latest2(a, b, |a, b| format!("{a}{b}"));

    // Act & Assert
    a_tx.send(1)?;
    assert_no_element_emitted(&mut combined, 50).await;

    b_tx.send("x")?;
    assert_eq!(unwrap_stream(&mut combined, 500).await?, "1x");

    a_tx.send(2)?;
    assert_eq!(unwrap_stream(&mut combined, 500).await?, "2x");

    a_tx.send(3)?;
    assert_eq!(unwrap_stream(&mut combined, 500).await?, "3x");

    b_tx.send("y")?;
    assert_eq!(unwrap_stream(&mut combined, 500).await?, "3y");

    assert_no_element_emitted(&mut combined, 50).await;
    Ok(())
}

#[tokio::test]
async fn test_combine_latest_applies_every_arrival_when_producers_yield() -> anyhow::Result<()> {
    // Arrange
    let (a_tx, a) = test_channel::<i32>();
    let (b_tx, b) = test_channel::<&str>();
    let combined = combine_latest2(a, b, |a, b| format!("{a}{b}"));

    // Act
    a_tx.send(1)?;
    settle().await;
    b_tx.send("x")?;
    settle().await;
    a_tx.send(2)?;
    a_tx.send(3)?;
    settle().await;
    b_tx.send("y")?;
    drop(a_tx);
    drop(b_tx);

    // Assert
    let values = collect_values(combined).await;
    assert_eq!(values, vec!["1x", "2x", "3x", "3y"]);
    Ok(())
}

#[tokio::test]
async fn test_combine_latest_first_input_wins_when_both_are_waiting() -> anyhow::Result<()> {
    // Arrange
    let (a_tx, a) = test_channel::<i32>();
    let (b_tx, b) = test_channel::<&str>();
    let combined = combine_latest2_with_defaults(a, b, (Some(0), Some("-")), |a, b| {
        format!("{a}{b}")
    });

    // Act
    b_tx.send("x")?;
    a_tx.send(1)?;
    drop(a_tx);
    drop(b_tx);

    // Assert
    let values = collect_values(combined).await;
    assert_eq!(values, vec!["1-", "1x"]);
    Ok(())
}

#[tokio::test]
async fn test_combine_latest3_waits_for_every_input() -> anyhow::Result<()> {
    // Arrange
    let (a_tx, a) = test_channel::<u8>();
    let (b_tx, b) = test_channel::<u8>();
    let (c_tx, c) = test_channel::<u8>();
    let mut combined = combine_latest3(a, b, c, |a, b, c| (*a, *b, *c));

    // Act
    a_tx.send(1)?;
    b_tx.send(2)?;
    b_tx.send(3)?;

    // Assert
    assert_no_element_emitted(&mut combined, 50).await;

    c_tx.send(4)?;
    assert_eq!(unwrap_stream(&mut combined, 500).await?, (1, 3, 4));
    Ok(())
}

#[tokio::test]
async fn test_combine_latest5_positional_order() -> anyhow::Result<()> {
    // Arrange
    let (t1, s1) = test_channel::<i32>();
    let (t2, s2) = test_channel::<&str>();
    let (t3, s3) = test_channel::<char>();
    let (t4, s4) = test_channel::<bool>();
    let (t5, s5) = test_channel::<u64>();
    let mut combined = combine_latest5(s1, s2, s3, s4, s5, |a, b, c, d, e| {
        format!("{a}-{b}-{c}-{d}-{e}")
    });

    // Act
    t5.send(5)?;
    t4.send(true)?;
    t3.send('c')?;
    t2.send("b")?;
    assert_no_element_emitted(&mut combined, 50).await;
    t1.send(1)?;

    // Assert
    assert_eq!(unwrap_stream(&mut combined, 500).await?, "1-b-c-true-5");
    Ok(())
}

#[tokio::test]
async fn test_combine_latest4_emits_once_per_arrival() -> anyhow::Result<()> {
    // Arrange
    let (t1, s1) = test_channel::<i32>();
    let (t2, s2) = test_channel::<i32>();
    let (t3, s3) = test_channel::<i32>();
    let (t4, s4) = test_channel::<i32>();
    let mut combined = combine_latest4(s1, s2, s3, s4, |a, b, c, d| a + b + c + d);

    // Act
    t1.send(1)?;
    t2.send(10)?;
    t3.send(100)?;
    t4.send(1000)?;
    assert_eq!(unwrap_stream(&mut combined, 500).await?, 1111);

    t3.send(200)?;

    // Assert
    assert_eq!(unwrap_stream(&mut combined, 500).await?, 1211);
    assert_no_element_emitted(&mut combined, 50).await;
    Ok(())
}

#[tokio::test]
async fn test_combine_latest_defaults_define_slots_up_front() -> anyhow::Result<()> {
    // Arrange
    let (a_tx, a) = test_channel::<i32>();
    let (_b_tx, b) = test_channel::<&str>();
    let mut combined =
        combine_latest2_with_defaults(a, b, (None, Some("d")), |a, b| format!("{a}{b}"));

    // Act
    a_tx.send(7)?;

    // Assert
    assert_eq!(unwrap_stream(&mut combined, 500).await?, "7d");
    Ok(())
}

#[tokio::test]
async fn test_combine_latest_completes_when_undefined_input_completes() -> anyhow::Result<()> {
    // Arrange
    let (a_tx, a) = test_channel::<i32>();
    let (b_tx, b) = test_channel::<i32>();
    let mut combined = combine_latest2(a, b, |a, b| a + b);

    // Act
    a_tx.send(1)?;
    drop(b_tx);

    // Assert
    assert_stream_ended(&mut combined, 500).await;
    drop(a_tx);
    Ok(())
}

#[tokio::test]
async fn test_combine_latest_keeps_running_until_every_input_completes() -> anyhow::Result<()> {
    // Arrange
    let (a_tx, a) = test_channel::<i32>();
    let (b_tx, b) = test_channel::<i32>();
    let mut combined = combine_latest2(a, b, |a, b| a * b);
    a_tx.send(2)?;
    b_tx.send(3)?;
    assert_eq!(unwrap_stream(&mut combined, 500).await?, 6);

    // Act
    drop(a_tx);
    b_tx.send(5)?;

    // Assert
    assert_eq!(unwrap_stream(&mut combined, 500).await?, 10);
    drop(b_tx);
    assert_stream_ended(&mut combined, 500).await;
    Ok(())
}

#[tokio::test]
async fn test_combine_latest_forwards_upstream_error_and_stops() -> anyhow::Result<()> {
    // Arrange
    let (a_tx, a) = test_channel_with_errors::<i32>();
    let (b_tx, b) = test_channel::<i32>();
    let mut combined = combine_latest2(a, b, |a, b| a + b);

    // Act
    a_tx.send(StreamItem::Value(1))?;
    b_tx.send(1)?;
    assert_eq!(unwrap_stream(&mut combined, 500).await?, 2);
    a_tx.send(StreamItem::Error(JunctionError::stream_error("sensor offline")))?;

    // Assert
    let err = unwrap_stream(&mut combined, 500).await.unwrap_err();
    assert_eq!(err.to_string(), "Stream processing error: sensor offline");
    let _ = b_tx.send(2);
    assert_stream_ended(&mut combined, 500).await;
    Ok(())
}

#[tokio::test]
async fn test_combine_latest_panicking_combinator_terminates() -> anyhow::Result<()> {
    // Arrange
    let (a_tx, a) = test_channel::<i32>();
    let (b_tx, b) = test_channel::<i32>();
    let mut combined = combine_latest2(a, b, |a, b| {
        if *b == 0 {
            panic!("division by zero");
        }
        a / b
    });

    // Act
    a_tx.send(10)?;
    b_tx.send(2)?;
    assert_eq!(unwrap_stream(&mut combined, 500).await?, 5);
    b_tx.send(0)?;

    // Assert
    match combined.next().await {
        Some(StreamItem::Error(JunctionError::CallbackPanicked { operator, message })) => {
            assert_eq!(operator, "combine_latest");
            assert_eq!(message, "division by zero");
        }
        other => panic!("expected callback panic, got {other:?}"),
    }
    let _ = b_tx.send(5);
    assert_stream_ended(&mut combined, 500).await;
    Ok(())
}

#[tokio::test]
async fn test_combine_latest_dispose_stops_emission() -> anyhow::Result<()> {
    // Arrange
    let (a_tx, a) = test_channel::<i32>();
    let (b_tx, b) = test_channel::<i32>();
    let mut combined = combine_latest2(a, b, |a, b| a + b);
    a_tx.send(1)?;
    b_tx.send(1)?;
    assert_eq!(unwrap_stream(&mut combined, 500).await?, 2);

    // Act
    combined.dispose();
    let _ = a_tx.send(2);

    // Assert
    assert!(combined.is_disposed());
    assert_eq!(combined.next().await, None);
    Ok(())
}

#[tokio::test]
async fn test_scan_combine_latest_only_accumulates_when_complete() -> anyhow::Result<()> {
    // Arrange
    let (a_tx, a) = test_channel::<i32>();
    let (b_tx, b) = test_channel::<i32>();
    let mut sums = scan_combine_latest2(0, a, b, |a, b, acc| acc + a + b);

    // Act & Assert
    a_tx.send(1)?;
    a_tx.send(2)?;
    assert_no_element_emitted(&mut sums, 50).await;

    b_tx.send(10)?;
    assert_eq!(unwrap_stream(&mut sums, 500).await?, 12);

    a_tx.send(3)?;
    assert_eq!(unwrap_stream(&mut sums, 500).await?, 25);
    Ok(())
}

#[tokio::test]
async fn test_scan_combine_latest3_with_defaults() -> anyhow::Result<()> {
    // Arrange
    let (a_tx, a) = test_channel::<&str>();
    let (_b_tx, b) = test_channel::<&str>();
    let (_c_tx, c) = test_channel::<&str>();
    let mut log = scan_combine_latest3_with_defaults(
        Vec::new(),
        a,
        b,
        c,
        (None, Some("b"), Some("c")),
        |a, b, c, mut acc: Vec<String>| {
            acc.push(format!("{a}{b}{c}"));
            acc
        },
    );

    // Act
    a_tx.send("a")?;
    a_tx.send("A")?;

    // Assert
    assert_eq!(unwrap_stream(&mut log, 500).await?, vec!["abc"]);
    assert_eq!(unwrap_stream(&mut log, 500).await?, vec!["abc", "Abc"]);
    Ok(())
}
