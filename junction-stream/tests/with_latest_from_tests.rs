// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use junction_core::{JunctionError, StreamItem, Subject};
use junction_stream::prelude::*;
use junction_test_utils::helpers::assert_stream_ended;
use junction_test_utils::{
    assert_no_element_emitted, test_channel, test_channel_with_errors, unwrap_stream,
};

#[tokio::test]
async fn test_with_latest_from_emits_only_on_driving_arrivals() -> anyhow::Result<()> {
    // Arrange
    let (driving_tx, driving) = test_channel::<i32>();
    let (context_tx, context) = test_channel::<&str>();
    let mut joined = driving.with_latest_from(context, |value, context| format!("{value}{context}"));

    // Act & Assert
    context_tx.send("a")?;
    assert_no_element_emitted(&mut joined, 50).await;

    driving_tx.send(1)?;
    assert_eq!(unwrap_stream(&mut joined, 500).await?, "1a");

    context_tx.send("b")?;
    context_tx.send("c")?;
    assert_no_element_emitted(&mut joined, 50).await;

    driving_tx.send(2)?;
    assert_eq!(unwrap_stream(&mut joined, 500).await?, "2c");
    Ok(())
}

#[tokio::test]
async fn test_with_latest_from_drops_driving_values_before_context() -> anyhow::Result<()> {
    // Arrange
    let (driving_tx, driving) = test_channel::<i32>();
    let (context_tx, context) = test_channel::<i32>();
    let mut joined = driving.with_latest_from(context, |value, context| value * context);

    // Act
    driving_tx.send(3)?;
    assert_no_element_emitted(&mut joined, 50).await;
    context_tx.send(10)?;

    // Assert
    assert_no_element_emitted(&mut joined, 50).await;
    driving_tx.send(4)?;
    assert_eq!(unwrap_stream(&mut joined, 500).await?, 40);
    Ok(())
}

#[tokio::test]
async fn test_with_latest_from_defaults() -> anyhow::Result<()> {
    // Arrange
    let (driving_tx, driving) = test_channel::<i32>();
    let (_context_tx, context) = test_channel::<&str>();
    let mut joined = driving.with_latest_from_with_defaults(
        context,
        (None, Some("default")),
        |value, context| format!("{value}:{context}"),
    );

    // Act
    driving_tx.send(1)?;

    // Assert
    assert_eq!(unwrap_stream(&mut joined, 500).await?, "1:default");
    Ok(())
}

#[tokio::test]
async fn test_with_latest_from2_and_3() -> anyhow::Result<()> {
    // Arrange
    let (d_tx, d) = test_channel::<i32>();
    let (a_tx, a) = test_channel::<i32>();
    let (b_tx, b) = test_channel::<i32>();
    let mut two = d.with_latest_from2(a, b, |d, a, b| d + a + b);

    let (e_tx, e) = test_channel::<u8>();
    let (x_tx, x) = test_channel::<char>();
    let (y_tx, y) = test_channel::<char>();
    let (z_tx, z) = test_channel::<char>();
    let mut three = e.with_latest_from3(x, y, z, |e, x, y, z| format!("{e}{x}{y}{z}"));

    // Act
    a_tx.send(10)?;
    b_tx.send(100)?;
    x_tx.send('x')?;
    y_tx.send('y')?;
    z_tx.send('z')?;
    assert_no_element_emitted(&mut two, 50).await;
    d_tx.send(1)?;
    e_tx.send(7)?;

    // Assert
    assert_eq!(unwrap_stream(&mut two, 500).await?, 111);
    assert_eq!(unwrap_stream(&mut three, 500).await?, "7xyz");
    Ok(())
}

#[tokio::test]
async fn test_with_latest_from3_defaults_include_driving() -> anyhow::Result<()> {
    // Arrange
    let (d_tx, d) = test_channel::<i32>();
    let (_a_tx, a) = test_channel::<i32>();
    let (_b_tx, b) = test_channel::<i32>();
    let (c_tx, c) = test_channel::<i32>();
    let mut joined = d.with_latest_from3_with_defaults(
        a,
        b,
        c,
        (Some(0), Some(1), Some(2), None),
        |d, a, b, c| vec![*d, *a, *b, *c],
    );

    // Act
    c_tx.send(3)?;
    assert_no_element_emitted(&mut joined, 50).await;
    d_tx.send(9)?;

    // Assert
    assert_eq!(unwrap_stream(&mut joined, 500).await?, vec![9, 1, 2, 3]);
    Ok(())
}

#[tokio::test]
async fn test_with_latest_from_sees_context_pushed_just_before_driving() -> anyhow::Result<()> {
    // Arrange
    let (driving_tx, driving) = test_channel::<i32>();
    let (context_tx, context) = test_channel::<i32>();
    let mut joined = driving.with_latest_from(context, |value, context| value + context);

    // Act
    context_tx.send(10)?;
    driving_tx.send(1)?;

    // Assert
    assert_eq!(unwrap_stream(&mut joined, 500).await?, 11);
    assert_no_element_emitted(&mut joined, 50).await;
    Ok(())
}

#[tokio::test]
async fn test_with_latest_from_completes_with_driving() -> anyhow::Result<()> {
    // Arrange
    let (driving_tx, driving) = test_channel::<i32>();
    let (context_tx, context) = test_channel::<i32>();
    let mut joined = driving.with_latest_from(context, |value, context| value + context);
    context_tx.send(1)?;
    assert_no_element_emitted(&mut joined, 50).await;
    driving_tx.send(1)?;
    assert_eq!(unwrap_stream(&mut joined, 500).await?, 2);

    // Act
    drop(driving_tx);

    // Assert
    assert_stream_ended(&mut joined, 500).await;
    drop(context_tx);
    Ok(())
}

#[tokio::test]
async fn test_with_latest_from_survives_defined_context_completion() -> anyhow::Result<()> {
    // Arrange
    let (driving_tx, driving) = test_channel::<i32>();
    let (context_tx, context) = test_channel::<i32>();
    let mut joined = driving.with_latest_from(context, |value, context| value + context);
    context_tx.send(100)?;
    assert_no_element_emitted(&mut joined, 50).await;

    // Act
    drop(context_tx);
    driving_tx.send(1)?;

    // Assert
    assert_eq!(unwrap_stream(&mut joined, 500).await?, 101);
    Ok(())
}

#[tokio::test]
async fn test_with_latest_from_completes_when_undefined_context_completes() -> anyhow::Result<()> {
    // Arrange
    let (driving_tx, driving) = test_channel::<i32>();
    let (context_tx, context) = test_channel::<i32>();
    let mut joined = driving.with_latest_from(context, |value, context| value + context);

    // Act
    driving_tx.send(1)?;
    drop(context_tx);

    // Assert
    assert_stream_ended(&mut joined, 500).await;
    Ok(())
}

#[tokio::test]
async fn test_with_latest_from_forwards_context_error() -> anyhow::Result<()> {
    // Arrange
    let (driving_tx, driving) = test_channel::<i32>();
    let (context_tx, context) = test_channel_with_errors::<i32>();
    let mut joined = driving.with_latest_from(context, |value, context| value + context);

    // Act
    context_tx.send(StreamItem::Error(JunctionError::stream_error("no context")))?;

    // Assert
    assert!(unwrap_stream(&mut joined, 500).await.is_err());
    let _ = driving_tx.send(1);
    assert_stream_ended(&mut joined, 500).await;
    Ok(())
}

#[tokio::test]
async fn test_with_latest_from_subject_feeds_two_operators() -> anyhow::Result<()> {
    // Arrange
    let subject = Subject::<i32>::new();
    let (context_tx, context) = test_channel::<i32>();
    let (offset_tx, offsets) = test_channel::<i32>();
    let mut minus = subject
        .subscribe()?
        .with_latest_from(context, |value, context| value - context);
    let mut plus = subject
        .subscribe()?
        .with_latest_from(offsets, |value, offset| value + offset);

    // Act
    context_tx.send(1)?;
    offset_tx.send(5)?;
    assert_no_element_emitted(&mut minus, 50).await;
    subject.next(10)?;

    // Assert
    assert_eq!(unwrap_stream(&mut minus, 500).await?, 9);
    assert_eq!(unwrap_stream(&mut plus, 500).await?, 15);
    Ok(())
}

#[tokio::test]
async fn test_scan_with_latest_from_threads_accumulator() -> anyhow::Result<()> {
    // Arrange
    let (price_tx, prices) = test_channel::<u32>();
    let (qty_tx, quantities) = test_channel::<u32>();
    let mut totals = prices.scan_with_latest_from(0, quantities, |price, qty, total| {
        total + price * qty
    });

    // Act & Assert
    price_tx.send(5)?;
    assert_no_element_emitted(&mut totals, 50).await;

    qty_tx.send(2)?;
    assert_no_element_emitted(&mut totals, 50).await;

    price_tx.send(3)?;
    assert_eq!(unwrap_stream(&mut totals, 500).await?, 6);

    price_tx.send(4)?;
    assert_eq!(unwrap_stream(&mut totals, 500).await?, 14);
    Ok(())
}

#[tokio::test]
async fn test_scan_with_latest_from_defaults() -> anyhow::Result<()> {
    // Arrange
    let (price_tx, prices) = test_channel::<u32>();
    let (_qty_tx, quantities) = test_channel::<u32>();
    let mut totals = prices.scan_with_latest_from_with_defaults(
        100,
        quantities,
        (None, Some(1)),
        |price, qty, total| total - price * qty,
    );

    // Act
    price_tx.send(30)?;

    // Assert
    assert_eq!(unwrap_stream(&mut totals, 500).await?, 70);
    Ok(())
}
