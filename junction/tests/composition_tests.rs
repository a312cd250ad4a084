// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use junction::prelude::*;
use junction_test_utils::{ready_item, settle, test_channel, unwrap_stream};
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::time::advance;

#[tokio::test]
async fn test_subject_feeds_combine_latest_and_with_latest_from() -> anyhow::Result<()> {
    // Arrange
    let prices = Subject::<u32>::new();
    let (quantity_tx, quantity) = mpsc::unbounded_channel::<u32>();
    let (orders_tx, orders) = mpsc::unbounded_channel::<&str>();

    let mut exposure = combine_latest2(
        prices.subscribe()?,
        quantity.into_junction_stream(),
        |price, quantity| price * quantity,
    );
    let mut quotes = orders
        .into_junction_stream()
        .with_latest_from(prices.subscribe()?, |order, price| format!("{order}@{price}"));

    // Act & Assert
    quantity_tx.send(3)?;
    prices.next(10)?;
    assert_eq!(unwrap_stream(&mut exposure, 500).await?, 30);

    orders_tx.send("buy")?;
    assert_eq!(unwrap_stream(&mut quotes, 500).await?, "buy@10");

    prices.next(11)?;
    assert_eq!(unwrap_stream(&mut exposure, 500).await?, 33);
    settle().await;
    orders_tx.send("sell")?;
    assert_eq!(unwrap_stream(&mut quotes, 500).await?, "sell@11");
    Ok(())
}

#[tokio::test]
async fn test_subject_error_reaches_every_operator() -> anyhow::Result<()> {
    // Arrange
    let source = Subject::<i32>::new();
    let (_other_tx, other) = test_channel::<i32>();
    let mut combined = combine_latest2(source.subscribe()?, other, |a, b| a + b);
    let mut previous = source.subscribe()?.with_previous(0, |previous, current| current - previous);

    // Act
    source.error(JunctionError::stream_error("feed lost"))?;

    // Assert
    assert!(unwrap_stream(&mut combined, 500).await.is_err());
    assert!(unwrap_stream(&mut previous, 500).await.is_err());
    assert!(source.is_closed());
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_combined_output_drives_timeout_operator() -> anyhow::Result<()> {
    // Arrange
    let (left_tx, left) = test_channel::<i32>();
    let (right_tx, right) = test_channel::<i32>();
    let (unit_tx, unit) = test_channel::<&str>();
    let sum = combine_latest2(left, right, |l, r| l + r);
    let mut labelled = sum.with_latest_from_timeout(
        unit,
        |sum, unit| format!("{sum}{unit}"),
        Duration::from_millis(100),
        TokioScheduler::default(),
        |sum, unit| format!("{sum}{unit}?"),
    );
    unit_tx.send("kg")?;
    settle().await;

    // Act
    left_tx.send(1)?;
    right_tx.send(2)?;
    settle().await;

    // Assert
    assert_eq!(ready_item(&mut labelled), Some(Some(StreamItem::Value("3kg".to_string()))));
    advance(Duration::from_millis(100)).await;
    settle().await;
    assert_eq!(ready_item(&mut labelled), Some(Some(StreamItem::Value("3kg?".to_string()))));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_default_timeout_feeds_periodic_sampler() -> anyhow::Result<()> {
    // Arrange
    let (tx, heartbeat) = test_channel::<&str>();
    let scheduler = TokioScheduler::default();
    let mut status = heartbeat
        .default_timeout(Duration::from_millis(150), "down", scheduler.clone())
        .periodic(Duration::from_millis(100), scheduler);
    tx.send("up")?;
    settle().await;

    // Act
    let mut samples = Vec::new();
    for _ in 0..6 {
        advance(Duration::from_millis(50)).await;
        settle().await;
        while let Some(Some(StreamItem::Value(value))) = ready_item(&mut status) {
            samples.push(value);
        }
    }

    // Assert
    assert_eq!(samples, vec!["up", "down", "down"]);
    Ok(())
}

#[tokio::test]
async fn test_dropping_output_releases_inputs() -> anyhow::Result<()> {
    // Arrange
    let source = Subject::<u8>::new();
    let combined = combine_latest2(source.subscribe()?, source.subscribe()?, |a, b| a + b);
    settle().await;
    assert_eq!(source.subscriber_count(), 2);

    // Act
    drop(combined);
    settle().await;
    source.next(1)?;

    // Assert
    assert_eq!(source.subscriber_count(), 0);
    Ok(())
}
