// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use lull_runtime::VirtualClock;
use lull_stream_time::DebounceExt;
use lull_test_utils::burst::{call_payload, ms, BURST_INTERVALS, REFERENCE_DELAY_MS};
use lull_test_utils::{assert_no_element_emitted, assert_stream_ended, test_channel, unwrap_stream};

#[test]
fn test_debounce_emits_after_quiet_period() -> anyhow::Result<()> {
    // Arrange
    let clock = VirtualClock::new();
    let (tx, stream) = test_channel();
    let mut debounced = stream.debounce_with_timer(ms(500), clock.clone());

    // Act
    tx.send(call_payload(0))?;
    assert_no_element_emitted(&mut debounced);
    clock.advance(ms(499));
    assert_no_element_emitted(&mut debounced);
    clock.advance(ms(1));

    // Assert
    assert_eq!(unwrap_stream(&mut debounced), call_payload(0));
    assert_no_element_emitted(&mut debounced);
    Ok(())
}

#[test]
fn test_debounce_keeps_only_latest_value_of_burst() -> anyhow::Result<()> {
    for intervals in BURST_INTERVALS {
        // Arrange
        let clock = VirtualClock::new();
        let (tx, stream) = test_channel();
        let mut debounced = stream.debounce_with_timer(ms(REFERENCE_DELAY_MS), clock.clone());

        // Act
        for (index, interval) in intervals.iter().enumerate() {
            tx.send(call_payload(index))?;
            assert_no_element_emitted(&mut debounced);
            clock.advance(ms(*interval));
        }
        assert_no_element_emitted(&mut debounced);
        clock.advance(ms(REFERENCE_DELAY_MS));

        // Assert
        assert_eq!(unwrap_stream(&mut debounced), call_payload(intervals.len() - 1));
        assert_no_element_emitted(&mut debounced);
    }
    Ok(())
}

#[test]
fn test_debounce_emits_pending_value_when_stream_ends() -> anyhow::Result<()> {
    // Arrange
    let clock = VirtualClock::new();
    let (tx, stream) = test_channel();
    let mut debounced = stream.debounce_with_timer(ms(500), clock.clone());
    tx.send(1)?;
    tx.send(2)?;
    assert_no_element_emitted(&mut debounced);

    // Act
    drop(tx);

    // Assert
    assert_eq!(unwrap_stream(&mut debounced), 2);
    assert_stream_ended(&mut debounced);
    assert_eq!(clock.pending_timers(), 0);
    Ok(())
}

#[test]
fn test_debounce_zero_duration_emits_every_value() -> anyhow::Result<()> {
    let clock = VirtualClock::new();
    let (tx, stream) = test_channel();
    let mut debounced = stream.debounce_with_timer(ms(0), clock.clone());

    tx.send(1)?;
    assert_eq!(unwrap_stream(&mut debounced), 1);
    tx.send(2)?;
    assert_eq!(unwrap_stream(&mut debounced), 2);

    Ok(())
}

#[test]
fn test_debounce_separate_bursts() -> anyhow::Result<()> {
    // Arrange
    let clock = VirtualClock::new();
    let (tx, stream) = test_channel();
    let mut debounced = stream.debounce_with_timer(ms(500), clock.clone());

    // Act & Assert
    tx.send("a")?;
    assert_no_element_emitted(&mut debounced);
    clock.advance(ms(600));
    assert_eq!(unwrap_stream(&mut debounced), "a");

    tx.send("b")?;
    assert_no_element_emitted(&mut debounced);
    clock.advance(ms(300));
    tx.send("c")?;
    assert_no_element_emitted(&mut debounced);
    clock.advance(ms(500));
    assert_eq!(unwrap_stream(&mut debounced), "c");
    Ok(())
}

#[tokio::test]
async fn test_debounce_wakes_task_when_clock_advances() -> anyhow::Result<()> {
    use futures::StreamExt;

    // Arrange
    let clock = VirtualClock::new();
    let (tx, stream) = test_channel();
    let mut debounced = stream.debounce_with_timer(ms(500), clock.clone());
    tx.send(7)?;

    // Act
    let driver = clock.clone();
    let (value, ()) = tokio::join!(debounced.next(), async move {
        tokio::task::yield_now().await;
        driver.advance(ms(500));
    });

    // Assert
    assert_eq!(value, Some(7));
    Ok(())
}
