// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use lull_core::{DebounceConfig, Debouncer, Observable, Reaction, ReactionOptions};
use lull_error::LullError;
use lull_runtime::VirtualClock;
use lull_test_utils::burst::{call_payload, drive_burst, ms, REFERENCE_DELAY_MS};
use lull_test_utils::CallRecorder;

fn delayed_len_reaction(
    clock: &VirtualClock,
    calls: &Observable<Vec<usize>>,
) -> anyhow::Result<(Reaction<Vec<usize>, usize>, CallRecorder<usize>)> {
    let recorder = CallRecorder::new();
    let reaction = Reaction::new(
        clock,
        calls,
        |calls: &Vec<usize>| calls.len(),
        recorder.change_target(),
        ReactionOptions::default()
            .named("reaction(calls.length)")
            .with_delay(ms(REFERENCE_DELAY_MS)),
    )?;
    Ok((reaction, recorder))
}

fn push_burst(clock: &VirtualClock, calls: &Observable<Vec<usize>>, intervals: &[u64]) {
    drive_burst(clock, intervals, |index| calls.update(|calls| calls.push(index)));
    clock.advance(ms(REFERENCE_DELAY_MS));
}

#[test]
fn test_delayed_reaction_does_not_collapse_long_bursts() -> anyhow::Result<()> {
    // Arrange
    let clock = VirtualClock::new();
    let calls = Observable::new(Vec::new());
    let (_reaction, recorder) = delayed_len_reaction(&clock, &calls)?;

    // Act
    push_burst(&clock, &calls, &[100, 200, 300, 400]);

    // Assert
    assert_ne!(recorder.call_count(), 1);
    recorder.assert_calls(&[3, 4]);
    Ok(())
}

#[test]
fn test_delayed_reaction_single_window_bursts() -> anyhow::Result<()> {
    for intervals in [&[100_u64, 300, 200][..], &[100, 100, 100][..]] {
        // Arrange
        let clock = VirtualClock::new();
        let calls = Observable::new(Vec::new());
        let (_reaction, recorder) = delayed_len_reaction(&clock, &calls)?;

        // Act
        push_burst(&clock, &calls, intervals);

        // Assert
        recorder.assert_called_once_with(&3);
    }
    Ok(())
}

#[test]
fn test_delayed_reaction_differs_from_trailing_debouncer() -> anyhow::Result<()> {
    // Arrange
    let clock = VirtualClock::new();
    let calls = Observable::new(Vec::new());
    let (_reaction, reaction_calls) = delayed_len_reaction(&clock, &calls)?;
    let debounced_calls = CallRecorder::new();
    let debouncer = Debouncer::new(
        &clock,
        DebounceConfig::trailing(ms(REFERENCE_DELAY_MS)),
        debounced_calls.target(),
    )?;

    // Act
    drive_burst(&clock, &[100, 200, 300, 400], |index| {
        calls.update(|calls| calls.push(index));
        debouncer.request(call_payload(index));
    });
    clock.advance(ms(REFERENCE_DELAY_MS));

    // Assert
    debounced_calls.assert_called_once_with(&call_payload(3));
    assert_eq!(reaction_calls.call_count(), 2);
    Ok(())
}

#[test]
fn test_delayed_reaction_runs_delay_after_first_change() -> anyhow::Result<()> {
    // Arrange
    let clock = VirtualClock::new();
    let calls = Observable::new(Vec::new());
    let (reaction, recorder) = delayed_len_reaction(&clock, &calls)?;

    // Act
    calls.update(|calls| calls.push(0));
    clock.advance(ms(300));
    calls.update(|calls| calls.push(1));

    // Assert
    assert!(reaction.is_scheduled());
    clock.advance(ms(199));
    recorder.assert_not_called();
    clock.advance(ms(1));
    recorder.assert_called_once_with(&2);
    assert!(!reaction.is_scheduled());
    assert_eq!(reaction.last_value(), 2);
    Ok(())
}

#[test]
fn test_delayed_reaction_skips_effect_when_selection_reverts() -> anyhow::Result<()> {
    // Arrange
    let clock = VirtualClock::new();
    let counter = Observable::new(0_i32);
    let recorder = CallRecorder::new();
    let _reaction = Reaction::new(
        &clock,
        &counter,
        |value: &i32| *value,
        recorder.change_target(),
        ReactionOptions::default().with_delay(ms(500)),
    )?;

    // Act
    counter.set(1);
    clock.advance(ms(100));
    counter.set(0);
    clock.advance(ms(1_000));

    // Assert
    recorder.assert_not_called();
    Ok(())
}

#[test]
fn test_immediate_reaction_runs_on_every_change() -> anyhow::Result<()> {
    // Arrange
    let clock = VirtualClock::new();
    let calls = Observable::new(Vec::new());
    let recorder = CallRecorder::new();
    let reaction = Reaction::new(
        &clock,
        &calls,
        |calls: &Vec<usize>| calls.len(),
        recorder.change_target(),
        ReactionOptions::default(),
    )?;

    // Act
    calls.update(|calls| calls.push(0));
    calls.update(|calls| calls.push(1));
    calls.update(|calls| calls.push(2));

    // Assert
    recorder.assert_calls(&[1, 2, 3]);
    assert_eq!(reaction.delay(), None);
    assert_eq!(clock.pending_timers(), 0);
    Ok(())
}

#[test]
fn test_zero_delay_reaction_is_synchronous() -> anyhow::Result<()> {
    let clock = VirtualClock::new();
    let counter = Observable::new(0_u8);
    let recorder = CallRecorder::new();
    let options: ReactionOptions = serde_json::from_str(r#"{ "delay_ms": 0 }"#)?;
    let _reaction = Reaction::new(
        &clock,
        &counter,
        |v: &u8| *v,
        recorder.change_target(),
        options,
    )?;

    counter.set(5);

    recorder.assert_called_once_with(&5);
    Ok(())
}

#[test]
fn test_unchanged_selection_does_not_run_effect() -> anyhow::Result<()> {
    let clock = VirtualClock::new();
    let calls = Observable::new(Vec::<usize>::new());
    let recorder = CallRecorder::new();
    let _reaction = Reaction::new(
        &clock,
        &calls,
        |calls: &Vec<usize>| !calls.is_empty(),
        recorder.change_target(),
        ReactionOptions::default(),
    )?;

    calls.update(|calls| calls.push(0));
    calls.update(|calls| calls.push(1));

    recorder.assert_called_once_with(&true);
    Ok(())
}

#[test]
fn test_fire_immediately_runs_effect_with_initial_selection() -> anyhow::Result<()> {
    let clock = VirtualClock::new();
    let counter = Observable::new(7_i32);
    let recorder = CallRecorder::new();

    let _reaction = Reaction::new(
        &clock,
        &counter,
        |value: &i32| *value * 2,
        recorder.change_target(),
        ReactionOptions::default().fire_immediately(),
    )?;

    recorder.assert_called_once_with(&14);
    Ok(())
}

#[test]
fn test_dispose_cancels_scheduled_run() -> anyhow::Result<()> {
    // Arrange
    let clock = VirtualClock::new();
    let calls = Observable::new(Vec::new());
    let (reaction, recorder) = delayed_len_reaction(&clock, &calls)?;
    calls.update(|calls| calls.push(0));

    // Act
    reaction.dispose();
    reaction.dispose();
    clock.advance(ms(1_000));
    calls.update(|calls| calls.push(1));

    // Assert
    assert!(reaction.is_disposed());
    recorder.assert_not_called();
    assert_eq!(calls.observer_count(), 0);
    assert_eq!(clock.pending_timers(), 0);
    Ok(())
}

#[test]
fn test_drop_disposes_reaction() -> anyhow::Result<()> {
    let clock = VirtualClock::new();
    let calls = Observable::new(Vec::new());
    let (reaction, recorder) = delayed_len_reaction(&clock, &calls)?;
    calls.update(|calls| calls.push(0));

    drop(reaction);
    clock.advance(ms(1_000));

    recorder.assert_not_called();
    assert_eq!(calls.observer_count(), 0);
    Ok(())
}

#[test]
fn test_negative_delay_is_rejected() {
    let clock = VirtualClock::new();
    let counter = Observable::new(0_i32);
    let options = ReactionOptions {
        delay_ms: Some(-500),
        ..ReactionOptions::default()
    };

    let result = Reaction::new(&clock, &counter, |v: &i32| *v, |_, _| {}, options);

    assert!(matches!(
        result,
        Err(LullError::InvalidConfig {
            field: "delay_ms",
            ..
        })
    ));
    assert_eq!(counter.observer_count(), 0);
}

#[test]
fn test_default_name() -> anyhow::Result<()> {
    let clock = VirtualClock::new();
    let counter = Observable::new(0_i32);

    let reaction = Reaction::new(
        &clock,
        &counter,
        |v: &i32| *v,
        |_, _| {},
        ReactionOptions::default(),
    )?;

    assert_eq!(reaction.name(), "reaction");
    Ok(())
}

#[test]
fn test_reentrant_effect_is_skipped() -> anyhow::Result<()> {
    // Arrange
    let clock = VirtualClock::new();
    let calls = Observable::new(Vec::<usize>::new());
    let recorder = CallRecorder::new();
    let mut record = recorder.target();
    let source = calls.clone();
    let reaction = Reaction::new(
        &clock,
        &calls,
        |calls: &Vec<usize>| calls.len(),
        move |len, _previous| {
            record(len);
            if len < 3 {
                source.update(|calls| calls.push(len));
            }
        },
        ReactionOptions::default(),
    )?;

    // Act
    calls.update(|calls| calls.push(0));

    // Assert
    recorder.assert_calls(&[1]);
    assert_eq!(reaction.last_value(), 2);
    Ok(())
}

#[test]
fn test_effect_receives_previous_selection() -> anyhow::Result<()> {
    // Arrange
    let clock = VirtualClock::new();
    let calls = Observable::new(Vec::new());
    let recorder = CallRecorder::new();
    let mut record = recorder.target();
    let _reaction = Reaction::new(
        &clock,
        &calls,
        |calls: &Vec<usize>| calls.len(),
        move |len, previous| record((len, previous)),
        ReactionOptions::default()
            .with_delay(ms(REFERENCE_DELAY_MS))
            .fire_immediately(),
    )?;

    // Act
    push_burst(&clock, &calls, &[100, 200, 300, 400]);

    // Assert
    recorder.assert_calls(&[(0, None), (3, Some(0)), (4, Some(3))]);
    Ok(())
}

#[test]
fn test_delayed_reaction_recovers_after_clock_reset() -> anyhow::Result<()> {
    // Arrange
    let clock = VirtualClock::new();
    let counter = Observable::new(0_i32);
    let recorder = CallRecorder::new();
    let reaction = Reaction::new(
        &clock,
        &counter,
        |value: &i32| *value,
        recorder.change_target(),
        ReactionOptions::default().with_delay(ms(500)),
    )?;
    counter.set(1);
    assert!(reaction.is_scheduled());

    // Act
    clock.reset();
    assert!(!reaction.is_scheduled());
    counter.set(2);
    clock.advance(ms(10_000));
    counter.set(3);
    clock.advance(ms(10_000));

    // Assert
    recorder.assert_calls(&[2, 3]);
    assert!(!reaction.is_scheduled());
    Ok(())
}
