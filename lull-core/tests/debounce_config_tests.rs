// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use lull_core::{DebounceConfig, DebounceMode, Debouncer};
use lull_error::LullError;
use lull_runtime::VirtualClock;
use lull_test_utils::burst::ms;

#[test]
fn test_negative_delay_fails_at_construction() {
    let clock = VirtualClock::new();

    let result = Debouncer::new(
        &clock,
        DebounceConfig::new(-1, DebounceMode::Trailing),
        |_: ()| {},
    );

    match result {
        Err(LullError::InvalidConfig { field, value, .. }) => {
            assert_eq!(field, "delay_ms");
            assert_eq!(value, -1);
        }
        other => panic!("expected InvalidConfig, got {other:?}"),
    }
    assert_eq!(clock.pending_timers(), 0);
}

#[test]
fn test_negative_max_wait_is_rejected() {
    let config = DebounceConfig {
        max_wait_ms: Some(-10),
        ..DebounceConfig::new(500, DebounceMode::Trailing)
    };

    let err = config.validate().unwrap_err();

    assert_eq!(err.config_field(), Some("max_wait_ms"));
}

#[test]
fn test_max_wait_in_leading_mode_is_rejected() {
    let config = DebounceConfig::leading(ms(500)).with_max_wait(ms(1_000));

    let err = config.validate().unwrap_err();

    assert!(err.is_config_error());
    assert!(err.to_string().contains("trailing"));
}

#[test]
fn test_max_wait_shorter_than_delay_is_raised() -> anyhow::Result<()> {
    let validated = DebounceConfig::trailing(ms(500))
        .with_max_wait(ms(100))
        .validate()?;

    assert_eq!(validated.max_wait(), Some(ms(500)));
    Ok(())
}

#[test]
fn test_builders() -> anyhow::Result<()> {
    let trailing = DebounceConfig::trailing(ms(250)).validate()?;
    assert_eq!(trailing.mode(), DebounceMode::Trailing);
    assert_eq!(trailing.delay(), ms(250));
    assert_eq!(trailing.max_wait(), None);

    let leading = DebounceConfig::leading(ms(0)).validate()?;
    assert_eq!(leading.mode(), DebounceMode::Leading);
    assert_eq!(leading.delay(), ms(0));
    Ok(())
}

#[test]
fn test_deserialize_defaults_to_trailing() -> anyhow::Result<()> {
    let config: DebounceConfig = serde_json::from_str(r#"{ "delay_ms": 500 }"#)?;

    assert_eq!(config, DebounceConfig::new(500, DebounceMode::Trailing));
    Ok(())
}

#[test]
fn test_deserialize_full_config() -> anyhow::Result<()> {
    let config: DebounceConfig = serde_json::from_str(
        r#"{ "delay_ms": 500, "mode": "trailing", "max_wait_ms": 2000 }"#,
    )?;

    let validated = config.validate()?;
    assert_eq!(validated.max_wait(), Some(ms(2_000)));
    Ok(())
}

#[test]
fn test_deserialize_rejects_unknown_mode() {
    let result = serde_json::from_str::<DebounceConfig>(r#"{ "delay_ms": 5, "mode": "both" }"#);
    assert!(result.is_err());
}

#[test]
fn test_serialize_omits_missing_max_wait() -> anyhow::Result<()> {
    let json = serde_json::to_string(&DebounceConfig::leading(ms(500)))?;

    assert_eq!(json, r#"{"delay_ms":500,"mode":"leading"}"#);
    Ok(())
}
