use super::*;

fn temp_config_path(name: &str) -> std::path::PathBuf {
    let root = std::env::temp_dir().join(format!("cgh-config-{name}-{}", std::process::id()));
    std::fs::create_dir_all(&root).expect("create temp root");
    root.join("harness.json")
}

#[test]
fn defaults_match_documented_values() {
    let config = HarnessConfig::default();
    assert_eq!(config.buffer, 2048);
    assert_eq!(config.timeout, Duration::from_secs(1));
    assert_eq!(config.frame_delay, Duration::ZERO);
}

#[test]
fn zero_frame_rate_disables_pacing() {
    assert_eq!(frame_delay_for(0), Duration::ZERO);
    assert_eq!(frame_delay_for(4), Duration::from_millis(250));
    assert_eq!(frame_delay_for(3), Duration::from_millis(333));
}

#[test]
fn negative_timeout_is_rejected() {
    let err = HarnessConfig::default()
        .with_timeout_seconds(-0.5)
        .expect_err("negative timeout");
    assert!(err.to_string().contains("non-negative"));
    assert!(HarnessConfig::default()
        .with_timeout_seconds(f64::NAN)
        .is_err());
}

#[test]
fn oversized_timeout_is_an_error() {
    let err = HarnessConfig::default()
        .with_timeout_seconds(1e30)
        .expect_err("timeout beyond Duration range");
    assert!(err.to_string().contains("out of range"), "{err}");

    let file = ConfigFile {
        timeout_seconds: Some(1e30),
        ..ConfigFile::default()
    };
    assert!(validate_config(&file).is_err());
    assert!(file.apply(HarnessConfig::default()).is_err());
}

#[test]
fn default_timeout_yields_to_explicit_choice() {
    let config = HarnessConfig::default();
    assert!(!config.timeout_is_explicit());
    let short = config.with_default_timeout(Duration::from_millis(100));
    assert_eq!(short.timeout, Duration::from_millis(100));
    assert!(!short.timeout_is_explicit());

    let chosen = HarnessConfig::default()
        .with_timeout(Duration::from_secs(1))
        .with_default_timeout(Duration::from_millis(100));
    assert_eq!(chosen.timeout, Duration::from_secs(1));
    assert!(chosen.timeout_is_explicit());
}

#[test]
fn config_file_overrides_defaults() {
    let path = temp_config_path("override");
    std::fs::write(&path, br#"{"buffer": 16, "frame_rate": 10, "timeout_seconds": 0.25}"#)
        .expect("write config");

    let file = load_config(&path).expect("load config");
    let config = file.apply(HarnessConfig::default()).expect("apply");

    assert_eq!(config.buffer, 16);
    assert_eq!(config.frame_delay, Duration::from_millis(100));
    assert_eq!(config.timeout, Duration::from_millis(250));
}

#[test]
fn config_file_rejects_conflicting_pacing() {
    let config = ConfigFile {
        frame_rate: Some(10),
        frame_delay_ms: Some(5),
        ..ConfigFile::default()
    };
    assert!(validate_config(&config).is_err());
}

#[test]
fn config_file_rejects_unknown_fields() {
    let path = temp_config_path("unknown");
    std::fs::write(&path, br#"{"buffer": 16, "delay": 3}"#).expect("write config");
    assert!(load_config(&path).is_err());
}

#[test]
fn config_file_rejects_zero_buffer() {
    let config = ConfigFile {
        buffer: Some(0),
        ..ConfigFile::default()
    };
    let err = validate_config(&config).expect_err("zero buffer");
    assert!(err.to_string().contains("buffer"));
}
