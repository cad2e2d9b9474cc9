// gitbridge: Git Repository Synchronization Service
//
// SPDX-FileCopyrightText: 2026 gitbridge contributors
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{LogConfig, LogLevel};
use tracing::Level;

#[test]
fn log_level_parses_case_insensitively() {
    assert_eq!("INFO".parse::<LogLevel>().unwrap(), LogLevel::Info);
    assert_eq!("debug".parse::<LogLevel>().unwrap(), LogLevel::Debug);
    assert_eq!("Warning".parse::<LogLevel>().unwrap(), LogLevel::Warn);
    assert_eq!("off".parse::<LogLevel>().unwrap(), LogLevel::Off);
}

#[test]
fn log_level_rejects_unknown_names() {
    let err = "verbose".parse::<LogLevel>().unwrap_err();
    assert!(err.to_string().contains("verbose"));
}

#[test]
fn log_level_filter_strings_round_trip() {
    for level in [
        LogLevel::Off,
        LogLevel::Error,
        LogLevel::Warn,
        LogLevel::Info,
        LogLevel::Debug,
        LogLevel::Trace,
    ] {
        assert_eq!(level.to_filter_string().parse::<LogLevel>().unwrap(), level);
    }
}

#[test]
fn log_level_maps_to_tracing_levels() {
    assert_eq!(LogLevel::Off.to_tracing_level(), None);
    assert_eq!(LogLevel::Error.to_tracing_level(), Some(Level::ERROR));
    assert_eq!(LogLevel::Trace.to_tracing_level(), Some(Level::TRACE));
}

#[test]
fn log_config_defaults() {
    let config = LogConfig::default();
    assert_eq!(config.console_level(), LogLevel::Info);
    assert_eq!(config.file_level(), LogLevel::Trace);
    assert!(config.log_file().is_none());
    assert!(!config.show_target());
}

#[test]
fn log_config_builder_sets_levels() {
    let config = LogConfig::builder()
        .with_console_level(LogLevel::Debug)
        .with_file_level(LogLevel::Warn)
        .with_log_file("bridge.log".to_string())
        .build();
    assert_eq!(config.console_level(), LogLevel::Debug);
    assert_eq!(config.file_level(), LogLevel::Warn);
    assert_eq!(config.log_file(), Some("bridge.log"));
}
