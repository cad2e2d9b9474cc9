// gitbridge: Git Repository Synchronization Service
//
// SPDX-FileCopyrightText: 2026 gitbridge contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Environment-driven settings, verified through the binary's `options`
//! command so each test gets its own process environment.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::TempDir;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn options(cwd: &Path, envs: &[(&str, &str)]) -> Output {
    let mut command = Command::new(env!("CARGO_BIN_EXE_gitbridge"));
    command.arg("options").current_dir(cwd);
    for (key, value) in envs {
        command.env(key, value);
    }
    command.output().expect("failed to run gitbridge")
}

#[test]
fn repository_settings_come_from_the_environment() {
    let cwd = temp_dir();
    let output = options(
        cwd.path(),
        &[
            ("GITBRIDGE_SOURCE__URL", "https://example.com/source.git"),
            ("GITBRIDGE_SOURCE__AUTH", "pat"),
            ("GITBRIDGE_SOURCE__PASSWORD", "super-secret-token"),
            ("GITBRIDGE_TARGET__URL", "ssh://git@example.com/target.git"),
            ("GITBRIDGE_TARGET__AUTH", "ssh"),
        ],
    );
    assert!(
        output.status.success(),
        "options failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(stdout.contains("https://example.com/source.git"));
    assert!(stdout.contains("ssh://git@example.com/target.git"));
    assert!(stdout.contains("pat"));

    // The secret itself must never surface, only the mask.
    assert!(stdout.contains("******"));
    assert!(!stdout.contains("super-secret-token"));
}

#[test]
fn environment_overrides_the_settings_file() {
    let cwd = temp_dir();
    std::fs::write(
        cwd.path().join("gitbridge.toml"),
        r#"
        [source]
        url = "https://file.example.com/r.git"
        "#,
    )
    .unwrap();

    let output = options(
        cwd.path(),
        &[("GITBRIDGE_SOURCE__URL", "https://env.example.com/r.git")],
    );
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("https://env.example.com/r.git"));
    assert!(!stdout.contains("https://file.example.com/r.git"));
}

#[test]
fn invalid_log_level_fails_settings_loading() {
    let cwd = temp_dir();
    let output = options(cwd.path(), &[("GITBRIDGE_LOG_LEVEL", "shouting")]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Failed to load settings"),
        "stderr was: {stderr}"
    );
}

#[test]
fn unknown_auth_mode_degrades_instead_of_failing() {
    let cwd = temp_dir();
    let output = options(
        cwd.path(),
        &[
            ("GITBRIDGE_SOURCE__URL", "https://example.com/r.git"),
            ("GITBRIDGE_SOURCE__AUTH", "kerberos"),
        ],
    );
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("source.auth"));
    assert!(stdout.contains("none"), "unknown auth must degrade to none");
}
