// gitbridge: Git Repository Synchronization Service
//
// SPDX-FileCopyrightText: 2026 gitbridge contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mirror operation tests against real git repositories.

use std::collections::BTreeSet;
use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

use gitbridge::config::{MirrorStrategy, PathsConfig, RepoConfig, Settings};
use gitbridge::ops::mirror::mirror;
use gitbridge::process::ProcessExecutor;

fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("failed to create temp dir")
}

fn git(cwd: &Path, args: &[&str]) {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .env("GIT_TERMINAL_PROMPT", "0")
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

fn git_stdout(cwd: &Path, args: &[&str]) -> String {
    let output = Command::new("git")
        .args(args)
        .current_dir(cwd)
        .output()
        .expect("failed to run git");
    assert!(
        output.status.success(),
        "git {args:?} failed: {}",
        String::from_utf8_lossy(&output.stderr)
    );
    String::from_utf8_lossy(&output.stdout).trim().to_string()
}

/// Source repository with branches `main`, `dev` and tag `v1`.
fn init_source(path: &Path) {
    git(path, &["init", "--quiet", "--initial-branch=main"]);
    git(path, &["config", "user.email", "test@example.com"]);
    git(path, &["config", "user.name", "Test"]);
    git(
        path,
        &["commit", "--allow-empty", "-m", "initial commit", "--quiet"],
    );
    git(path, &["branch", "dev"]);
    git(path, &["tag", "v1"]);
}

/// Bare target repository seeded with an unrelated branch `old`.
fn init_target(path: &Path, seed_from: &Path) {
    git(path, &["init", "--bare", "--quiet", "--initial-branch=main"]);
    let url = file_url(path);
    git(seed_from, &["push", "--quiet", &url, "main:old"]);
}

fn file_url(path: &Path) -> String {
    format!("file://{}", path.display())
}

fn heads(repo: &Path) -> BTreeSet<String> {
    git_stdout(
        repo,
        &["for-each-ref", "--format=%(refname:short)", "refs/heads"],
    )
    .lines()
    .map(ToString::to_string)
    .collect()
}

fn tags(repo: &Path) -> BTreeSet<String> {
    git_stdout(
        repo,
        &["for-each-ref", "--format=%(refname:short)", "refs/tags"],
    )
    .lines()
    .map(ToString::to_string)
    .collect()
}

fn set_of(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(ToString::to_string).collect()
}

struct Fixture {
    _source: TempDir,
    target: TempDir,
    _data: TempDir,
    settings: Settings,
}

fn fixture() -> Fixture {
    let source = temp_dir();
    init_source(source.path());
    let target = temp_dir();
    init_target(target.path(), source.path());
    let data = temp_dir();

    let settings = Settings {
        source: RepoConfig {
            url: file_url(source.path()),
            ..Default::default()
        },
        target: RepoConfig {
            url: file_url(target.path()),
            ..Default::default()
        },
        paths: PathsConfig {
            data: data.path().to_path_buf(),
        },
        ..Default::default()
    };

    Fixture {
        _source: source,
        target,
        _data: data,
        settings,
    }
}

fn executor() -> ProcessExecutor {
    ProcessExecutor::new(Some(std::time::Duration::from_secs(120)))
}

#[tokio::test]
async fn incremental_mirror_is_additive_without_force() {
    let fx = fixture();

    let outcome = mirror(&executor(), &fx.settings, MirrorStrategy::Incremental, false)
        .await
        .unwrap();
    assert!(outcome.ok(), "mirror failed: {}", outcome.message());

    // Source branches arrive, the target's own branch survives.
    assert_eq!(heads(fx.target.path()), set_of(&["dev", "main", "old"]));
    assert_eq!(tags(fx.target.path()), set_of(&["v1"]));
}

#[tokio::test]
async fn forced_incremental_mirror_overwrites_and_prunes() {
    let fx = fixture();

    let outcome = mirror(&executor(), &fx.settings, MirrorStrategy::Incremental, true)
        .await
        .unwrap();
    assert!(outcome.ok(), "mirror failed: {}", outcome.message());

    // Exactly the source's ref set; `old` is pruned.
    assert_eq!(heads(fx.target.path()), set_of(&["dev", "main"]));
    assert_eq!(tags(fx.target.path()), set_of(&["v1"]));
}

#[tokio::test]
async fn incremental_mirror_can_run_twice() {
    let fx = fixture();

    for _ in 0..2 {
        let outcome = mirror(&executor(), &fx.settings, MirrorStrategy::Incremental, false)
            .await
            .unwrap();
        assert!(
            outcome.ok(),
            "repeated mirror must stay idempotent: {}",
            outcome.message()
        );
    }

    assert_eq!(heads(fx.target.path()), set_of(&["dev", "main", "old"]));
}

#[tokio::test]
async fn overwrite_mirror_makes_target_ref_set_equal_to_source() {
    let fx = fixture();

    let outcome = mirror(&executor(), &fx.settings, MirrorStrategy::Overwrite, false)
        .await
        .unwrap();
    assert!(outcome.ok(), "mirror failed: {}", outcome.message());

    let source_refs = git_stdout(
        fx._source.path(),
        &["for-each-ref", "--format=%(refname) %(objectname)"],
    );
    let target_refs = git_stdout(
        fx.target.path(),
        &["for-each-ref", "--format=%(refname) %(objectname)"],
    );
    assert_eq!(
        source_refs, target_refs,
        "target must be byte-for-byte equivalent to source's ref set"
    );
}

#[tokio::test]
async fn mirror_against_unreachable_target_reports_the_failing_step() {
    let fx = fixture();
    let mut settings = fx.settings.clone();
    let missing = temp_dir();
    settings.target.url = file_url(&missing.path().join("does_not_exist"));

    let outcome = mirror(&executor(), &settings, MirrorStrategy::Incremental, false)
        .await
        .unwrap();

    assert!(!outcome.ok());
    assert!(
        outcome.message().contains("target-ready"),
        "failure must name the step, got: {}",
        outcome.message()
    );
}
