// gitbridge: Git Repository Synchronization Service
//
// SPDX-FileCopyrightText: 2026 gitbridge contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Sync operation tests against real git repositories.

use std::path::Path;
use std::process::Command;
use tempfile::TempDir;

use gitbridge::config::RepoConfig;
use gitbridge::git::query::is_repository;
use gitbridge::ops::fetch::clone_or_fetch;
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

/// Create a repository with one commit, acting as a "remote".
fn init_remote(path: &Path) {
    git(path, &["init", "--quiet"]);
    git(path, &["config", "user.email", "test@example.com"]);
    git(path, &["config", "user.name", "Test"]);
    git(
        path,
        &["commit", "--allow-empty", "-m", "initial commit", "--quiet"],
    );
}

fn file_url(path: &Path) -> String {
    format!("file://{}", path.display())
}

fn repo_config(url: String) -> RepoConfig {
    RepoConfig {
        url,
        ..Default::default()
    }
}

fn executor() -> ProcessExecutor {
    ProcessExecutor::new(Some(std::time::Duration::from_secs(120)))
}

#[tokio::test]
async fn sync_is_idempotent_and_leaves_a_valid_repository() {
    let remote = temp_dir();
    init_remote(remote.path());

    let data = temp_dir();
    let local = data.path().join("source");
    let config = repo_config(file_url(remote.path()));

    let first = clone_or_fetch(&executor(), &local, &config).await.unwrap();
    assert!(first.ok(), "first sync failed: {}", first.message());
    assert_eq!(first.message(), "cloned fresh");
    assert!(is_repository(&local));

    let second = clone_or_fetch(&executor(), &local, &config).await.unwrap();
    assert!(second.ok(), "second sync failed: {}", second.message());
    assert_eq!(second.message(), "fetched updates");
    assert!(is_repository(&local), "directory must stay a valid repo");
}

#[tokio::test]
async fn sync_heals_a_directory_that_is_not_a_repository() {
    let remote = temp_dir();
    init_remote(remote.path());

    let data = temp_dir();
    let local = data.path().join("source");
    std::fs::create_dir_all(&local).unwrap();
    std::fs::write(local.join("garbage.bin"), b"not a repository").unwrap();

    let config = repo_config(file_url(remote.path()));
    let outcome = clone_or_fetch(&executor(), &local, &config).await.unwrap();

    assert!(outcome.ok(), "heal failed: {}", outcome.message());
    assert!(is_repository(&local));
    assert!(
        !local.join("garbage.bin").exists(),
        "stale content must have been destroyed"
    );
}

#[tokio::test]
async fn sync_picks_up_new_commits_from_the_remote() {
    let remote = temp_dir();
    init_remote(remote.path());

    let data = temp_dir();
    let local = data.path().join("source");
    let config = repo_config(file_url(remote.path()));

    clone_or_fetch(&executor(), &local, &config).await.unwrap();

    git(
        remote.path(),
        &["commit", "--allow-empty", "-m", "second commit", "--quiet"],
    );
    let outcome = clone_or_fetch(&executor(), &local, &config).await.unwrap();
    assert!(outcome.ok());

    // The mirror clone must now know the remote's new tip.
    let remote_tip = Command::new("git")
        .args(["rev-parse", "HEAD"])
        .current_dir(remote.path())
        .output()
        .unwrap();
    let local_tip = Command::new("git")
        .args(["rev-parse", "HEAD"])
        .current_dir(&local)
        .output()
        .unwrap();
    assert_eq!(
        String::from_utf8_lossy(&remote_tip.stdout),
        String::from_utf8_lossy(&local_tip.stdout)
    );
}

#[tokio::test]
async fn unreachable_remote_is_reported_not_escalated() {
    let data = temp_dir();
    let missing = temp_dir();
    let url = file_url(&missing.path().join("does_not_exist"));

    let outcome = clone_or_fetch(&executor(), &data.path().join("source"), &repo_config(url))
        .await
        .unwrap();

    assert!(!outcome.ok());
    assert!(outcome.message().contains("clone failed"));
}

#[tokio::test]
async fn empty_url_is_a_reported_no_op() {
    let data = temp_dir();
    let local = data.path().join("source");

    let outcome = clone_or_fetch(&executor(), &local, &repo_config(String::new()))
        .await
        .unwrap();

    assert!(!outcome.ok());
    assert!(outcome.message().contains("no url configured"));
    assert!(!local.exists(), "no directory may be created");
}
