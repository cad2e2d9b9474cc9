// gitbridge: Git Repository Synchronization Service
//
// SPDX-FileCopyrightText: 2026 gitbridge contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git command wrappers.
//!
//! Thin builders over [`CommandRequest`]; every wrapper threads the resolved
//! remote's environment and secrets through so SSH keys work and output
//! stays redacted. Non-zero exits come back as `CommandResult`s, never as
//! errors.

use std::path::Path;
use tracing::debug;

use crate::credentials::ResolvedRemote;
use crate::error::Result;
use crate::process::{CommandExecutor, CommandRequest, CommandResult, RunFlags};

fn path_str(path: &Path) -> Result<&str> {
    path.to_str()
        .ok_or_else(|| anyhow::anyhow!("path is not valid UTF-8: {}", path.display()))
}

/// `git clone --mirror <url> <dest>` — a bare mirror clone whose refs track
/// the remote's refs one-to-one.
pub async fn clone_mirror<E: CommandExecutor>(
    executor: &E,
    remote: &ResolvedRemote,
    dest: &Path,
) -> Result<CommandResult> {
    let request = CommandRequest::new("git")
        .args(["clone", "--mirror", "--quiet"])
        .arg(remote.url())
        .arg(path_str(dest)?)
        .envs(remote.env())
        .secrets(remote.secrets())
        .name("git clone");
    executor.run(request).await
}

/// `git clone --bare <url> <dest>`.
pub async fn clone_bare<E: CommandExecutor>(
    executor: &E,
    remote: &ResolvedRemote,
    dest: &Path,
) -> Result<CommandResult> {
    let request = CommandRequest::new("git")
        .args(["clone", "--bare", "--quiet"])
        .arg(remote.url())
        .arg(path_str(dest)?)
        .envs(remote.env())
        .secrets(remote.secrets())
        .name("git clone");
    executor.run(request).await
}

/// `git fetch --all --prune` — update every remote, dropping stale refs.
pub async fn fetch_all_prune<E: CommandExecutor>(
    executor: &E,
    repo_path: &Path,
    remote: &ResolvedRemote,
) -> Result<CommandResult> {
    let request = CommandRequest::new("git")
        .args(["fetch", "--all", "--prune", "--quiet"])
        .cwd(repo_path)
        .envs(remote.env())
        .secrets(remote.secrets())
        .name("git fetch");
    executor.run(request).await
}

/// Add the named remote, refreshing its URL if it already exists.
///
/// `git remote add` failing because the remote exists is not an error;
/// the reference is refreshed with `git remote set-url` instead. The remote
/// is marked `skipFetchAll` so the push link never participates in
/// `git fetch --all` (it may carry different credentials than the origin).
pub async fn ensure_remote<E: CommandExecutor>(
    executor: &E,
    repo_path: &Path,
    name: &str,
    remote: &ResolvedRemote,
) -> Result<CommandResult> {
    let add = executor
        .run(
            CommandRequest::new("git")
                .args(["remote", "add", name])
                .arg(remote.url())
                .cwd(repo_path)
                .secrets(remote.secrets())
                .name("git remote add"),
        )
        .await?;
    let linked = if add.success() {
        add
    } else if add.stderr().contains("already exists") {
        debug!(remote = name, "remote already exists, refreshing url");
        executor
            .run(
                CommandRequest::new("git")
                    .args(["remote", "set-url", name])
                    .arg(remote.url())
                    .cwd(repo_path)
                    .secrets(remote.secrets())
                    .name("git remote set-url"),
            )
            .await?
    } else {
        return Ok(add);
    };
    if !linked.success() {
        return Ok(linked);
    }

    executor
        .run(
            CommandRequest::new("git")
                .args(["config", &format!("remote.{name}.skipFetchAll"), "true"])
                .cwd(repo_path)
                .name("git config"),
        )
        .await
}

/// `git push <remote> --all` — push every local branch, additive.
pub async fn push_all<E: CommandExecutor>(
    executor: &E,
    repo_path: &Path,
    name: &str,
    remote: &ResolvedRemote,
) -> Result<CommandResult> {
    let request = CommandRequest::new("git")
        .args(["push", name, "--all"])
        .cwd(repo_path)
        .envs(remote.env())
        .secrets(remote.secrets())
        .flags(RunFlags::SUPPRESS_OUTPUT_ON_FAILURE)
        .name("git push --all");
    executor.run(request).await
}

/// `git push <remote> --tags` — push every tag, additive.
pub async fn push_tags<E: CommandExecutor>(
    executor: &E,
    repo_path: &Path,
    name: &str,
    remote: &ResolvedRemote,
) -> Result<CommandResult> {
    let request = CommandRequest::new("git")
        .args(["push", name, "--tags"])
        .cwd(repo_path)
        .envs(remote.env())
        .secrets(remote.secrets())
        .flags(RunFlags::SUPPRESS_OUTPUT_ON_FAILURE)
        .name("git push --tags");
    executor.run(request).await
}

/// `git push --mirror <remote>` — force the remote's ref set to exactly
/// match the local one, deleting refs absent locally.
pub async fn push_mirror<E: CommandExecutor>(
    executor: &E,
    repo_path: &Path,
    name: &str,
    remote: &ResolvedRemote,
) -> Result<CommandResult> {
    let request = CommandRequest::new("git")
        .args(["push", "--mirror", name])
        .cwd(repo_path)
        .envs(remote.env())
        .secrets(remote.secrets())
        .flags(RunFlags::SUPPRESS_OUTPUT_ON_FAILURE)
        .name("git push --mirror");
    executor.run(request).await
}
