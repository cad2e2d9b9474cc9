// gitbridge: Git Repository Synchronization Service
//
// SPDX-FileCopyrightText: 2026 gitbridge contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Sync operation: keep a local mirror of a remote up to date.
//!
//! ```text
//! clone_or_fetch(dir, repo)
//!   no url                      -> failure outcome, no command
//!   dir is a repository         -> git fetch --all --prune
//!   dir exists, not a repo      -> delete, then
//!   otherwise                   -> git clone --mirror
//! ```

use anyhow::Context as _;
use std::path::Path;
use tracing::{debug, info, warn};

use crate::config::{RepoConfig, Settings};
use crate::credentials;
use crate::error::Result;
use crate::git::{cmd as git, query};
use crate::process::CommandExecutor;
use crate::process::redact::scrub_url_credentials;

use super::Outcome;

/// Ensure `dir` holds an up-to-date local mirror of the repository.
///
/// Idempotent: safe to re-run at any time. A directory in an inconsistent
/// state (present but not a repository) is destroyed and recloned.
///
/// # Errors
///
/// Returns an error only for local faults (filesystem, spawn, timeout).
/// A failing git command is reported as a failure [`Outcome`].
pub async fn clone_or_fetch<E: CommandExecutor>(
    executor: &E,
    dir: &Path,
    repo: &RepoConfig,
) -> Result<Outcome> {
    if !repo.has_url() {
        return Ok(Outcome::failure(format!(
            "no url configured for {}",
            dir.display()
        )));
    }

    let remote = credentials::resolve(repo)?;

    if query::is_repository(dir) {
        debug!(dir = %dir.display(), "updating existing mirror");
        let result = git::fetch_all_prune(executor, dir, &remote).await?;
        return Ok(if result.success() {
            Outcome::success("fetched updates")
        } else {
            Outcome::failure(format!("fetch failed: {}", result.stderr()))
        });
    }

    if dir.exists() {
        warn!(
            dir = %dir.display(),
            "directory exists but is not a repository, removing"
        );
        std::fs::remove_dir_all(dir)
            .with_context(|| format!("failed to remove {}", dir.display()))?;
    }

    if let Some(parent) = dir.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    info!(url = %remote.masked_url(), dir = %dir.display(), "cloning");
    let result = git::clone_mirror(executor, &remote, dir).await?;
    Ok(if result.success() {
        Outcome::success("cloned fresh")
    } else {
        Outcome::failure(format!("clone failed: {}", result.stderr()))
    })
}

/// Sync both configured repositories, source then target, sequenced.
///
/// One repository failing does not stop the other from being synced; the
/// combined outcome fails if either did.
///
/// # Errors
///
/// Returns an error only for local faults; see [`clone_or_fetch`].
pub async fn fetch_all<E: CommandExecutor>(
    executor: &E,
    settings: &Settings,
) -> Result<Outcome> {
    let mut failures = Vec::new();

    for (name, repo, dir) in [
        ("source", &settings.source, settings.paths.source_dir()),
        ("target", &settings.target, settings.paths.target_dir()),
    ] {
        info!(repo = name, url = %scrub_url_credentials(&repo.url), "syncing");
        let outcome = clone_or_fetch(executor, &dir, repo).await?;
        if outcome.ok() {
            info!(repo = name, message = outcome.message(), "synced");
        } else {
            warn!(repo = name, message = outcome.message(), "sync failed");
            failures.push(format!("{name}: {}", outcome.message()));
        }
    }

    Ok(if failures.is_empty() {
        Outcome::success("both repositories synced")
    } else {
        Outcome::failure(failures.join("; "))
    })
}
