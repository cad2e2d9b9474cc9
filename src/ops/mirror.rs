// gitbridge: Git Repository Synchronization Service
//
// SPDX-FileCopyrightText: 2026 gitbridge contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mirror operation: replicate the source repository's full history into
//! the target repository.
//!
//! ```text
//! incremental          overwrite
//! -----------          ---------
//! sync source          delete local source
//! sync target          clone --bare source
//! link remote          link remote
//! push --all/--tags    push --mirror
//! (or push --mirror
//!  with --force)
//! ```
//!
//! Each invocation walks source-ready → target-ready → remote-linked →
//! branches-pushed → tags-pushed; the first failing step aborts the rest
//! and names itself in the outcome. Retry is the scheduler's job, on its
//! next natural tick.

use anyhow::Context as _;
use std::path::Path;
use tracing::{debug, info};

use crate::config::{MirrorStrategy, Settings};
use crate::credentials::{self, ResolvedRemote};
use crate::error::Result;
use crate::git::cmd as git;
use crate::process::{CommandExecutor, CommandResult};

use super::{Outcome, fetch};

/// Name of the remote reference pointing at the target repository.
pub const MIRROR_REMOTE: &str = "mirror";

/// Steps of one mirror invocation, in order. Used to name where a run
/// failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    SourceReady,
    TargetReady,
    RemoteLinked,
    BranchesPushed,
    TagsPushed,
}

impl std::fmt::Display for Step {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::SourceReady => "source-ready",
            Self::TargetReady => "target-ready",
            Self::RemoteLinked => "remote-linked",
            Self::BranchesPushed => "branches-pushed",
            Self::TagsPushed => "tags-pushed",
        };
        f.write_str(name)
    }
}

fn fail_at(step: Step, detail: &str) -> Outcome {
    if detail.is_empty() {
        Outcome::failure(format!("mirror failed at {step}"))
    } else {
        Outcome::failure(format!("mirror failed at {step}: {detail}"))
    }
}

/// Push failures have their output suppressed by the runner; report the
/// exit code instead.
fn push_detail(result: &CommandResult) -> String {
    format!("push exited with code {}", result.exit_code())
}

/// Replicate source into target.
///
/// `force` only affects the incremental strategy, switching the branch push
/// from additive to a history-overwriting mirror push that also prunes
/// target refs absent from source. The overwrite strategy always overwrites.
///
/// # Errors
///
/// Returns an error only for local faults (filesystem, spawn, timeout).
/// Remote failures are reported as failure [`Outcome`]s.
pub async fn mirror<E: CommandExecutor>(
    executor: &E,
    settings: &Settings,
    strategy: MirrorStrategy,
    force: bool,
) -> Result<Outcome> {
    if !settings.source.has_url() {
        return Ok(Outcome::failure("no source url configured"));
    }
    if !settings.target.has_url() {
        return Ok(Outcome::failure("no target url configured"));
    }

    info!(strategy = %strategy, force, "mirroring source into target");
    match strategy {
        MirrorStrategy::Incremental => incremental(executor, settings, force).await,
        MirrorStrategy::Overwrite => overwrite(executor, settings).await,
    }
}

async fn incremental<E: CommandExecutor>(
    executor: &E,
    settings: &Settings,
    force: bool,
) -> Result<Outcome> {
    let source_dir = settings.paths.source_dir();

    let ready = fetch::clone_or_fetch(executor, &source_dir, &settings.source).await?;
    if !ready.ok() {
        return Ok(fail_at(Step::SourceReady, ready.message()));
    }

    let ready = fetch::clone_or_fetch(executor, &settings.paths.target_dir(), &settings.target)
        .await?;
    if !ready.ok() {
        return Ok(fail_at(Step::TargetReady, ready.message()));
    }

    let target = credentials::resolve(&settings.target)?;
    let Some(outcome) = link_and_push(executor, &source_dir, &target, force).await? else {
        return Ok(Outcome::success(if force {
            "mirrored source into target (history overwritten)"
        } else {
            "mirrored source into target"
        }));
    };
    Ok(outcome)
}

async fn overwrite<E: CommandExecutor>(executor: &E, settings: &Settings) -> Result<Outcome> {
    let source_dir = settings.paths.source_dir();

    // A fresh bare clone guarantees the pushed ref set is exactly the
    // source's, regardless of whatever the local copy accumulated.
    if source_dir.exists() {
        debug!(dir = %source_dir.display(), "discarding local source copy");
        std::fs::remove_dir_all(&source_dir)
            .with_context(|| format!("failed to remove {}", source_dir.display()))?;
    }
    if let Some(parent) = source_dir.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    let source = credentials::resolve(&settings.source)?;
    info!(url = %source.masked_url(), "cloning source bare");
    let cloned = git::clone_bare(executor, &source, &source_dir).await?;
    if !cloned.success() {
        return Ok(fail_at(
            Step::SourceReady,
            &format!("clone failed: {}", cloned.stderr()),
        ));
    }
    drop(source);

    let target = credentials::resolve(&settings.target)?;
    let Some(outcome) = link_and_push(executor, &source_dir, &target, true).await? else {
        return Ok(Outcome::success(
            "replicated source into target (history overwritten)",
        ));
    };
    Ok(outcome)
}

/// Link the target remote and push. Returns `None` on success, or the
/// failure outcome of the step that broke.
async fn link_and_push<E: CommandExecutor>(
    executor: &E,
    source_dir: &Path,
    target: &ResolvedRemote,
    force: bool,
) -> Result<Option<Outcome>> {
    let linked = git::ensure_remote(executor, source_dir, MIRROR_REMOTE, target).await?;
    if !linked.success() {
        return Ok(Some(fail_at(Step::RemoteLinked, linked.stderr())));
    }

    if force {
        info!(remote = MIRROR_REMOTE, "pushing all refs (mirror)");
        let pushed = git::push_mirror(executor, source_dir, MIRROR_REMOTE, target).await?;
        if !pushed.success() {
            return Ok(Some(fail_at(Step::BranchesPushed, &push_detail(&pushed))));
        }
        return Ok(None);
    }

    info!(remote = MIRROR_REMOTE, "pushing branches");
    let pushed = git::push_all(executor, source_dir, MIRROR_REMOTE, target).await?;
    if !pushed.success() {
        return Ok(Some(fail_at(Step::BranchesPushed, &push_detail(&pushed))));
    }

    info!(remote = MIRROR_REMOTE, "pushing tags");
    let pushed = git::push_tags(executor, source_dir, MIRROR_REMOTE, target).await?;
    if !pushed.success() {
        return Ok(Some(fail_at(Step::TagsPushed, &push_detail(&pushed))));
    }

    Ok(None)
}
