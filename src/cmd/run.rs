// gitbridge: Git Repository Synchronization Service
//
// SPDX-FileCopyrightText: 2026 gitbridge contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Run command implementation: one-shot or cron-scheduled service mode.

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::cli::{ModeArg, RunArgs};
use crate::config::{MirrorStrategy, Settings};
use crate::error::Result;
use crate::ops::{self, Outcome};
use crate::process::ProcessExecutor;
use crate::scheduler;

/// Run the selected operation once, or loop on the configured schedule.
///
/// Without a schedule this behaves like the one-shot commands: a failed
/// outcome becomes a non-zero exit. With a schedule the loop runs until the
/// process receives a termination signal; a single failed run never stops
/// it.
///
/// # Errors
///
/// Returns an error for an invalid cron expression, or for a failed
/// one-shot run.
pub async fn run_run_command(args: &RunArgs, settings: &Settings) -> Result<()> {
    let executor = super::build_executor(settings);
    let strategy = args
        .strategy
        .map_or(settings.mirror.strategy, Into::into);

    let Some(expression) = args.schedule.as_deref() else {
        let outcome = run_once(&executor, settings, args.mode, strategy, args.force).await?;
        if outcome.ok() {
            info!(message = outcome.message(), "run complete");
            return Ok(());
        }
        anyhow::bail!("{}", outcome.message())
    };

    let schedule = scheduler::parse_schedule(expression)?;
    info!(schedule = expression, mode = ?args.mode, "starting scheduled service");

    let token = CancellationToken::new();
    let signal_token = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("termination signal received, stopping after the current run");
            signal_token.cancel();
        }
    });

    scheduler::run_scheduled(&schedule, &token, async || {
        run_once(&executor, settings, args.mode, strategy, args.force).await
    })
    .await;

    Ok(())
}

async fn run_once(
    executor: &ProcessExecutor,
    settings: &Settings,
    mode: ModeArg,
    strategy: MirrorStrategy,
    force: bool,
) -> Result<Outcome> {
    match mode {
        ModeArg::Fetch => ops::fetch::fetch_all(executor, settings).await,
        ModeArg::Mirror => ops::mirror::mirror(executor, settings, strategy, force).await,
    }
}
