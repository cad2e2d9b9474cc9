// gitbridge: Git Repository Synchronization Service
//
// SPDX-FileCopyrightText: 2026 gitbridge contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mirror command implementation.

use tracing::info;

use crate::cli::MirrorArgs;
use crate::config::Settings;
use crate::error::Result;
use crate::ops;

/// Replicate source into target once.
///
/// # Errors
///
/// Returns an error if the mirror operation failed, turning into a
/// non-zero process exit.
pub async fn run_mirror_command(args: &MirrorArgs, settings: &Settings) -> Result<()> {
    let strategy = args
        .strategy
        .map_or(settings.mirror.strategy, Into::into);
    let executor = super::build_executor(settings);
    let outcome = ops::mirror::mirror(&executor, settings, strategy, args.force).await?;
    if outcome.ok() {
        info!(message = outcome.message(), "mirror complete");
        Ok(())
    } else {
        anyhow::bail!("{}", outcome.message())
    }
}
