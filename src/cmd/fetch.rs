// gitbridge: Git Repository Synchronization Service
//
// SPDX-FileCopyrightText: 2026 gitbridge contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Fetch command implementation.

use tracing::info;

use crate::config::Settings;
use crate::error::Result;
use crate::ops;

/// Sync both configured repositories once.
///
/// # Errors
///
/// Returns an error if either repository failed to sync, turning into a
/// non-zero process exit.
pub async fn run_fetch_command(settings: &Settings) -> Result<()> {
    let executor = super::build_executor(settings);
    let outcome = ops::fetch::fetch_all(&executor, settings).await?;
    if outcome.ok() {
        info!(message = outcome.message(), "fetch complete");
        Ok(())
    } else {
        anyhow::bail!("fetch failed: {}", outcome.message())
    }
}
