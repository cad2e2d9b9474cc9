// gitbridge: Git Repository Synchronization Service
//
// SPDX-FileCopyrightText: 2026 gitbridge contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Cron-driven scheduling loop.
//!
//! ```text
//! parse_schedule("*/5 * * * *" | "@hourly" | 6/7-field)
//!        |
//!        v
//! run_scheduled(schedule, token, job)
//!   loop: next fire strictly after now --> sleep --> job()
//!         job errors are logged and swallowed
//!         scheduling faults back off SCHEDULER_BACKOFF
//!   cancellation: token (process termination signal)
//! ```
//!
//! Fire times are always computed relative to "now": a window missed while
//! the process was down is simply skipped, never caught up.


use chrono::{DateTime, Utc};
use cron::Schedule;
use std::str::FromStr as _;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use crate::error::{BridgeResult, Result, ScheduleError};
use crate::ops::Outcome;

/// Fixed back-off after a fault in the scheduling logic itself, to avoid a
/// tight failure spin.
pub const SCHEDULER_BACKOFF: Duration = Duration::from_secs(60);

/// Parse a cron expression.
///
/// Accepts the standard 5-field form (minute hour day-of-month month
/// day-of-week), the `cron` crate's native 6/7-field forms, and `@hourly`
/// style names.
///
/// # Errors
///
/// Returns a [`ScheduleError`] for malformed expressions, unknown `@names`,
/// and expressions that never fire again.
pub fn parse_schedule(expression: &str) -> BridgeResult<Schedule> {
    let trimmed = expression.trim();
    if trimmed.is_empty() {
        return Err(ScheduleError::InvalidExpression {
            expression: expression.to_string(),
            message: "expression is empty".to_string(),
        }
        .into());
    }

    let normalized = if trimmed.starts_with('@') {
        named_expression(trimmed)?.to_string()
    } else if trimmed.split_whitespace().count() == 5 {
        // The cron crate wants a leading seconds field.
        format!("0 {trimmed}")
    } else {
        trimmed.to_string()
    };

    let schedule =
        Schedule::from_str(&normalized).map_err(|e| ScheduleError::InvalidExpression {
            expression: trimmed.to_string(),
            message: e.to_string(),
        })?;

    if schedule.upcoming(Utc).next().is_none() {
        return Err(ScheduleError::NoUpcomingFire {
            expression: trimmed.to_string(),
        }
        .into());
    }

    Ok(schedule)
}

/// Map `@name` schedules to 6-field cron expressions.
fn named_expression(name: &str) -> std::result::Result<&'static str, ScheduleError> {
    match name.to_lowercase().as_str() {
        "@yearly" | "@annually" => Ok("0 0 0 1 1 *"),
        "@monthly" => Ok("0 0 0 1 * *"),
        "@weekly" => Ok("0 0 0 * * Sun"),
        "@daily" | "@midnight" => Ok("0 0 0 * * *"),
        "@hourly" => Ok("0 0 * * * *"),
        "@minutely" => Ok("0 * * * * *"),
        _ => Err(ScheduleError::UnknownNamedSchedule(name.to_string())),
    }
}

/// Next fire time strictly after `after`.
#[must_use]
pub fn next_fire(schedule: &Schedule, after: DateTime<Utc>) -> Option<DateTime<Utc>> {
    schedule.after(&after).next()
}

/// Run `job` on the schedule until the token is cancelled.
///
/// One failed run never terminates the loop: job errors and failure
/// outcomes are logged and swallowed. The loop blocks on the job, so a
/// long run delays but never overlaps the next tick.
pub async fn run_scheduled<F>(schedule: &Schedule, token: &CancellationToken, mut job: F)
where
    F: AsyncFnMut() -> Result<Outcome>,
{
    info!("entering scheduled loop");
    loop {
        if token.is_cancelled() {
            break;
        }

        let now = Utc::now();
        let Some(next) = next_fire(schedule, now) else {
            warn!(
                backoff_secs = SCHEDULER_BACKOFF.as_secs(),
                "no upcoming fire time, backing off"
            );
            if wait_or_cancelled(token, SCHEDULER_BACKOFF).await {
                break;
            }
            continue;
        };

        let wait = (next - now).to_std().unwrap_or(Duration::ZERO);
        debug!(next = %next, wait_secs = wait.as_secs(), "sleeping until next fire time");
        if wait_or_cancelled(token, wait).await {
            break;
        }

        match job().await {
            Ok(outcome) if outcome.ok() => {
                info!(message = outcome.message(), "scheduled run succeeded");
            }
            Ok(outcome) => {
                warn!(message = outcome.message(), "scheduled run failed");
            }
            Err(error) => {
                error!("scheduled run errored: {error:#}");
            }
        }
    }
    info!("scheduler loop stopped");
}

/// Sleep for `wait`, returning true if the token fired first.
async fn wait_or_cancelled(token: &CancellationToken, wait: Duration) -> bool {
    tokio::select! {
        () = token.cancelled() => true,
        () = tokio::time::sleep(wait) => false,
    }
}
