// gitbridge: Git Repository Synchronization Service
//
// SPDX-FileCopyrightText: 2026 gitbridge contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command handlers.
//!
//! Each handler drives an operation and maps its [`Outcome`](crate::ops::Outcome)
//! to the process contract: a failed one-shot run becomes a non-zero exit,
//! while the scheduled loop in `run` swallows failures and keeps going.

pub mod fetch;
pub mod mirror;
pub mod run;

use crate::config::Settings;
use crate::process::ProcessExecutor;

/// Build the command runner used by every operation in this invocation.
pub(crate) fn build_executor(settings: &Settings) -> ProcessExecutor {
    ProcessExecutor::new(settings.command_timeout())
}
