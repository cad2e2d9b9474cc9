// gitbridge: Git Repository Synchronization Service
//
// SPDX-FileCopyrightText: 2026 gitbridge contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repository synchronization operations.
//!
//! ```text
//! fetch.rs   clone_or_fetch / fetch_all   keep local mirrors up to date
//! mirror.rs  mirror                       replicate source into target
//! ```
//!
//! Operations report [`Outcome`]s instead of escalating: an external command
//! failing is a normal, reportable event. Escalation (non-zero process exit,
//! or nothing at all under the scheduler) is the caller's decision.

pub mod fetch;
pub mod mirror;


/// Result of one operation: success flag plus a human-readable, already
/// redacted message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    ok: bool,
    message: String,
}

impl Outcome {
    /// A successful outcome.
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    /// A failed outcome.
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }

    /// Whether the operation succeeded.
    #[must_use]
    pub const fn ok(&self) -> bool {
        self.ok
    }

    /// The outcome message.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}
