// gitbridge: Git Repository Synchronization Service
//
// SPDX-FileCopyrightText: 2026 gitbridge contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!            BridgeError
//!                 |
//!     +------+----+-----+--------+
//!     |      |          |        |
//!     v      v          v        v
//!   Config Credential Command Schedule
//!    Box     Box        Box      Box
//!
//! Sub-errors (unboxed internally):
//!   Config     InvalidValue
//!   Credential KeyFile, KeyFilePermissions
//!   Command    ExecutableNotFound, SpawnFailed, Timeout
//!   Schedule   InvalidExpression, UnknownNamedSchedule, NoUpcomingFire
//!
//! All variants boxed => BridgeError stays small on the stack.
//! ```

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`BridgeError`].
pub type BridgeResult<T> = std::result::Result<T, BridgeError>;

/// Top-level application error type.
///
/// All sub-errors are boxed to keep this enum small on the stack.
#[derive(Debug, Error)]
pub enum BridgeError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(#[from] Box<ConfigError>),

    /// Credential resolution failed.
    #[error("credential error: {0}")]
    Credential(#[from] Box<CredentialError>),

    /// External command execution failed (runner fault, not a non-zero exit).
    #[error("command error: {0}")]
    Command(#[from] Box<CommandError>),

    /// Cron schedule error.
    #[error("schedule error: {0}")]
    Schedule(#[from] Box<ScheduleError>),
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for BridgeError {
                fn from(err: $error) -> Self {
                    BridgeError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    ConfigError => Config,
    CredentialError => Credential,
    CommandError => Command,
    ScheduleError => Schedule,
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("invalid value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

// --- Credential Errors ---

/// Credential resolution errors.
///
/// Authentication *failures* against a remote are not in here: those show up
/// as non-zero exits from git and are reported as operation outcomes.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// Failed to write private key material to a temporary file.
    #[error("failed to write ssh key file: {0}")]
    KeyFile(#[source] std::io::Error),

    /// Failed to restrict the key file to owner-only access.
    #[error("failed to restrict ssh key file permissions: {0}")]
    KeyFilePermissions(#[source] std::io::Error),
}

// --- Command Errors ---

/// Command runner faults.
///
/// A non-zero exit from the invoked program is *not* an error; it is a normal
/// reportable outcome carried in a `CommandResult`.
#[derive(Debug, Error)]
pub enum CommandError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process timed out.
    #[error("process '{command}' timed out after {timeout_secs} seconds")]
    Timeout { command: String, timeout_secs: u64 },
}

// --- Schedule Errors ---

/// Cron schedule errors.
#[derive(Debug, Error)]
pub enum ScheduleError {
    /// The cron expression could not be parsed.
    #[error("invalid cron expression '{expression}': {message}")]
    InvalidExpression { expression: String, message: String },

    /// An `@name` schedule that is not recognized.
    #[error(
        "unknown named schedule '{0}'. Valid options: @yearly, @monthly, @weekly, @daily, @hourly, @minutely"
    )]
    UnknownNamedSchedule(String),

    /// The expression parsed but never fires again.
    #[error("cron expression '{expression}' has no upcoming fire time")]
    NoUpcomingFire { expression: String },
}
