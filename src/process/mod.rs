// gitbridge: Git Repository Synchronization Service
//
// SPDX-FileCopyrightText: 2026 gitbridge contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! External command execution.
//!
//! ```text
//! CommandRequest
//!  • program/args/cwd/env/secrets/flags/timeout/name
//!        |
//!        v
//! CommandExecutor::run()  (ProcessExecutor, or a scripted double in tests)
//!        |
//!        v
//! CommandResult { exit_code, stdout, stderr }
//!
//! A non-zero exit is a normal reportable outcome, never an Err.
//! Everything in the result and in the runner's log lines has already
//! passed through redaction.
//! ```

pub mod redact;
mod runner;

#[cfg(test)]
pub(crate) mod testing;
#[cfg(test)]
mod tests;

pub use runner::ProcessExecutor;

use bitflags::bitflags;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::config::Secret;
use crate::error::Result;

use redact::Redactor;

bitflags! {
    /// Flags controlling command execution behavior.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct RunFlags: u32 {
        /// On failure, strip captured output entirely instead of logging the
        /// redacted text. For commands known to touch credentials (pushes).
        const SUPPRESS_OUTPUT_ON_FAILURE = 0x01;
    }
}

/// One external command to run.
///
/// Built with chained setters, consumed by a [`CommandExecutor`].
#[derive(Debug, Clone)]
pub struct CommandRequest {
    program: String,
    args: Vec<String>,
    cwd: Option<PathBuf>,
    env: Vec<(String, String)>,
    secrets: Vec<Secret>,
    flags: RunFlags,
    timeout: Option<Duration>,
    name: Option<String>,
}

impl CommandRequest {
    /// Creates a new request for the given program.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: None,
            env: Vec::new(),
            secrets: Vec::new(),
            flags: RunFlags::empty(),
            timeout: None,
            name: None,
        }
    }

    /// Adds an argument.
    #[must_use]
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Adds multiple arguments.
    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Sets the working directory.
    #[must_use]
    pub fn cwd(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Augments the command environment with one variable.
    #[must_use]
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.env.push((key.into(), value.into()));
        self
    }

    /// Augments the command environment with several variables.
    #[must_use]
    pub fn envs<'a, I>(mut self, vars: I) -> Self
    where
        I: IntoIterator<Item = &'a (String, String)>,
    {
        self.env.extend(vars.into_iter().cloned());
        self
    }

    /// Registers a secret value the runner must scrub from any output.
    #[must_use]
    pub fn secret(mut self, secret: Secret) -> Self {
        self.secrets.push(secret);
        self
    }

    /// Registers several secrets.
    #[must_use]
    pub fn secrets<'a, I>(mut self, secrets: I) -> Self
    where
        I: IntoIterator<Item = &'a Secret>,
    {
        self.secrets.extend(secrets.into_iter().cloned());
        self
    }

    /// Sets run flags.
    #[must_use]
    pub const fn flags(mut self, flags: RunFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Bounds the command's wall-clock time.
    #[must_use]
    pub const fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Sets a display name for logging.
    #[must_use]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    // Getters for field access within the crate

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    pub(crate) fn args_slice(&self) -> &[String] {
        &self.args
    }

    pub(crate) const fn working_dir(&self) -> Option<&PathBuf> {
        self.cwd.as_ref()
    }

    pub(crate) fn env_vars(&self) -> &[(String, String)] {
        &self.env
    }

    pub(crate) fn secret_values(&self) -> &[Secret] {
        &self.secrets
    }

    pub(crate) const fn run_flags(&self) -> RunFlags {
        self.flags
    }

    pub(crate) const fn timeout_duration(&self) -> Option<Duration> {
        self.timeout
    }

    /// Display name for log lines: the override, or the program name.
    #[must_use]
    pub fn display_name(&self) -> String {
        self.name
            .clone()
            .unwrap_or_else(|| self.program.clone())
    }

    /// Full command line with secrets scrubbed, safe for logging.
    #[must_use]
    pub fn command_line(&self) -> String {
        let mut cmd = self.program.clone();
        for arg in &self.args {
            if arg.contains(' ') {
                use std::fmt::Write as _;
                let _ = write!(cmd, " \"{arg}\"");
            } else {
                use std::fmt::Write as _;
                let _ = write!(cmd, " {arg}");
            }
        }
        Redactor::new(&self.secrets).scrub(&cmd)
    }
}

/// Outcome of one external command.
///
/// Ephemeral; not persisted. Stored stdout/stderr are already redacted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandResult {
    exit_code: i32,
    stdout: String,
    stderr: String,
}

impl CommandResult {
    /// Creates a new `CommandResult`.
    #[must_use]
    pub const fn new(exit_code: i32, stdout: String, stderr: String) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
        }
    }

    /// The process exit code (0 = success).
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.exit_code
    }

    /// Captured stdout, redacted.
    #[must_use]
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    /// Captured stderr, redacted.
    #[must_use]
    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    /// True if the process exited successfully (code 0).
    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// Injectable command execution capability.
///
/// [`ProcessExecutor`] is the real implementation; tests substitute a
/// scripted double that records invocations.
///
/// `run` returns `Err` only for runner faults (spawn failure, timeout,
/// missing executable). A non-zero exit from the invoked program is an
/// `Ok(CommandResult)` with `success() == false`.
pub trait CommandExecutor: Send + Sync {
    fn run(&self, request: CommandRequest) -> impl Future<Output = Result<CommandResult>> + Send;
}
