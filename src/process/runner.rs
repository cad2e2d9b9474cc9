// gitbridge: Git Repository Synchronization Service
//
// SPDX-FileCopyrightText: 2026 gitbridge contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Process execution.
//!
//! ```text
//! run(request)
//!      |
//!      v
//! resolve program (which, cached)
//!      |
//!      v
//! tokio Command: args, cwd, env augmentation, stdin null,
//! GIT_TERMINAL_PROMPT=0, GCM_INTERACTIVE=never, kill_on_drop
//!      |
//!      v
//! output() [bounded by timeout]
//!      |
//!      v
//! redact stdout/stderr --> CommandResult
//! ```

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::process::Stdio;
use std::sync::{OnceLock, RwLock};
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, trace, warn};

use crate::error::{CommandError, Result};

use super::redact::Redactor;
use super::{CommandExecutor, CommandRequest, CommandResult, RunFlags};

/// Static cache for executable paths resolved via `which`.
static EXECUTABLE_CACHE: OnceLock<RwLock<BTreeMap<String, PathBuf>>> = OnceLock::new();

/// Get the executable cache, initializing if needed.
fn exe_cache() -> &'static RwLock<BTreeMap<String, PathBuf>> {
    EXECUTABLE_CACHE.get_or_init(|| RwLock::new(BTreeMap::new()))
}

/// Resolve a program name via PATH, with caching.
fn resolve_program(program: &str) -> Result<PathBuf> {
    {
        let cache = exe_cache()
            .read()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        if let Some(path) = cache.get(program) {
            return Ok(path.clone());
        }
    }

    let path = which::which(program).map_err(|_| CommandError::ExecutableNotFound {
        name: program.to_string(),
    })?;

    {
        let mut cache = exe_cache()
            .write()
            .unwrap_or_else(std::sync::PoisonError::into_inner);
        cache.insert(program.to_string(), path.clone());
    }
    Ok(path)
}

/// The real command runner: spawns the external program and waits for it.
///
/// External commands are blocking from the caller's perspective; the calling
/// task suspends until the process exits or the timeout fires.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessExecutor {
    default_timeout: Option<Duration>,
}

impl ProcessExecutor {
    /// Creates an executor. `default_timeout` bounds every command that does
    /// not carry its own timeout; `None` leaves commands unbounded.
    #[must_use]
    pub const fn new(default_timeout: Option<Duration>) -> Self {
        Self { default_timeout }
    }

    fn build_command(program: &PathBuf, request: &CommandRequest) -> Command {
        let mut command = Command::new(program);
        command.args(request.args_slice());

        if let Some(cwd) = request.working_dir() {
            command.current_dir(cwd);
        }

        // Augment, don't replace: ssh needs PATH and HOME from the parent.
        for (key, value) in request.env_vars() {
            command.env(key, value);
        }
        command.env("GIT_TERMINAL_PROMPT", "0");
        command.env("GCM_INTERACTIVE", "never");

        command.stdin(Stdio::null());
        command.stdout(Stdio::piped());
        command.stderr(Stdio::piped());
        command.kill_on_drop(true);

        command
    }
}

impl CommandExecutor for ProcessExecutor {
    async fn run(&self, request: CommandRequest) -> Result<CommandResult> {
        let name = request.display_name();
        let cmd_line = request.command_line();

        if let Some(cwd) = request.working_dir() {
            debug!(cwd = %cwd.display(), "cd");
        }
        debug!(cmd = %cmd_line, "exec");

        let program = resolve_program(request.program())?;
        let mut command = Self::build_command(&program, &request);

        let timeout = request.timeout_duration().or(self.default_timeout);
        let output = match timeout {
            Some(limit) => match tokio::time::timeout(limit, command.output()).await {
                Ok(output) => output,
                Err(_) => {
                    warn!(process = %name, timeout_secs = limit.as_secs(), "process timed out");
                    return Err(CommandError::Timeout {
                        command: name,
                        timeout_secs: limit.as_secs(),
                    }
                    .into());
                }
            },
            None => command.output().await,
        };
        let output = output.map_err(|source| CommandError::SpawnFailed {
            command: cmd_line.clone(),
            source,
        })?;

        let redactor = Redactor::new(request.secret_values());
        let exit_code = output.status.code().unwrap_or(-1);
        let stdout = redactor.scrub(String::from_utf8_lossy(&output.stdout).trim_end());
        let stderr = redactor.scrub(String::from_utf8_lossy(&output.stderr).trim_end());
        let mut result = CommandResult::new(exit_code, stdout, stderr);

        if result.success() {
            trace!(process = %name, exit_code, "completed");
            if !result.stdout().is_empty() {
                trace!(process = %name, stdout = %result.stdout(), "output");
            }
        } else if request
            .run_flags()
            .contains(RunFlags::SUPPRESS_OUTPUT_ON_FAILURE)
        {
            // Stricter mode for credential-touching commands: the captured
            // text never leaves the runner at all.
            warn!(process = %name, exit_code, "process failed (output suppressed)");
            result = CommandResult::new(exit_code, String::new(), String::new());
        } else {
            warn!(process = %name, exit_code, stderr = %result.stderr(), "process failed");
        }

        Ok(result)
    }
}
