// gitbridge: Git Repository Synchronization Service
//
// SPDX-FileCopyrightText: 2026 gitbridge contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Scripted command executor for unit tests.
//!
//! Records every invocation and answers with scripted results: a stub is
//! consumed by the first request whose argument list contains its pattern;
//! everything else gets a default success.

use std::path::PathBuf;
use std::sync::Mutex;

use crate::error::Result;

use super::{CommandExecutor, CommandRequest, CommandResult};

/// One recorded invocation.
#[derive(Debug, Clone)]
pub(crate) struct RecordedCall {
    pub(crate) program: String,
    pub(crate) args: Vec<String>,
    pub(crate) cwd: Option<PathBuf>,
    pub(crate) env: Vec<(String, String)>,
}

impl RecordedCall {
    /// The argument list joined with spaces, for substring assertions.
    pub(crate) fn arg_line(&self) -> String {
        self.args.join(" ")
    }
}

/// Test double that records invocations and returns scripted results.
#[derive(Default)]
pub(crate) struct ScriptedExecutor {
    stubs: Mutex<Vec<(String, CommandResult)>>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl ScriptedExecutor {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Script a result for the next request whose joined argument list
    /// contains `pattern`. Each stub is consumed once.
    pub(crate) fn stub(&self, pattern: &str, result: CommandResult) {
        self.stubs
            .lock()
            .expect("stub lock")
            .push((pattern.to_string(), result));
    }

    pub(crate) fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().expect("calls lock").clone()
    }
}

impl CommandExecutor for ScriptedExecutor {
    async fn run(&self, request: CommandRequest) -> Result<CommandResult> {
        let call = RecordedCall {
            program: request.program().to_string(),
            args: request.args_slice().to_vec(),
            cwd: request.working_dir().cloned(),
            env: request.env_vars().to_vec(),
        };
        let arg_line = call.arg_line();
        self.calls.lock().expect("calls lock").push(call);

        let mut stubs = self.stubs.lock().expect("stub lock");
        if let Some(index) = stubs.iter().position(|(pattern, _)| arg_line.contains(pattern)) {
            let (_, result) = stubs.remove(index);
            return Ok(result);
        }
        Ok(CommandResult::new(0, String::new(), String::new()))
    }
}
