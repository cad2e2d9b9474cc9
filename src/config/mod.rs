// gitbridge: Git Repository Synchronization Service
//
// SPDX-FileCopyrightText: 2026 gitbridge contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Settings management for gitbridge.
//!
//! # Settings Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. gitbridge.toml (cwd, optional)
//! 3. --config FILE (repeatable)
//! 4. GITBRIDGE_* env vars
//! 5. CLI overrides
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! GITBRIDGE_SOURCE__URL=https://...   → source.url
//! GITBRIDGE_SOURCE__AUTH=pat          → source.auth
//! GITBRIDGE_SOURCE__SSH_KEY=...       → source.ssh_key
//! GITBRIDGE_TARGET__PASSWORD=...      → target.password
//! GITBRIDGE_LOG_LEVEL=info            → log_level
//! GITBRIDGE_PATHS__DATA=/data         → paths.data
//! ```

pub mod loader;
pub mod secret;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::time::Duration;
use tracing::warn;

use crate::error::Result;
use crate::logging::LogLevel;

use loader::SettingsLoader;
pub use secret::Secret;
pub use types::{AuthMode, MirrorConfig, MirrorStrategy, PathsConfig, RepoConfig};

/// Default bound on a single external command, in seconds.
const DEFAULT_COMMAND_TIMEOUT_SECS: u64 = 3600;

/// Complete application settings.
///
/// Immutable once loaded; loaded once per process invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Source repository.
    pub source: RepoConfig,
    /// Target repository.
    pub target: RepoConfig,
    /// Log verbosity.
    pub log_level: LogLevel,
    /// Optional log file.
    pub log_file: Option<PathBuf>,
    /// Local directory layout.
    pub paths: PathsConfig,
    /// Mirror operation settings.
    pub mirror: MirrorConfig,
    /// Bound on a single external command in seconds; 0 disables the bound.
    pub command_timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            source: RepoConfig::default(),
            target: RepoConfig::default(),
            log_level: LogLevel::default(),
            log_file: None,
            paths: PathsConfig::default(),
            mirror: MirrorConfig::default(),
            command_timeout_secs: DEFAULT_COMMAND_TIMEOUT_SECS,
        }
    }
}

impl Settings {
    /// Create a new settings builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use gitbridge::config::Settings;
    ///
    /// let settings = Settings::builder()
    ///     .add_toml_file_optional("gitbridge.toml")
    ///     .with_env_prefix("GITBRIDGE")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> SettingsLoader {
        SettingsLoader::new()
    }

    /// Load settings from a single TOML file (simple API).
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML,
    /// or does not match the `Settings` structure.
    pub fn from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load settings from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match
    /// the `Settings` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Timeout applied to each external command, if any.
    #[must_use]
    pub const fn command_timeout(&self) -> Option<Duration> {
        if self.command_timeout_secs == 0 {
            None
        } else {
            Some(Duration::from_secs(self.command_timeout_secs))
        }
    }

    /// Log configuration problems that degrade behavior but do not stop the
    /// service. An empty URL or a missing credential is reported here and
    /// again, per run, as a failed operation outcome.
    pub fn validate(&self) {
        for (name, repo) in [("source", &self.source), ("target", &self.target)] {
            if !repo.has_url() {
                warn!(
                    repo = name,
                    "no url configured; operations on this repository will fail"
                );
            }
            match repo.auth {
                AuthMode::Pat | AuthMode::Password
                    if repo.password.as_ref().is_none_or(Secret::is_empty) =>
                {
                    warn!(
                        repo = name,
                        auth = %repo.auth,
                        "password/token missing, falling back to unauthenticated access"
                    );
                }
                AuthMode::Ssh if repo.ssh_key.as_ref().is_none_or(Secret::is_empty) => {
                    warn!(
                        repo = name,
                        auth = %repo.auth,
                        "ssh key missing, falling back to unauthenticated access"
                    );
                }
                _ => {}
            }
        }
    }

    /// Format settings for display.
    ///
    /// Returns a vector of formatted strings representing all options.
    /// Secrets are masked. Output is deterministically ordered.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();

        Self::format_repo_options("source", &self.source, &mut options);
        Self::format_repo_options("target", &self.target, &mut options);

        options.insert("log_level".to_string(), self.log_level.to_string());
        options.insert(
            "log_file".to_string(),
            self.log_file
                .as_ref()
                .map_or_else(String::new, |p| p.display().to_string()),
        );
        options.insert(
            "paths.data".to_string(),
            self.paths.data.display().to_string(),
        );
        options.insert(
            "mirror.strategy".to_string(),
            self.mirror.strategy.to_string(),
        );
        options.insert(
            "command_timeout_secs".to_string(),
            self.command_timeout_secs.to_string(),
        );

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_repo_options(
        name: &str,
        repo: &RepoConfig,
        options: &mut BTreeMap<String, String>,
    ) {
        options.insert(format!("{name}.url"), repo.url.clone());
        options.insert(format!("{name}.auth"), repo.auth.to_string());
        if let Some(user) = &repo.user {
            options.insert(format!("{name}.user"), user.clone());
        }
        if let Some(password) = &repo.password {
            // Secret's Display is the mask, never the value
            options.insert(format!("{name}.password"), password.to_string());
        }
        if let Some(key) = &repo.ssh_key {
            options.insert(format!("{name}.ssh_key"), key.to_string());
        }
    }
}
