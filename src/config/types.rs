// gitbridge: Git Repository Synchronization Service
//
// SPDX-FileCopyrightText: 2026 gitbridge contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for gitbridge.
//!
//! # Settings Structure
//!
//! ```text
//! Settings: source/target RepoConfig, log_level, paths, mirror, timeout
//! RepoConfig: url + auth (none | ssh | pat | password) + credentials
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::PathBuf;

use crate::error::ConfigError;

use super::secret::Secret;

/// How to authenticate against a remote.
///
/// Unrecognized values degrade to [`AuthMode::None`] rather than failing:
/// a typo in the auth mode must not take the whole service down, it just
/// means unauthenticated access (which the remote may well reject, visibly).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthMode {
    /// Unauthenticated access.
    #[default]
    None,
    /// SSH private key, supplied as PEM text in the configuration.
    Ssh,
    /// Personal access token embedded in the remote URL.
    Pat,
    /// Username/password embedded in the remote URL.
    Password,
}

impl AuthMode {
    /// Parse an auth mode name. Never fails; unknown names degrade to `None`.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value.to_lowercase().as_str() {
            "ssh" => Self::Ssh,
            "pat" | "token" => Self::Pat,
            "password" | "basic" => Self::Password,
            _ => Self::None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Ssh => "ssh",
            Self::Pat => "pat",
            Self::Password => "password",
        }
    }
}

impl std::fmt::Display for AuthMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for AuthMode {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}

impl Serialize for AuthMode {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for AuthMode {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = String::deserialize(deserializer)?;
        Ok(Self::parse(&value))
    }
}

/// Configuration for one remote repository.
///
/// The `auth` mode fully determines which credential fields are consulted:
/// `pat`/`password` read `user` and `password`, `ssh` reads `ssh_key`,
/// `none` reads nothing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RepoConfig {
    /// Remote URL. An empty URL makes every operation on this repository
    /// fail with a reported outcome instead of a doomed network call.
    pub url: String,
    /// Authentication mode.
    pub auth: AuthMode,
    /// Username for token/password auth. Defaults to `oauth2` when unset.
    pub user: Option<String>,
    /// Password or personal access token.
    pub password: Option<Secret>,
    /// PEM-encoded SSH private key material.
    pub ssh_key: Option<Secret>,
}

impl RepoConfig {
    /// True if a non-blank URL is configured.
    #[must_use]
    pub fn has_url(&self) -> bool {
        !self.url.trim().is_empty()
    }
}

/// Filesystem layout for the local repository directories.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PathsConfig {
    /// Root directory holding the two local mirrors.
    pub data: PathBuf,
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            data: PathBuf::from("/data"),
        }
    }
}

impl PathsConfig {
    /// Local mirror of the source repository.
    #[must_use]
    pub fn source_dir(&self) -> PathBuf {
        self.data.join("source")
    }

    /// Local mirror of the target repository.
    #[must_use]
    pub fn target_dir(&self) -> PathBuf {
        self.data.join("target")
    }
}

/// How the mirror operation replicates source into target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MirrorStrategy {
    /// Keep a local mirror of both repositories and push from the source's
    /// local copy. Additive unless `--force`, which also prunes target refs
    /// absent from source.
    #[default]
    Incremental,
    /// Throw away the local source copy, re-clone it bare and force-push the
    /// whole ref set. Target ends up exactly matching source.
    Overwrite,
}

impl std::fmt::Display for MirrorStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Incremental => f.write_str("incremental"),
            Self::Overwrite => f.write_str("overwrite"),
        }
    }
}

impl std::str::FromStr for MirrorStrategy {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "incremental" => Ok(Self::Incremental),
            "overwrite" | "full" => Ok(Self::Overwrite),
            _ => Err(ConfigError::InvalidValue {
                key: "mirror.strategy".to_string(),
                message: format!("expected 'incremental' or 'overwrite', got '{s}'"),
            }),
        }
    }
}

/// Mirror operation settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MirrorConfig {
    /// Default replication strategy (overridable with `--strategy`).
    pub strategy: MirrorStrategy,
}
