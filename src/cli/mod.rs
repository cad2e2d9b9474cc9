// gitbridge: Git Repository Synchronization Service
//
// SPDX-FileCopyrightText: 2026 gitbridge contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for gitbridge using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! gitbridge [global options] <command>
//! fetch
//! mirror [--force] [--strategy incremental|overwrite]
//! run [--mode fetch|mirror] [--schedule CRON]
//! options
//! version
//! ```

pub mod global;


use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::config::MirrorStrategy;
use crate::cli::global::GlobalOptions;

/// Git repository synchronization service.
///
/// Keeps local mirrors of two configured remotes up to date and can
/// replicate the source repository's full history into the target, once or
/// on a cron schedule.
#[derive(Debug, Parser)]
#[command(
    name = "gitbridge",
    author,
    version,
    about = "Git repository synchronization service",
    arg_required_else_help = true,
    after_help = "CONFIGURATION:\n\n\
                  Settings are read from an optional gitbridge.toml in the\n\
                  current directory, any files given with --config, and\n\
                  GITBRIDGE_* environment variables (nested keys separated\n\
                  by double underscores, e.g. GITBRIDGE_SOURCE__URL). Later\n\
                  sources override earlier ones."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Syncs both configured repositories into their local mirrors.
    Fetch,

    /// Replicates the source repository into the target repository.
    Mirror(MirrorArgs),

    /// Runs once or on a cron schedule, driven by flags or environment.
    Run(RunArgs),

    /// Lists all resolved settings, secrets masked.
    Options,

    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,
}

/// Replication strategy choice on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Push from a maintained local mirror; additive unless --force.
    Incremental,
    /// Fresh bare clone and unconditional mirror push.
    Overwrite,
}

impl From<StrategyArg> for MirrorStrategy {
    fn from(value: StrategyArg) -> Self {
        match value {
            StrategyArg::Incremental => Self::Incremental,
            StrategyArg::Overwrite => Self::Overwrite,
        }
    }
}

/// Operation selected for `run`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Sync both repositories.
    Fetch,
    /// Replicate source into target.
    Mirror,
}

/// Arguments for the mirror command.
#[derive(Debug, Args)]
pub struct MirrorArgs {
    /// Overwrite target history and prune refs absent from source.
    #[arg(long)]
    pub force: bool,

    /// Replication strategy; defaults to the mirror.strategy setting.
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,
}

/// Arguments for the run command.
#[derive(Debug, Args)]
pub struct RunArgs {
    /// Operation to run.
    #[arg(long, env = "MODE", default_value = "fetch", value_enum)]
    pub mode: ModeArg,

    /// Cron expression; when set, loop forever instead of running once.
    #[arg(long, env = "SCHEDULE", value_name = "CRON")]
    pub schedule: Option<String>,

    /// Overwrite target history when mode is mirror.
    #[arg(long)]
    pub force: bool,

    /// Replication strategy when mode is mirror.
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version
/// information was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
