// gitbridge: Git Repository Synchronization Service
//
// SPDX-FileCopyrightText: 2026 gitbridge contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Settings --> Logging --> Command Dispatch
//!   Fetch | Mirror | Run | Options | Version
//! ```

use std::process::ExitCode;

use gitbridge::cli::{self, Cli, Command};
use gitbridge::cli::global::GlobalOptions;
use gitbridge::cmd::fetch::run_fetch_command;
use gitbridge::cmd::mirror::run_mirror_command;
use gitbridge::cmd::run::run_run_command;
use gitbridge::config::Settings;
use gitbridge::logging::{LogConfig, init_logging};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();

    let settings = match load_settings(&cli.global) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Failed to load settings: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let log_config = build_log_config(&cli.global, &settings);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    settings.validate();

    dispatch_command(&cli, &settings).await
}

fn load_settings(global: &GlobalOptions) -> gitbridge::error::Result<Settings> {
    let mut loader = Settings::builder().add_toml_file_optional("gitbridge.toml");
    for path in &global.configs {
        loader = loader.add_toml_file(path);
    }
    let mut settings = loader.with_env_prefix("GITBRIDGE").build()?;
    if let Some(dir) = &global.data_dir {
        settings.paths.data.clone_from(dir);
    }
    Ok(settings)
}

fn build_log_config(global: &GlobalOptions, settings: &Settings) -> LogConfig {
    let console_level = global.log_level.unwrap_or(settings.log_level);
    let log_file = global
        .log_file
        .as_ref()
        .or(settings.log_file.as_ref())
        .map(|p| p.display().to_string());

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(console_level)
        .maybe_with_log_file(log_file)
        .build()
}

async fn dispatch_command(cli: &Cli, settings: &Settings) -> ExitCode {
    let result = match &cli.command {
        Command::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Command::Options => {
            for line in settings.format_options() {
                println!("{line}");
            }
            Ok(())
        }
        Command::Fetch => run_fetch_command(settings).await,
        Command::Mirror(args) => run_mirror_command(args, settings).await,
        Command::Run(args) => run_run_command(args, settings).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
