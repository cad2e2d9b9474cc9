// gitbridge: Git Repository Synchronization Service
//
// SPDX-FileCopyrightText: 2026 gitbridge contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Library root.
//!
//! # Crate Architecture
//!
//! ```text
//!                        main.rs
//!                           |
//!                +----------+----------+
//!                v                     v
//!             cli (clap)          cmd (handlers)
//!                |            fetch / mirror / run
//!                +----------+----------+
//!                           v
//!              ,---------------------------,
//!              |         config            |
//!              |  TOML + env, Secret type  |
//!              '--+-----------+--------+---'
//!                 |           |        |
//!                 v           v        v
//!               ops       scheduler  credentials
//!           fetch/mirror  cron loop  locators/keys
//!                 |
//!            +----+----+
//!            v         v
//!           git     process
//!        gix/CLI   executor, redaction
//!
//!   +-----------------------------------------+
//!   |  foundation       error, logging        |
//!   +-----------------------------------------+
//! ```

pub mod cli;
pub mod cmd;
pub mod config;
pub mod credentials;
pub mod error;
pub mod git;
pub mod logging;
pub mod ops;
pub mod process;
pub mod scheduler;
