// gitbridge: Git Repository Synchronization Service
//
// SPDX-FileCopyrightText: 2026 gitbridge contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Git plumbing.
//!
//! ```text
//! query.rs  read-only checks   --> gix (pure Rust, no subprocess)
//! cmd.rs    mutating commands  --> git CLI via CommandExecutor
//! ```

pub mod cmd;
pub mod query;
