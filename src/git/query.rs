// gitbridge: Git Repository Synchronization Service
//
// SPDX-FileCopyrightText: 2026 gitbridge contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Read-only repository checks via gix.

use std::path::Path;

/// Check whether `path` itself holds a local repository, bare or with a
/// working tree.
///
/// Deliberately `gix::open` and not `gix::discover`: a parent directory
/// being a repository must not make a stray subdirectory pass as one.
#[must_use]
pub fn is_repository(path: &Path) -> bool {
    path.is_dir() && gix::open(path).is_ok()
}
