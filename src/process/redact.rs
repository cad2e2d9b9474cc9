// gitbridge: Git Repository Synchronization Service
//
// SPDX-FileCopyrightText: 2026 gitbridge contributors
// SPDX-License-Identifier: GPL-3.0-or-later

//! Secret scrubbing for anything destined for logs or outcome messages.
//!
//! Two layers:
//! 1. Registered [`Secret`] values are replaced verbatim.
//! 2. Basic-auth credentials embedded in URLs (`scheme://user:secret@` or
//!    `scheme://secret@`) are replaced by pattern, catching credentials that
//!    arrive in output without having been registered.

use regex::Regex;
use std::sync::OnceLock;

use crate::config::Secret;
use crate::config::secret::MASK;

/// `scheme://user:password@` — mask the password, keep the user visible.
fn url_password() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?P<prefix>[a-zA-Z][a-zA-Z0-9+.-]*://[^/:@\s]+:)[^@\s]+@")
            .expect("static regex must compile")
    })
}

/// `scheme://token@` — a lone credential in the user position is a secret.
fn url_bare_credential() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?P<scheme>[a-zA-Z][a-zA-Z0-9+.-]*://)[^/:@\s]+@")
            .expect("static regex must compile")
    })
}

/// Replace any credentials embedded in URLs within `text`.
#[must_use]
pub fn scrub_url_credentials(text: &str) -> String {
    let pass_masked = url_password().replace_all(text, format!("${{prefix}}{MASK}@"));
    url_bare_credential()
        .replace_all(&pass_masked, format!("${{scheme}}{MASK}@"))
        .into_owned()
}

/// Scrubs registered secret values and embedded URL credentials.
pub(crate) struct Redactor {
    needles: Vec<String>,
}

impl Redactor {
    pub(crate) fn new<'a, I>(secrets: I) -> Self
    where
        I: IntoIterator<Item = &'a Secret>,
    {
        Self {
            needles: secrets
                .into_iter()
                .filter(|s| !s.is_empty())
                .map(|s| s.expose().to_string())
                .collect(),
        }
    }

    pub(crate) fn scrub(&self, text: &str) -> String {
        let mut out = text.to_string();
        for needle in &self.needles {
            out = out.replace(needle, MASK);
        }
        scrub_url_credentials(&out)
    }
}
