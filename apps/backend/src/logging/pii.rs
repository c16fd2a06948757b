//! Redaction helpers for log fields.
//!
//! Identity-provider subjects, emails and bearer tokens must never reach the
//! log stream verbatim. Wrap them in [`Redacted`] (free text) or pass them
//! through [`redact_sub`] (subjects) before handing them to `tracing`.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

#[allow(clippy::unwrap_used)]
static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{1,}\b").unwrap());

// JWTs: three base64url segments separated by dots
#[allow(clippy::unwrap_used)]
static JWT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\beyJ[A-Za-z0-9_-]+\.[A-Za-z0-9_-]+\.[A-Za-z0-9_-]*").unwrap()
});

#[allow(clippy::unwrap_used)]
static OPAQUE_TOKEN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Za-z0-9+/_-]{24,}={0,2}").unwrap());

/// Mask emails (first character of the local part kept) and token-like runs.
pub fn redact(input: &str) -> String {
    let masked = EMAIL.replace_all(input, |caps: &regex::Captures| {
        let full = &caps[0];
        match full.split_once('@') {
            Some((local, domain)) if !local.is_empty() => {
                format!("{}***@{domain}", &local[..1])
            }
            _ => full.to_string(),
        }
    });
    let masked = JWT.replace_all(&masked, "[REDACTED_JWT]");
    OPAQUE_TOKEN
        .replace_all(&masked, "[REDACTED_TOKEN]")
        .into_owned()
}

/// Keep the first four characters of an identity subject.
pub fn redact_sub(sub: &str) -> String {
    let prefix: String = sub.chars().take(4).collect();
    if prefix.chars().count() == sub.chars().count() {
        "*".repeat(prefix.chars().count())
    } else {
        format!("{prefix}***")
    }
}

/// Display wrapper applying [`redact`] when formatted.
pub struct Redacted<'a>(pub &'a str);

impl fmt::Display for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}

impl fmt::Debug for Redacted<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&redact(self.0))
    }
}
