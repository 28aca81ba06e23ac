//! TXT record parsing.
//!
//! NKN name records are published as DNS TXT values of the form
//! `nkn=<target>`. The target is a slash-separated, path-like address
//! string and is lexically normalized before being handed to callers,
//! so operator typos in zone files (`nkn=/a//b/./c`) cannot leak
//! through as distinct addresses.

use crate::error::{Error, Result};

/// TXT record parameter name.
pub const TXT_TAG: &str = "nkn";

/// Parse a TXT record value.
///
/// Splits `raw` on the first `=` and requires the left side to equal
/// [`TXT_TAG`] exactly. The right side is returned after lexical
/// normalization via [`clean`].
///
/// # Errors
///
/// Returns [`Error::InvalidRecord`] when the record does not follow
/// the `nkn=<target>` format.
pub fn parse(raw: &str) -> Result<String> {
    match raw.split_once('=') {
        Some((TXT_TAG, target)) => Ok(clean(target)),
        _ => Err(Error::InvalidRecord(raw.to_owned())),
    }
}

/// Lexically normalize a slash-separated path.
///
/// Collapses repeated separators, drops `.` segments, and resolves
/// `..` against the preceding segment. A leading `/` is preserved and
/// `..` segments cannot climb above it; in relative paths they are
/// kept at the front. An empty result normalizes to `"."`.
///
/// The operation is idempotent: `clean(&clean(p)) == clean(p)`.
#[must_use]
pub fn clean(path: &str) -> String {
    let rooted = path.starts_with('/');
    let mut segments: Vec<&str> = Vec::new();

    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                if segments.last().is_some_and(|s| *s != "..") {
                    segments.pop();
                } else if !rooted {
                    segments.push("..");
                }
            }
            _ => segments.push(segment),
        }
    }

    let joined = segments.join("/");
    match (rooted, joined.is_empty()) {
        (true, true) => "/".to_owned(),
        (true, false) => format!("/{joined}"),
        (false, true) => ".".to_owned(),
        (false, false) => joined,
    }
}
