//! DNS domain-name syntax validation.
//!
//! Checks generic hostname syntax only: label lengths and characters,
//! at least one dot-separated label pair, and not an IP literal. No
//! registry or public-suffix knowledge is involved, so overlay TLDs
//! such as `.nkn` validate like any other.

use std::net::IpAddr;

/// Maximum length of a full domain name, excluding the trailing dot.
const MAX_DOMAIN_LEN: usize = 253;

/// Maximum length of a single label.
const MAX_LABEL_LEN: usize = 63;

/// Check whether `domain` is a syntactically valid DNS domain name.
///
/// A single trailing dot (fully-qualified form) is accepted. IP
/// literals and single-label names are not domains for our purposes:
/// there is nothing to publish a `_nkn.` TXT record under.
#[must_use]
pub fn is_valid(domain: &str) -> bool {
    let name = domain.strip_suffix('.').unwrap_or(domain);

    if name.is_empty() || name.len() > MAX_DOMAIN_LEN {
        return false;
    }

    if name.parse::<IpAddr>().is_ok() {
        return false;
    }

    let mut labels = 0usize;
    let mut last = "";
    for label in name.split('.') {
        if !is_valid_label(label) {
            return false;
        }
        labels += 1;
        last = label;
    }

    // Require a label pair and a non-numeric top label, which also
    // rules out dotted-decimal forms that miss IpAddr parsing.
    labels >= 2 && !last.bytes().all(|b| b.is_ascii_digit())
}

fn is_valid_label(label: &str) -> bool {
    if label.is_empty() || label.len() > MAX_LABEL_LEN {
        return false;
    }

    if label.starts_with('-') || label.ends_with('-') {
        return false;
    }

    label
        .bytes()
        .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}
