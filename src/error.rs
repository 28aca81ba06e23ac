//! Error types for the NKN DNS resolver.

use std::io;
use std::time::Duration;

use thiserror::Error;

/// Main error type for resolver operations.
#[derive(Debug, Error)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// The address remainder after prefix stripping is not a valid
    /// DNS domain name. Returned before any network access.
    #[error("not a valid domain name: {0:?}")]
    InvalidDomain(String),

    /// A TXT record value does not follow the `nkn=<target>` format.
    ///
    /// Never returned by [`Resolver::resolve`](crate::Resolver::resolve)
    /// directly; a record failing to parse is skipped in favor of the
    /// next one.
    #[error("not a valid record entry: {0:?}")]
    InvalidRecord(String),

    /// The DNS lookup failed, or no returned TXT record was usable.
    #[error("record resolution failed: {0}")]
    ResolveFailed(#[from] ResolveError),
}

/// Configuration-related errors, surfaced at construction time only.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    ReadFile(#[source] io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),

    #[error("prefix cannot be empty")]
    EmptyPrefix,
}

/// Causes of a failed resolution, wrapped by [`Error::ResolveFailed`].
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("DNS lookup failed: {0}")]
    Lookup(#[from] hickory_resolver::ResolveError),

    #[error("DNS lookup timed out after {0:?}")]
    Timeout(Duration),

    /// The lookup succeeded but no record matched the expected format.
    #[error("no usable TXT record")]
    NoRecord,

    #[error("transport error: {0}")]
    Transport(String),
}

/// Result type alias using our Error.
pub type Result<T> = std::result::Result<T, Error>;
