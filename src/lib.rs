//! Resolve `DNS:`-prefixed names to NKN addresses through DNS TXT records.
//!
//! Human-readable domains map onto NKN's non-human-readable client
//! addresses without a dedicated name service: the owner of a domain
//! publishes a TXT record `nkn=<target>` under the reserved `_nkn.`
//! subdomain, and this crate resolves `DNS:<domain>` to `<target>`,
//! caching successful lookups in memory.
//!
//! # Architecture
//!
//! The crate is organized into several modules:
//!
//! - [`config`]: Configuration defaults, merging, and file loading
//! - [`resolver`]: The resolution pipeline
//! - [`record`]: TXT record parsing and target normalization
//! - [`domain`]: Domain-name syntax validation
//! - [`cache`]: Resolved-target caching with TTL support
//! - [`transport`]: DNS TXT lookup transport
//! - [`error`]: Error types
//!
//! # Testing
//!
//! The cache and the DNS transport are trait-based abstractions, so
//! the pipeline can be exercised without network access by injecting
//! mock implementations through [`Resolver::with_parts`].
//!
//! ```rust
//! use nkn_dns_resolver::record;
//!
//! // TXT record targets are normalized before use.
//! assert_eq!(record::parse("nkn=/a/./b/../c").unwrap(), "/a/c");
//! assert!(record::parse("other=foo").is_err());
//! ```

pub mod cache;
pub mod config;
pub mod domain;
pub mod error;
pub mod record;
pub mod resolver;
pub mod transport;

pub use cache::{MokaCache, ResolutionCache};
pub use config::{Config, ConfigOverrides, DEFAULT_DIAL_TIMEOUT_MS, DEFAULT_PREFIX};
pub use error::{ConfigError, Error, ResolveError, Result};
pub use record::TXT_TAG;
pub use resolver::{QUERY_PREFIX, Resolver};
pub use transport::{HickoryTransport, TxtTransport};
