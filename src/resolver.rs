//! Name resolution pipeline.
//!
//! Coordinates prefix matching, the resolution cache, domain
//! validation, and the DNS TXT transport. Designed with trait-based
//! dependencies for testability.

use tracing::{debug, instrument};

use crate::cache::{MokaCache, ResolutionCache};
use crate::config::{Config, ConfigOverrides};
use crate::domain;
use crate::error::{Error, ResolveError, Result};
use crate::record;
use crate::transport::{HickoryTransport, TxtTransport};

/// Reserved subdomain under which NKN TXT records are published,
/// keeping them clear of the domain's own TXT usage.
pub const QUERY_PREFIX: &str = "_nkn.";

/// Resolves `DNS:`-prefixed names to NKN targets via DNS TXT records.
///
/// Immutable after construction except for cache contents; safe to
/// share across tasks and invoke concurrently. Concurrent misses for
/// the same domain may each query DNS and both write the cache (last
/// write wins), which is benign since both carry the same payload.
#[derive(Clone)]
pub struct Resolver<C = MokaCache, T = HickoryTransport>
where
    C: ResolutionCache,
    T: TxtTransport,
{
    config: Config,
    cache: C,
    transport: T,
}

impl Resolver {
    /// Create a resolver from partial configuration, filling unset
    /// fields from the defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] when the merged configuration is
    /// unusable. Resolution itself never reports config errors.
    pub fn new(overrides: ConfigOverrides) -> Result<Self> {
        Ok(Self::from_config(Config::merge(overrides)?))
    }

    /// Create a resolver from a complete configuration, e.g. one
    /// loaded via [`Config::load`].
    #[must_use]
    pub fn from_config(config: Config) -> Self {
        let cache = MokaCache::new(config.cache_ttl());
        let transport = HickoryTransport::new(config.dns_server, config.dial_timeout());
        Self::with_parts(config, cache, transport)
    }
}

impl<C, T> Resolver<C, T>
where
    C: ResolutionCache,
    T: TxtTransport,
{
    /// Create a resolver over explicit cache and transport instances.
    pub const fn with_parts(config: Config, cache: C, transport: T) -> Self {
        Self {
            config,
            cache,
            transport,
        }
    }

    /// The resolver's effective configuration.
    pub const fn config(&self) -> &Config {
        &self.config
    }

    /// Resolve an address of the form `<prefix><domain>`.
    ///
    /// Returns `Ok(None)` when `address` does not start with the
    /// configured prefix (case-insensitive): the address is simply not
    /// handled by this resolver, allowing callers to chain resolvers.
    /// All other outcomes are either the resolved target or an error.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidDomain`] when the stripped remainder fails DNS
    /// syntax rules (no network call is made), [`Error::ResolveFailed`]
    /// when the lookup fails, times out, or yields no usable record.
    #[instrument(skip(self, address), fields(domain))]
    pub async fn resolve(&self, address: &str) -> Result<Option<String>> {
        let Some(bare) = strip_prefix_ignore_case(address, &self.config.prefix) else {
            return Ok(None);
        };
        tracing::Span::current().record("domain", bare);

        if let Some(target) = self.cache.get(bare).await {
            debug!("cache hit");
            return Ok(Some(target));
        }

        if !domain::is_valid(bare) {
            return Err(Error::InvalidDomain(bare.to_owned()));
        }

        let name = format!("{QUERY_PREFIX}{bare}");
        debug!(%name, "cache miss, querying TXT records");

        let records = match self.config.dial_timeout() {
            Some(limit) => tokio::time::timeout(limit, self.transport.lookup_txt(&name))
                .await
                .map_err(|_| ResolveError::Timeout(limit))??,
            None => self.transport.lookup_txt(&name).await?,
        };

        // First record that parses wins, in DNS response order.
        for txt in &records {
            if let Ok(target) = record::parse(txt) {
                self.cache.insert(bare.to_owned(), target.clone()).await;
                debug!(%target, "resolved and cached");
                return Ok(Some(target));
            }
        }

        Err(ResolveError::NoRecord.into())
    }
}

/// Strip `prefix` from the start of `address`, comparing
/// case-insensitively; the remainder keeps its original case.
fn strip_prefix_ignore_case<'a>(address: &'a str, prefix: &str) -> Option<&'a str> {
    let head = address.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix)
        .then(|| &address[prefix.len()..])
}
