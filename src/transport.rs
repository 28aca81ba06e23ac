//! DNS TXT transport trait and implementations.
//!
//! Resolution of the `_nkn.` query name is abstracted behind a trait
//! so tests can substitute deterministic fakes returning canned TXT
//! records or simulated delays instead of depending on real DNS.

use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use hickory_resolver::config::{NameServerConfig, ResolverConfig};
use hickory_resolver::name_server::TokioConnectionProvider;
use hickory_resolver::proto::xfer::Protocol;
use hickory_resolver::TokioResolver;
use tracing::warn;

use crate::error::{ResolveError, Result};

/// Trait for DNS TXT lookups.
///
/// Implementations must return the textual content of each TXT record
/// in the order the DNS response carried them; the caller picks the
/// first record that parses, so reordering would change results.
pub trait TxtTransport: Send + Sync + Clone + 'static {
    /// Look up the TXT records published at `name`.
    fn lookup_txt(&self, name: &str) -> impl Future<Output = Result<Vec<String>>> + Send;
}

/// Production TXT transport backed by hickory-resolver.
///
/// Uses the system resolver configuration unless an explicit upstream
/// server is given, in which case queries go to that server over UDP.
#[derive(Clone)]
pub struct HickoryTransport {
    resolver: TokioResolver,
}

impl HickoryTransport {
    /// Create a new transport.
    ///
    /// `dns_server` of `None` selects the system configuration;
    /// `timeout` of `None` keeps hickory's ambient per-request timeout.
    #[must_use]
    pub fn new(dns_server: Option<SocketAddr>, timeout: Option<Duration>) -> Self {
        let mut builder = match dns_server {
            Some(addr) => {
                let name_server = NameServerConfig::new(addr, Protocol::Udp);
                let config = ResolverConfig::from_parts(None, vec![], vec![name_server]);
                TokioResolver::builder_with_config(config, TokioConnectionProvider::default())
            }
            None => match TokioResolver::builder_tokio() {
                Ok(builder) => builder,
                Err(e) => {
                    warn!(error = %e, "failed to read system DNS config, using defaults");
                    TokioResolver::builder_with_config(
                        ResolverConfig::default(),
                        TokioConnectionProvider::default(),
                    )
                }
            },
        };

        if let Some(timeout) = timeout {
            builder.options_mut().timeout = timeout;
        }
        // Resolved targets are cached by the crate, keyed by domain;
        // a second record-level cache underneath would serve stale
        // records past that cache's expiry.
        builder.options_mut().cache_size = 0;

        Self {
            resolver: builder.build(),
        }
    }
}

impl TxtTransport for HickoryTransport {
    async fn lookup_txt(&self, name: &str) -> Result<Vec<String>> {
        let lookup = self
            .resolver
            .txt_lookup(name)
            .await
            .map_err(ResolveError::Lookup)?;

        Ok(lookup
            .iter()
            .map(|txt| {
                txt.txt_data()
                    .iter()
                    .map(|part| String::from_utf8_lossy(part))
                    .collect::<String>()
            })
            .collect())
    }
}
