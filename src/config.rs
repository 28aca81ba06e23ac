//! Resolver configuration: defaults, file loading, and merging.

use std::net::SocketAddr;
use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use crate::error::{ConfigError, Result};

/// Default address prefix handled by the resolver.
pub const DEFAULT_PREFIX: &str = "DNS:";

/// Default dial timeout for DNS queries, in milliseconds.
pub const DEFAULT_DIAL_TIMEOUT_MS: u64 = 5000;

/// Resolver configuration, immutable after construction.
///
/// `Config::default()` returns a fresh value on every call, so the
/// defaults cannot be corrupted through a shared reference.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Address prefix, matched case-insensitively against input.
    #[serde(default = "default_prefix")]
    pub prefix: String,

    /// Cache lifetime for resolved targets, in seconds. 0 means
    /// entries never expire.
    #[serde(default)]
    pub cache_ttl_secs: u64,

    /// Dial timeout for DNS queries, in milliseconds. 0 disables the
    /// crate-level timeout and leaves the transport's own ambient
    /// timeout in charge.
    #[serde(default = "default_dial_timeout_ms")]
    pub dial_timeout_ms: u64,

    /// DNS server to route queries through instead of the system
    /// resolver configuration (e.g. "8.8.8.8:53"). None or an empty
    /// string selects the system default.
    #[serde(default, deserialize_with = "deserialize_dns_server")]
    pub dns_server: Option<SocketAddr>,
}

/// Partial configuration for programmatic construction.
///
/// Every `None` field falls back to the corresponding [`Config`]
/// default during [`Config::merge`]; every `Some` field wins,
/// including explicit zero sentinels such as `Some(0)` for
/// `dial_timeout_ms`.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub prefix: Option<String>,
    pub cache_ttl_secs: Option<u64>,
    pub dial_timeout_ms: Option<u64>,
    pub dns_server: Option<SocketAddr>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            cache_ttl_secs: 0,
            dial_timeout_ms: default_dial_timeout_ms(),
            dns_server: None,
        }
    }
}

fn default_prefix() -> String {
    DEFAULT_PREFIX.to_owned()
}

const fn default_dial_timeout_ms() -> u64 {
    DEFAULT_DIAL_TIMEOUT_MS
}

fn deserialize_dns_server<'de, D>(
    deserializer: D,
) -> std::result::Result<Option<SocketAddr>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = Option::<String>::deserialize(deserializer)?;
    match s.as_deref() {
        None | Some("") => Ok(None),
        Some(addr) => addr.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

impl Config {
    /// Merge partial overrides with the defaults, field by field.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the merged configuration is
    /// unusable (empty prefix). Surfaced at resolver construction,
    /// never at resolve time.
    pub fn merge(overrides: ConfigOverrides) -> Result<Self> {
        let defaults = Self::default();
        let merged = Self {
            prefix: overrides.prefix.unwrap_or(defaults.prefix),
            cache_ttl_secs: overrides.cache_ttl_secs.unwrap_or(defaults.cache_ttl_secs),
            dial_timeout_ms: overrides.dial_timeout_ms.unwrap_or(defaults.dial_timeout_ms),
            dns_server: overrides.dns_server.or(defaults.dns_server),
        };
        merged.validate()?;
        Ok(merged)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Cache entry lifetime; `None` means entries never expire.
    #[must_use]
    pub const fn cache_ttl(&self) -> Option<Duration> {
        match self.cache_ttl_secs {
            0 => None,
            secs => Some(Duration::from_secs(secs)),
        }
    }

    /// Dial timeout for DNS queries; `None` disables it.
    #[must_use]
    pub const fn dial_timeout(&self) -> Option<Duration> {
        match self.dial_timeout_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }

    /// Validate the configuration.
    fn validate(&self) -> Result<()> {
        if self.prefix.is_empty() {
            return Err(ConfigError::EmptyPrefix.into());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::{IpAddr, Ipv4Addr};

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.prefix, "DNS:");
        assert_eq!(config.cache_ttl_secs, 0);
        assert_eq!(config.dial_timeout_ms, 5000);
        assert!(config.dns_server.is_none());

        assert_eq!(config.cache_ttl(), None);
        assert_eq!(config.dial_timeout(), Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_default_returns_fresh_value() {
        let mut first = Config::default();
        first.prefix = "ETH:".to_owned();
        assert_eq!(first.prefix, "ETH:");
        assert_eq!(Config::default().prefix, "DNS:");
    }

    #[test]
    fn test_merge_empty_overrides_yields_defaults() {
        let merged = Config::merge(ConfigOverrides::default()).unwrap();
        assert_eq!(merged, Config::default());
    }

    #[test]
    fn test_merge_set_fields_win() {
        let overrides = ConfigOverrides {
            prefix: Some("ETH:".to_owned()),
            cache_ttl_secs: Some(60),
            dial_timeout_ms: None,
            dns_server: Some(SocketAddr::new(IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8)), 53)),
        };

        let merged = Config::merge(overrides).unwrap();
        assert_eq!(merged.prefix, "ETH:");
        assert_eq!(merged.cache_ttl_secs, 60);
        assert_eq!(merged.dial_timeout_ms, 5000);
        assert_eq!(merged.dns_server.unwrap().to_string(), "8.8.8.8:53");
    }

    #[test]
    fn test_merge_explicit_zero_timeout_survives() {
        let overrides = ConfigOverrides {
            dial_timeout_ms: Some(0),
            ..ConfigOverrides::default()
        };

        let merged = Config::merge(overrides).unwrap();
        assert_eq!(merged.dial_timeout(), None);
    }

    #[test]
    fn test_merge_empty_prefix_rejected() {
        let overrides = ConfigOverrides {
            prefix: Some(String::new()),
            ..ConfigOverrides::default()
        };

        assert!(Config::merge(overrides).is_err());
    }

    #[test]
    fn test_parse_valid_config() {
        let toml = r#"
            prefix = "DNS:"
            cache_ttl_secs = 600
            dial_timeout_ms = 1000
            dns_server = "1.1.1.1:53"
        "#;

        let config = Config::parse(toml).unwrap();
        assert_eq!(config.prefix, "DNS:");
        assert_eq!(config.cache_ttl_secs, 600);
        assert_eq!(config.dial_timeout_ms, 1000);
        assert_eq!(config.dns_server.unwrap().to_string(), "1.1.1.1:53");
    }

    #[test]
    fn test_parse_defaults_for_missing_fields() {
        let config = Config::parse("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_empty_dns_server_means_system_default() {
        let toml = r#"
            dns_server = ""
        "#;

        let config = Config::parse(toml).unwrap();
        assert!(config.dns_server.is_none());
    }

    #[test]
    fn test_parse_invalid_dns_server_rejected() {
        let toml = r#"
            dns_server = "not-an-address"
        "#;

        assert!(Config::parse(toml).is_err());
    }

    #[test]
    fn test_parse_empty_prefix_rejected() {
        let toml = r#"
            prefix = ""
        "#;

        assert!(Config::parse(toml).is_err());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let toml = r#"
            unknown_field = "value"
        "#;

        assert!(Config::parse(toml).is_err());
    }

    #[test]
    fn test_load_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "prefix = \"DNS:\"").unwrap();
        writeln!(file, "cache_ttl_secs = 30").unwrap();
        file.flush().unwrap();

        let config = Config::load(file.path()).unwrap();
        assert_eq!(config.cache_ttl_secs, 30);
    }
}
