//! Verifier configuration.
//!
//! Every field has a default, so an empty TOML document is a valid
//! configuration:
//!
//! ```toml
//! target_ip = "185.158.133.1"
//! doh_endpoint = "https://dns.google/resolve"
//! query_timeout_secs = 8
//! max_ns_attempts = 5
//! ```

use std::net::Ipv4Addr;
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{DomainError, DomainResult};

/// Hosting IP that published apps are served from.
pub const DEFAULT_TARGET_IP: Ipv4Addr = Ipv4Addr::new(185, 158, 133, 1);
pub const DEFAULT_DOH_ENDPOINT: &str = "https://dns.google/resolve";
pub const DEFAULT_QUERY_TIMEOUT_SECS: u64 = 8;
pub const DEFAULT_MAX_NS_ATTEMPTS: usize = 5;

const MAX_QUERY_TIMEOUT_SECS: u64 = 60;
const MAX_NS_ATTEMPTS_LIMIT: usize = 10;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct VerifierConfig {
    /// Address customers must point their root and `www` A records at.
    pub target_ip: Ipv4Addr,
    /// JSON DoH resolver URL.
    pub doh_endpoint: String,
    /// Per-request timeout for DoH queries.
    pub query_timeout_secs: u64,
    /// How many names the NS walk-up may try, the domain itself included.
    pub max_ns_attempts: usize,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        Self {
            target_ip: DEFAULT_TARGET_IP,
            doh_endpoint: DEFAULT_DOH_ENDPOINT.to_string(),
            query_timeout_secs: DEFAULT_QUERY_TIMEOUT_SECS,
            max_ns_attempts: DEFAULT_MAX_NS_ATTEMPTS,
        }
    }
}

impl VerifierConfig {
    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.query_timeout_secs)
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> DomainResult<Self> {
        let config: Self =
            toml::from_str(s).map_err(|e| DomainError::Config(format!("Invalid config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: &Path) -> DomainResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DomainError::Config(format!("Failed to read {}: {e}", path.display()))
        })?;
        log::debug!("Loaded verifier config from {}", path.display());
        Self::from_toml_str(&content)
    }

    /// Replace the target IP from a textual override (e.g. an environment variable).
    pub fn with_target_ip_override(mut self, ip: &str) -> DomainResult<Self> {
        self.target_ip = ip
            .trim()
            .parse()
            .map_err(|_| DomainError::Config(format!("Invalid target IPv4 address: {ip}")))?;
        Ok(self)
    }

    pub fn validate(&self) -> DomainResult<()> {
        let endpoint = Url::parse(&self.doh_endpoint).map_err(|e| {
            DomainError::Config(format!("Invalid doh_endpoint {}: {e}", self.doh_endpoint))
        })?;
        if !matches!(endpoint.scheme(), "https" | "http") {
            return Err(DomainError::Config(format!(
                "doh_endpoint must be an http(s) URL, got {}",
                self.doh_endpoint
            )));
        }
        if !(1..=MAX_QUERY_TIMEOUT_SECS).contains(&self.query_timeout_secs) {
            return Err(DomainError::Config(format!(
                "query_timeout_secs must be between 1 and {MAX_QUERY_TIMEOUT_SECS} (got {})",
                self.query_timeout_secs
            )));
        }
        if !(1..=MAX_NS_ATTEMPTS_LIMIT).contains(&self.max_ns_attempts) {
            return Err(DomainError::Config(format!(
                "max_ns_attempts must be between 1 and {MAX_NS_ATTEMPTS_LIMIT} (got {})",
                self.max_ns_attempts
            )));
        }
        Ok(())
    }
}
