//! # migrabook-domain
//!
//! Custom-domain verification for published MigraBook apps.
//!
//! Before a customer's own domain is attached to an app, this crate checks
//! three things over DNS-over-HTTPS:
//!
//! 1. the input is a syntactically valid domain (after stripping scheme,
//!    `www.`, path and port);
//! 2. which DNS provider runs the zone, by fingerprinting the authoritative
//!    nameservers (walking up to the parent zone for subdomains);
//! 3. whether the root and `www` A records point at the platform's hosting IP.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use migrabook_domain::{DomainVerifier, VerifierConfig};
//!
//! # async fn demo() -> migrabook_domain::DomainResult<()> {
//! let verifier = DomainVerifier::from_config(VerifierConfig::default())?;
//!
//! let info = verifier.verify_domain("https://www.mystore.com").await;
//! println!("{} via {}", info.domain, info.provider_display_name);
//!
//! let records = verifier.verify_dns_records("mystore.com").await;
//! if !records.is_verified {
//!     for error in &records.errors {
//!         eprintln!("{error}");
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! [`DomainVerifier`] operations always return a result value; lookup
//! failures are folded into it. [`DomainError`] only surfaces from
//! construction, configuration loading, and the lower-level helpers in
//! [`doh`] and [`resolver`].

mod config;
pub mod doh;
mod domain;
mod error;
mod notifier;
mod providers;
pub mod resolver;
mod types;
mod utils;
mod verifier;

#[cfg(test)]
mod test_utils;

pub use config::{
    DEFAULT_DOH_ENDPOINT, DEFAULT_MAX_NS_ATTEMPTS, DEFAULT_QUERY_TIMEOUT_SECS, DEFAULT_TARGET_IP,
    VerifierConfig,
};
pub use doh::{DnsQuery, DohClient};
pub use domain::{is_valid_domain, normalize_domain};
pub use error::{DomainError, DomainResult};
pub use notifier::{LogNotifier, Notification, NotificationLevel, Notifier};
pub use providers::{
    Provider, detect_provider_from_domain, detect_provider_from_ns, display_name_for,
};
pub use types::{
    ARecordChecks, Confidence, DnsAnswer, DnsRecordType, DnsResponse, DomainInfo, ProviderInfo,
    RecordsFound, RequiredRecord, VerificationResult,
};
pub use verifier::DomainVerifier;
