//! Public types returned by verification operations.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::providers::Provider;

/// Record types the DoH client can query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DnsRecordType {
    /// IPv4 address record.
    A,
    /// IPv6 address record.
    Aaaa,
    /// Name server record.
    Ns,
    /// Text record.
    Txt,
    /// Canonical name (alias) record.
    Cname,
}

impl DnsRecordType {
    /// Numeric RR type as it appears in the `type` field of a DoH answer.
    pub const fn code(self) -> u16 {
        match self {
            Self::A => 1,
            Self::Ns => 2,
            Self::Cname => 5,
            Self::Txt => 16,
            Self::Aaaa => 28,
        }
    }
}

impl fmt::Display for DnsRecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::A => write!(f, "A"),
            Self::Aaaa => write!(f, "AAAA"),
            Self::Ns => write!(f, "NS"),
            Self::Txt => write!(f, "TXT"),
            Self::Cname => write!(f, "CNAME"),
        }
    }
}

impl FromStr for DnsRecordType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "A" => Ok(Self::A),
            "AAAA" => Ok(Self::Aaaa),
            "NS" => Ok(Self::Ns),
            "TXT" => Ok(Self::Txt),
            "CNAME" => Ok(Self::Cname),
            _ => Err(format!("Unsupported DNS query type: {s}")),
        }
    }
}

/// One entry of the `Answer` array in a JSON DoH response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsAnswer {
    /// Owner name, usually with a trailing dot.
    pub name: String,
    /// Numeric RR type.
    #[serde(rename = "type")]
    pub record_type: u16,
    /// Time-to-live in seconds.
    #[serde(rename = "TTL", default)]
    pub ttl: u32,
    /// Record data in presentation format.
    pub data: String,
}

/// JSON DoH response body (`application/dns-json`).
///
/// Fields beyond `Status` and `Answer` (`TC`, `RD`, `Question`, ...) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsResponse {
    /// DNS RCODE: 0 = NOERROR, 3 = NXDOMAIN.
    #[serde(rename = "Status")]
    pub status: u32,
    /// Absent on NXDOMAIN and on NOERROR/NODATA.
    #[serde(rename = "Answer", default)]
    pub answer: Vec<DnsAnswer>,
}

/// How much the provider classification can be trusted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    High,
    Medium,
    Low,
}

/// Provider classification before it is folded into a [`DomainInfo`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderInfo {
    pub provider: Provider,
    pub display_name: String,
    pub nameservers: Vec<String>,
    pub confidence: Confidence,
}

/// Outcome of [`DomainVerifier::verify_domain`](crate::DomainVerifier::verify_domain).
///
/// When `is_valid` is false, `provider` is `None` and `nameservers` is empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainInfo {
    /// Normalized domain (lowercase, no scheme, path or port).
    pub domain: String,
    pub is_valid: bool,
    pub provider: Option<Provider>,
    pub provider_display_name: String,
    /// Authoritative nameservers in answer order, duplicates removed.
    pub nameservers: Vec<String>,
    pub has_cloudflare: bool,
    pub can_auto_connect: bool,
    pub confidence: Confidence,
}

impl DomainInfo {
    /// Result for input that never reached DNS, or whose verification blew up.
    pub(crate) fn invalid(domain: String, display_name: &str, confidence: Confidence) -> Self {
        Self {
            domain,
            is_valid: false,
            provider: None,
            provider_display_name: display_name.to_string(),
            nameservers: Vec::new(),
            has_cloudflare: false,
            can_auto_connect: false,
            confidence,
        }
    }
}

/// Which of the expected records were found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordsFound {
    /// True only when both the root and the `www` A records are correct.
    pub a_record: bool,
    /// Not checked; reported true unless the DNS lookups failed outright.
    pub txt_record: bool,
}

/// The two A-record checks behind [`RecordsFound::a_record`], reported separately.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ARecordChecks {
    pub root: bool,
    pub www: bool,
}

/// Outcome of [`DomainVerifier::verify_dns_records`](crate::DomainVerifier::verify_dns_records).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    pub is_verified: bool,
    pub records_found: RecordsFound,
    pub a_record_checks: ARecordChecks,
    /// One human-readable message per failed check.
    pub errors: Vec<String>,
}

/// A DNS record the customer must create at their provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequiredRecord {
    pub record_type: DnsRecordType,
    /// Host label relative to the zone (`@` for the apex).
    pub host: String,
    pub value: String,
}
