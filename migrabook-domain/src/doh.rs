//! DNS-over-HTTPS client (JSON API, as served by `dns.google/resolve`).
//!
//! [`DnsQuery`] is the seam the rest of the crate talks to; [`DohClient`] is
//! the production implementation. The record helpers on top of it
//! (`get_ns_records`, `get_a_records`, `has_a_record_pointing_to`) work with
//! any implementation, which is how the tests drive them.

use std::net::Ipv4Addr;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use url::Url;

use crate::config::VerifierConfig;
use crate::error::{DomainError, DomainResult};
use crate::types::{DnsRecordType, DnsResponse};
use crate::utils::log_sanitizer::truncate_for_log;

/// Media type for the JSON flavour of DoH.
const DNS_JSON: &str = "application/dns-json";

/// Issues a single DNS question and returns the parsed answer set.
#[async_trait]
pub trait DnsQuery: Send + Sync {
    async fn query(&self, name: &str, record_type: DnsRecordType) -> DomainResult<DnsResponse>;
}

/// [`DnsQuery`] over HTTPS using the resolver's JSON API.
#[derive(Debug, Clone)]
pub struct DohClient {
    client: Client,
    endpoint: Url,
    timeout: Duration,
}

impl DohClient {
    pub fn new(endpoint: &str, timeout: Duration) -> DomainResult<Self> {
        let endpoint = Url::parse(endpoint)
            .map_err(|e| DomainError::Config(format!("Invalid DoH endpoint {endpoint}: {e}")))?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| DomainError::Config(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            endpoint,
            timeout,
        })
    }

    pub fn from_config(config: &VerifierConfig) -> DomainResult<Self> {
        Self::new(&config.doh_endpoint, config.query_timeout())
    }

    /// Resolver URL for one question.
    fn query_url(&self, name: &str, record_type: DnsRecordType) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("name", name)
            .append_pair("type", &record_type.to_string());
        url
    }
}

#[async_trait]
impl DnsQuery for DohClient {
    async fn query(&self, name: &str, record_type: DnsRecordType) -> DomainResult<DnsResponse> {
        let url = self.query_url(name, record_type);
        log::debug!("[doh] GET {url}");

        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, DNS_JSON)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DomainError::Timeout(format!(
                        "{record_type} {name} after {}s",
                        self.timeout.as_secs()
                    ))
                } else {
                    DomainError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DomainError::Network(format!("Failed to read response body: {e}")))?;
        log::debug!("[doh] {record_type} {name} -> {status}: {}", truncate_for_log(&body));

        if !status.is_success() {
            return Err(DomainError::Http {
                status: status.as_u16(),
                body: truncate_for_log(&body),
            });
        }

        parse_response(&body)
    }
}

/// Parse a JSON DoH body.
pub(crate) fn parse_response(body: &str) -> DomainResult<DnsResponse> {
    serde_json::from_str(body).map_err(|e| {
        log::error!("[doh] JSON parse failed: {e}; raw: {}", truncate_for_log(body));
        DomainError::Parse(e.to_string())
    })
}

/// Push `value` unless it is already present, keeping first-seen order.
fn push_unique(values: &mut Vec<String>, value: String) {
    if !value.is_empty() && !values.contains(&value) {
        values.push(value);
    }
}

/// Nameserver hosts for `name`: trailing dot removed, lowercased, deduplicated.
pub async fn get_ns_records(query: &dyn DnsQuery, name: &str) -> DomainResult<Vec<String>> {
    let response = query.query(name, DnsRecordType::Ns).await?;
    let mut nameservers = Vec::new();
    for answer in response.answer {
        push_unique(
            &mut nameservers,
            answer.data.trim().trim_end_matches('.').to_lowercase(),
        );
    }
    Ok(nameservers)
}

/// A-record values for `name`, trimmed and deduplicated.
pub async fn get_a_records(query: &dyn DnsQuery, name: &str) -> DomainResult<Vec<String>> {
    let response = query.query(name, DnsRecordType::A).await?;
    let mut addresses = Vec::new();
    for answer in response.answer {
        push_unique(&mut addresses, answer.data.trim().to_string());
    }
    Ok(addresses)
}

/// Whether `name` has an A record equal to `ip`.
///
/// A failed lookup counts as "no such record".
pub async fn has_a_record_pointing_to(query: &dyn DnsQuery, name: &str, ip: Ipv4Addr) -> bool {
    match a_record_points_to(query, name, ip).await {
        Ok(found) => found,
        Err(e) => {
            log::warn!("A lookup for {name} failed, treating as absent: {e}");
            false
        }
    }
}

/// Like [`has_a_record_pointing_to`] but keeps the lookup error.
pub(crate) async fn a_record_points_to(
    query: &dyn DnsQuery,
    name: &str,
    ip: Ipv4Addr,
) -> DomainResult<bool> {
    let target = ip.to_string();
    Ok(get_a_records(query, name).await?.contains(&target))
}
