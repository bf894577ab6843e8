//! Authoritative nameserver lookup with parent-zone walk-up.

use crate::doh::{DnsQuery, get_ns_records};
use crate::domain::parent_domain;
use crate::error::{DomainError, DomainResult};

/// Find the nameservers responsible for `domain`.
///
/// Subdomains usually have no NS delegation of their own, so when a name
/// yields no NS records (or its lookup fails) the leftmost label is dropped
/// and the parent is tried, for at most `max_attempts` names. The walk stops
/// before reaching a bare TLD.
///
/// Returns `Ok(vec![])` when nothing was found. If every attempted lookup
/// failed, the last error is returned instead so callers can tell an empty
/// zone from an unreachable resolver.
pub async fn authoritative_ns(
    query: &dyn DnsQuery,
    domain: &str,
    max_attempts: usize,
) -> DomainResult<Vec<String>> {
    let mut current = domain;
    let mut last_error: Option<DomainError> = None;
    let mut answered = false;

    for attempt in 1..=max_attempts {
        match get_ns_records(query, current).await {
            Ok(nameservers) if !nameservers.is_empty() => {
                log::debug!(
                    "NS for {domain} found at {current} (attempt {attempt}): {}",
                    nameservers.join(", ")
                );
                return Ok(nameservers);
            }
            Ok(_) => answered = true,
            Err(e) => {
                log::debug!("NS lookup for {current} failed (attempt {attempt}/{max_attempts}): {e}");
                last_error = Some(e);
            }
        }

        match parent_domain(current) {
            Some(parent) => current = parent,
            None => break,
        }
    }

    match last_error {
        Some(e) if !answered => Err(e),
        _ => Ok(Vec::new()),
    }
}
