//! Verifier integration tests against a fake zone.
//!
//! Real-resolver tests are ignored by default:
//! ```bash
//! cargo test -p migrabook-domain --test verifier_test -- --ignored --nocapture
//! ```

mod common;

use std::sync::Arc;

use common::{CollectingNotifier, FakeZone};
use migrabook_domain::{
    Confidence, DnsRecordType, DomainVerifier, Provider, VerifierConfig, doh, resolver,
};

const TARGET: &str = "185.158.133.1";

fn verifier(zone: FakeZone) -> (DomainVerifier, Arc<CollectingNotifier>) {
    let notifier = Arc::new(CollectingNotifier::default());
    let verifier = DomainVerifier::new(Arc::new(zone), notifier.clone(), VerifierConfig::default());
    (verifier, notifier)
}

#[tokio::test]
async fn test_full_onboarding_flow() {
    let zone = FakeZone::new()
        .with(
            "mystore.com",
            DnsRecordType::Ns,
            &["aron.ns.cloudflare.com.", "beth.ns.cloudflare.com."],
        )
        .with("mystore.com", DnsRecordType::A, &[TARGET])
        .with("www.mystore.com", DnsRecordType::A, &[TARGET, TARGET]);
    let (verifier, notifier) = verifier(zone);

    let info = verifier.verify_domain("HTTPS://WWW.MyStore.com/loja?x=1").await;
    assert!(info.is_valid);
    assert_eq!(info.domain, "mystore.com");
    assert_eq!(info.provider, Some(Provider::Cloudflare));
    assert!(info.has_cloudflare && info.can_auto_connect);
    assert_eq!(info.confidence, Confidence::High);

    let required = verifier.required_records(&info.domain);
    assert_eq!(required.len(), 2);

    let records = verifier.verify_dns_records(&info.domain).await;
    assert!(records.is_verified, "errors: {:?}", records.errors);
    assert!(records.records_found.a_record);

    assert!(!verifier.auto_connect(&info.domain).await);
    assert_eq!(notifier.count(), 1);
}

#[tokio::test]
async fn test_root_ok_www_missing() {
    let zone = FakeZone::new().with("mystore.com", DnsRecordType::A, &[TARGET]);
    let (verifier, _) = verifier(zone);

    let result = verifier.verify_dns_records("mystore.com").await;
    assert!(!result.is_verified);
    assert!(!result.records_found.a_record);
    assert_eq!(result.errors.len(), 1);
    assert!(result.errors[0].contains("www"));
}

#[tokio::test]
async fn test_has_a_record_pointing_to_swallows_failures() {
    let zone = FakeZone::new().failing("mystore.com", DnsRecordType::A);
    let ip = TARGET.parse().unwrap_or(migrabook_domain::DEFAULT_TARGET_IP);

    assert!(!doh::has_a_record_pointing_to(&zone, "mystore.com", ip).await);
    assert!(!doh::has_a_record_pointing_to(&zone, "mystore.com", ip).await);
}

#[tokio::test]
async fn test_authoritative_ns_for_deep_subdomain() {
    let zone = FakeZone::new().with("mystore.com.br", DnsRecordType::Ns, &["ns1.hostgator.com.br."]);

    let ns = resolver::authoritative_ns(&zone, "a.b.mystore.com.br", 5).await;
    assert_eq!(ns, Ok(vec!["ns1.hostgator.com.br".to_string()]));
}

#[tokio::test]
async fn test_unreachable_resolver_falls_back() {
    let zone = FakeZone::new().failing("mystore.dev", DnsRecordType::Ns);
    let (verifier, notifier) = verifier(zone);

    let info = verifier.verify_domain("mystore.dev").await;
    assert!(info.is_valid);
    assert_eq!(info.provider, Some(Provider::Cloudflare));
    assert_eq!(info.confidence, Confidence::Medium);
    assert!(!info.can_auto_connect);
    assert_eq!(notifier.count(), 0);
}

// ==================== real resolver ====================

#[tokio::test]
#[ignore = "requires network access"]
async fn test_verify_domain_real() {
    let Ok(verifier) = DomainVerifier::from_config(VerifierConfig::default()) else {
        panic!("default config must build a verifier");
    };
    let info = verifier.verify_domain("cloudflare.com").await;
    assert!(info.is_valid);
    assert_eq!(info.provider, Some(Provider::Cloudflare));
    assert!(!info.nameservers.is_empty());
}

#[tokio::test]
#[ignore = "requires network access"]
async fn test_verify_dns_records_real() {
    let Ok(verifier) = DomainVerifier::from_config(VerifierConfig::default()) else {
        panic!("default config must build a verifier");
    };
    // example.com does not point at the hosting IP
    let result = verifier.verify_dns_records("example.com").await;
    assert!(!result.is_verified);
    assert!(!result.errors.is_empty());
}
