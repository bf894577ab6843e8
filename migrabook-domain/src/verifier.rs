//! Custom-domain verification orchestrator.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use futures::FutureExt;

use crate::config::VerifierConfig;
use crate::doh::{DnsQuery, DohClient, a_record_points_to};
use crate::domain::{is_valid_domain, normalize_domain};
use crate::error::DomainResult;
use crate::notifier::{LogNotifier, Notification, NotificationLevel, Notifier};
use crate::providers::{Provider, detect_provider_from_domain, detect_provider_from_ns};
use crate::resolver::authoritative_ns;
use crate::types::{
    ARecordChecks, Confidence, DnsRecordType, DomainInfo, ProviderInfo, RecordsFound,
    RequiredRecord, VerificationResult,
};

const INVALID_DOMAIN_LABEL: &str = "Domínio inválido";
const VERIFICATION_ERROR_LABEL: &str = "Erro na verificação";

/// Sets a flag on creation and clears it on drop, whichever way the operation ends.
struct FlagGuard<'a>(&'a AtomicBool);

impl<'a> FlagGuard<'a> {
    fn raise(flag: &'a AtomicBool) -> Self {
        flag.store(true, Ordering::Relaxed);
        Self(flag)
    }
}

impl Drop for FlagGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Relaxed);
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}

/// Checks that a customer's domain is ready to serve a published app.
///
/// None of the operations return errors: DNS failures degrade into
/// lower-confidence or negative results, and anything the customer needs to
/// act on is sent through the [`Notifier`].
///
/// `is_verifying` / `is_connecting` are plain status flags for the caller's
/// UI. Two overlapping calls on the same verifier will both write them, and
/// the first one to finish clears the flag.
pub struct DomainVerifier {
    query: Arc<dyn DnsQuery>,
    notifier: Arc<dyn Notifier>,
    config: VerifierConfig,
    is_verifying: AtomicBool,
    is_connecting: AtomicBool,
}

impl DomainVerifier {
    pub fn new(
        query: Arc<dyn DnsQuery>,
        notifier: Arc<dyn Notifier>,
        config: VerifierConfig,
    ) -> Self {
        Self {
            query,
            notifier,
            config,
            is_verifying: AtomicBool::new(false),
            is_connecting: AtomicBool::new(false),
        }
    }

    /// Verifier backed by [`DohClient`] that reports notifications to the log.
    pub fn from_config(config: VerifierConfig) -> DomainResult<Self> {
        config.validate()?;
        let client = DohClient::from_config(&config)?;
        Ok(Self::new(Arc::new(client), Arc::new(LogNotifier), config))
    }

    pub fn config(&self) -> &VerifierConfig {
        &self.config
    }

    pub fn is_verifying(&self) -> bool {
        self.is_verifying.load(Ordering::Relaxed)
    }

    pub fn is_connecting(&self) -> bool {
        self.is_connecting.load(Ordering::Relaxed)
    }

    /// Validate `raw` and work out which DNS provider hosts its zone.
    pub async fn verify_domain(&self, raw: &str) -> DomainInfo {
        let _verifying = FlagGuard::raise(&self.is_verifying);

        let domain = normalize_domain(raw);
        if !is_valid_domain(&domain) {
            log::info!("Rejected domain input {raw:?} (normalized to {domain:?})");
            return DomainInfo::invalid(domain, INVALID_DOMAIN_LABEL, Confidence::High);
        }

        match AssertUnwindSafe(self.detect(&domain)).catch_unwind().await {
            Ok(info) => {
                log::info!(
                    "Domain {} served by {} ({:?} confidence, auto-connect: {})",
                    info.domain,
                    info.provider_display_name,
                    info.confidence,
                    info.can_auto_connect
                );
                info
            }
            Err(payload) => {
                log::error!(
                    "Verification of {domain} aborted: {}",
                    panic_message(payload.as_ref())
                );
                self.notifier.notify(Notification::new(
                    NotificationLevel::Error,
                    VERIFICATION_ERROR_LABEL,
                    format!("Não foi possível verificar o domínio {domain}. Tente novamente."),
                ));
                DomainInfo::invalid(domain, VERIFICATION_ERROR_LABEL, Confidence::Low)
            }
        }
    }

    /// Provider detection for an already-validated domain.
    async fn detect(&self, domain: &str) -> DomainInfo {
        let (info, from_dns) =
            match authoritative_ns(self.query.as_ref(), domain, self.config.max_ns_attempts).await
            {
                Ok(nameservers) if !nameservers.is_empty() => {
                    let provider = detect_provider_from_ns(&nameservers);
                    let confidence = if provider == Provider::Manual {
                        Confidence::Medium
                    } else {
                        Confidence::High
                    };
                    let info = ProviderInfo {
                        provider,
                        display_name: provider.display_name().to_string(),
                        nameservers,
                        confidence,
                    };
                    (info, true)
                }
                Ok(_) => {
                    log::info!("No NS records for {domain}; guessing provider from the name");
                    (detect_provider_from_domain(domain), false)
                }
                Err(e) => {
                    log::warn!("NS lookup for {domain} failed ({e}); guessing provider from the name");
                    (detect_provider_from_domain(domain), false)
                }
            };

        let has_cloudflare = info.provider == Provider::Cloudflare;
        DomainInfo {
            domain: domain.to_string(),
            is_valid: true,
            provider: Some(info.provider),
            provider_display_name: info.display_name,
            nameservers: info.nameservers,
            has_cloudflare,
            can_auto_connect: has_cloudflare && from_dns,
            confidence: info.confidence,
        }
    }

    /// Check that both `domain` and `www.domain` have an A record pointing at
    /// the configured target IP.
    pub async fn verify_dns_records(&self, raw: &str) -> VerificationResult {
        let _verifying = FlagGuard::raise(&self.is_verifying);

        let domain = normalize_domain(raw);
        if !is_valid_domain(&domain) {
            return VerificationResult {
                errors: vec![format!("Invalid domain: {raw}")],
                ..VerificationResult::default()
            };
        }

        let ip = self.config.target_ip;
        let www = format!("www.{domain}");
        let query = self.query.as_ref();
        let (root_check, www_check) = futures::join!(
            a_record_points_to(query, &domain, ip),
            a_record_points_to(query, &www, ip)
        );

        let (root_ok, www_ok) = match (root_check, www_check) {
            (Err(e), Err(_)) => {
                log::warn!("DNS record check for {domain} failed: {e}");
                return VerificationResult {
                    errors: vec![format!("DNS query failed: {e}")],
                    ..VerificationResult::default()
                };
            }
            (root, www_result) => (
                root.unwrap_or_else(|e| {
                    log::warn!("A lookup for {domain} failed, treating as absent: {e}");
                    false
                }),
                www_result.unwrap_or_else(|e| {
                    log::warn!("A lookup for {www} failed, treating as absent: {e}");
                    false
                }),
            ),
        };

        let mut errors = Vec::new();
        if !root_ok {
            errors.push(format!("root A record not found or not pointing to {ip}"));
        }
        if !www_ok {
            errors.push(format!("www A record not found or not pointing to {ip}"));
        }

        let is_verified = root_ok && www_ok;
        log::info!("DNS records for {domain}: root={root_ok} www={www_ok}");
        VerificationResult {
            is_verified,
            records_found: RecordsFound {
                a_record: is_verified,
                txt_record: true,
            },
            a_record_checks: ARecordChecks {
                root: root_ok,
                www: www_ok,
            },
            errors,
        }
    }

    /// Automatic record creation at the customer's DNS provider.
    ///
    /// Not available: it would need the customer's provider credentials. Always
    /// returns `false` and tells the customer to configure DNS by hand.
    #[allow(clippy::unused_async)]
    pub async fn auto_connect(&self, raw: &str) -> bool {
        let _connecting = FlagGuard::raise(&self.is_connecting);

        let domain = normalize_domain(raw);
        log::info!("Automatic connection requested for {domain}; manual setup required");
        self.notifier.notify(Notification::new(
            NotificationLevel::Warning,
            "Conexão automática indisponível",
            format!(
                "Configure manualmente os registros DNS de {domain} apontando para {}.",
                self.config.target_ip
            ),
        ));
        false
    }

    /// Records the customer has to create so that [`verify_dns_records`](Self::verify_dns_records) passes.
    pub fn required_records(&self, raw: &str) -> Vec<RequiredRecord> {
        let domain = normalize_domain(raw);
        if !is_valid_domain(&domain) {
            return Vec::new();
        }
        let value = self.config.target_ip.to_string();
        ["@", "www"]
            .into_iter()
            .map(|host| RequiredRecord {
                record_type: DnsRecordType::A,
                host: host.to_string(),
                value: value.clone(),
            })
            .collect()
    }
}
