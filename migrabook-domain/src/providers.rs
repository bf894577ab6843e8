//! DNS provider fingerprinting.
//!
//! Two classifiers live here: one reads the authoritative nameservers (the
//! trustworthy signal), the other only looks at the domain string and is used
//! when DNS gave us nothing.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{Confidence, ProviderInfo};

/// Known DNS / hosting providers plus the two "don't know" sentinels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Provider {
    Cloudflare,
    Google,
    GoDaddy,
    Namecheap,
    Vercel,
    Netlify,
    Bluehost,
    HostGator,
    SiteGround,
    Amazon,
    /// Generic shared hosting, only produced by the domain-pattern fallback.
    Hosting,
    /// DNS answered but no fingerprint matched; the user configures records by hand.
    Manual,
    Unknown,
}

impl Provider {
    /// Every provider, in no particular order.
    pub const ALL: [Self; 13] = [
        Self::Cloudflare,
        Self::GoDaddy,
        Self::Namecheap,
        Self::Google,
        Self::Amazon,
        Self::Vercel,
        Self::Netlify,
        Self::Bluehost,
        Self::HostGator,
        Self::SiteGround,
        Self::Hosting,
        Self::Manual,
        Self::Unknown,
    ];

    /// Stable key used in JSON and by callers that store the provider.
    pub const fn key(self) -> &'static str {
        match self {
            Self::Cloudflare => "cloudflare",
            Self::Google => "google",
            Self::GoDaddy => "godaddy",
            Self::Namecheap => "namecheap",
            Self::Vercel => "vercel",
            Self::Netlify => "netlify",
            Self::Bluehost => "bluehost",
            Self::HostGator => "hostgator",
            Self::SiteGround => "siteground",
            Self::Amazon => "amazon",
            Self::Hosting => "hosting",
            Self::Manual => "manual",
            Self::Unknown => "unknown",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| p.key() == key)
    }

    /// Name shown to the customer.
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::Cloudflare => "Cloudflare",
            Self::Google => "Google Domains",
            Self::GoDaddy => "GoDaddy",
            Self::Namecheap => "Namecheap",
            Self::Vercel => "Vercel",
            Self::Netlify => "Netlify",
            Self::Bluehost => "Bluehost",
            Self::HostGator => "HostGator",
            Self::SiteGround => "SiteGround",
            Self::Amazon => "Amazon Route 53",
            Self::Hosting => "Provedor de Hospedagem",
            Self::Manual => "Configuração Manual",
            Self::Unknown => "Desconhecido",
        }
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Display name for a raw provider key; anything unrecognised is "Outros".
pub fn display_name_for(key: &str) -> &'static str {
    Provider::from_key(key).map_or("Outros", Provider::display_name)
}

/// Nameserver fingerprints, checked top to bottom; the first provider with a
/// matching pattern wins even if a later one would match more specifically.
///
/// A pattern starting with `.` must be a suffix of the nameserver host; any
/// other pattern only has to appear somewhere in it.
const NS_FINGERPRINTS: &[(Provider, &[&str])] = &[
    (Provider::Cloudflare, &[".ns.cloudflare.com", "cloudflare"]),
    (Provider::Google, &["googledomains.com", ".google.com"]),
    (Provider::GoDaddy, &["domaincontrol.com", "godaddy"]),
    (
        Provider::Namecheap,
        &["registrar-servers.com", "namecheaphosting.com", "namecheap"],
    ),
    (Provider::Vercel, &["vercel-dns.com", "vercel"]),
    (Provider::Netlify, &["nsone.net", "netlify"]),
    (Provider::Bluehost, &["bluehost.com"]),
    (Provider::HostGator, &["hostgator", "websitewelcome.com"]),
    (Provider::SiteGround, &["siteground"]),
    (Provider::Amazon, &["awsdns", ".amazonaws.com"]),
];

fn pattern_matches(nameserver: &str, pattern: &str) -> bool {
    if pattern.starts_with('.') {
        nameserver.ends_with(pattern)
    } else {
        nameserver.contains(pattern)
    }
}

/// Classify a zone by its (lowercased) nameserver hosts.
///
/// Returns [`Provider::Manual`] when nothing matches.
pub fn detect_provider_from_ns<S: AsRef<str>>(nameservers: &[S]) -> Provider {
    NS_FINGERPRINTS
        .iter()
        .find(|(_, patterns)| {
            nameservers.iter().any(|ns| {
                patterns
                    .iter()
                    .any(|pattern| pattern_matches(ns.as_ref(), pattern))
            })
        })
        .map_or(Provider::Manual, |(provider, _)| *provider)
}

/// Provider-name substrings in the domain itself.
const DOMAIN_NAME_HINTS: &[(Provider, &[&str])] = &[
    (Provider::Cloudflare, &["cloudflare"]),
    (Provider::GoDaddy, &["godaddy"]),
    (Provider::Namecheap, &["namecheap"]),
    (Provider::Vercel, &["vercel"]),
    (Provider::Netlify, &["netlify"]),
    (Provider::Google, &["google"]),
    (Provider::Amazon, &["amazon"]),
    (Provider::Bluehost, &["bluehost"]),
    (Provider::HostGator, &["hostgator"]),
    (Provider::SiteGround, &["siteground"]),
];

/// Hints too short to match inside words; they must be a whole label.
const DOMAIN_LABEL_HINTS: &[(Provider, &str)] = &[(Provider::Amazon, "aws")];

/// TLDs that are usually registered through Cloudflare Registrar.
const CLOUDFLARE_TLD_HINTS: &[&str] = &[".app", ".dev", ".page"];

/// Guess a provider from the domain string alone.
///
/// Lowest-trust signal in the crate: only used when DNS produced no
/// nameservers, and never grants automatic connection.
pub fn detect_provider_from_domain(domain: &str) -> ProviderInfo {
    let domain = domain.to_lowercase();

    let named = DOMAIN_NAME_HINTS
        .iter()
        .find(|(_, hints)| hints.iter().any(|hint| domain.contains(hint)))
        .map(|(provider, _)| *provider)
        .or_else(|| {
            DOMAIN_LABEL_HINTS
                .iter()
                .find(|(_, label)| domain.split('.').any(|l| l == *label))
                .map(|(provider, _)| *provider)
        });

    let (provider, confidence) = if let Some(provider) = named {
        (provider, Confidence::High)
    } else if CLOUDFLARE_TLD_HINTS.iter().any(|tld| domain.ends_with(tld)) {
        (Provider::Cloudflare, Confidence::Medium)
    } else if domain.contains("hosting") {
        (Provider::Hosting, Confidence::Medium)
    } else {
        (Provider::Manual, Confidence::Medium)
    };

    ProviderInfo {
        provider,
        display_name: provider.display_name().to_string(),
        nameservers: Vec::new(),
        confidence,
    }
}
