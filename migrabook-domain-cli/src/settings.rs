//! Configuration file discovery.

use std::path::{Path, PathBuf};

use anyhow::Context;
use migrabook_domain::VerifierConfig;

/// Pick the config file: explicit path (flag or `MIGRABOOK_DOMAIN_CONFIG`),
/// then the per-user default if it exists.
pub fn config_path(explicit: Option<&Path>, default_dir: Option<PathBuf>) -> Option<PathBuf> {
    if let Some(path) = explicit.filter(|p| !p.as_os_str().is_empty()) {
        return Some(path.to_path_buf());
    }
    default_dir
        .map(|dir| dir.join("migrabook").join("domain.toml"))
        .filter(|path| path.is_file())
}

/// Build the verifier configuration for this run.
pub fn load(
    explicit: Option<&Path>,
    default_dir: Option<PathBuf>,
    target_ip_override: Option<&str>,
) -> anyhow::Result<VerifierConfig> {
    let config = match config_path(explicit, default_dir) {
        Some(path) => {
            tracing::info!("Using configuration {}", path.display());
            VerifierConfig::load(&path)
                .with_context(|| format!("Failed to load {}", path.display()))?
        }
        None => {
            tracing::debug!("No configuration file, using defaults");
            VerifierConfig::default()
        }
    };

    match target_ip_override {
        Some(ip) => Ok(config
            .with_target_ip_override(ip)
            .with_context(|| format!("Invalid target IP: {ip}"))?),
        None => Ok(config),
    }
}
