//! Command-line arguments.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "migrabook-domain", version)]
#[command(about = "Verify a custom domain for a published MigraBook app")]
#[command(after_help = "Logs go to stderr; set RUST_LOG to change the filter (default: info).")]
pub struct Cli {
    /// TOML configuration file
    #[arg(long, global = true, env = "MIGRABOOK_DOMAIN_CONFIG")]
    pub config: Option<PathBuf>,
    /// Overrides the configured hosting IP
    #[arg(long, global = true, env = "MIGRABOOK_TARGET_IP")]
    pub target_ip: Option<String>,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Validate the domain and detect its DNS provider
    Verify { domain: String },
    /// Check the root and www A records against the hosting IP
    Records { domain: String },
    /// Try automatic DNS configuration (manual setup is required)
    Connect { domain: String },
    /// Print the DNS records the domain needs
    Instructions { domain: String },
}

impl Command {
    pub fn domain(&self) -> &str {
        match self {
            Self::Verify { domain }
            | Self::Records { domain }
            | Self::Connect { domain }
            | Self::Instructions { domain } => domain,
        }
    }
}
