//! `migrabook-domain`: verify a customer's custom domain from the command line.
//!
//! Results are printed to stdout as JSON; logs and notifications go to stderr.

mod adapters;
mod cli;
mod settings;

use std::process::ExitCode;
use std::sync::Arc;

use adapters::TracingNotifier;
use clap::Parser;
use cli::{Cli, Command};
use migrabook_domain::{DohClient, DomainVerifier};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    // stdout carries the JSON result, so logs go to stderr
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // usage errors exit with code 2 here
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = settings::load(
        cli.config.as_deref(),
        dirs::config_dir(),
        cli.target_ip.as_deref(),
    )?;
    tracing::debug!(
        "Target IP {}, resolver {}, timeout {}s",
        config.target_ip,
        config.doh_endpoint,
        config.query_timeout_secs
    );

    let client = DohClient::from_config(&config)?;
    let verifier = DomainVerifier::new(Arc::new(client), Arc::new(TracingNotifier), config);

    let domain = cli.command.domain();
    let (output, code) = match &cli.command {
        Command::Verify { .. } => {
            let info = verifier.verify_domain(domain).await;
            let code = if info.is_valid {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            };
            (serde_json::to_string_pretty(&info)?, code)
        }
        Command::Records { .. } => {
            let result = verifier.verify_dns_records(domain).await;
            let code = if result.is_verified {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            };
            (serde_json::to_string_pretty(&result)?, code)
        }
        Command::Connect { .. } => {
            let connected = verifier.auto_connect(domain).await;
            (
                serde_json::to_string_pretty(&serde_json::json!({ "connected": connected }))?,
                ExitCode::SUCCESS,
            )
        }
        Command::Instructions { .. } => {
            let records = verifier.required_records(domain);
            let code = if records.is_empty() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            };
            (serde_json::to_string_pretty(&records)?, code)
        }
    };

    println!("{output}");
    Ok(code)
}
