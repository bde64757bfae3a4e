pub mod cli;
pub mod core;
pub mod providers;

use crate::cli::convert::OutputFormat;
use crate::core::config::AppConfig;
use crate::core::{ConversionResult, ConvertError, RateProvider, RawParams, SymbolTable};
use crate::providers::latest_rates::LatestRatesProvider;
use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

pub enum AppCommand {
    /// One conversion, printed to stdout.
    Convert {
        params: RawParams,
        format: OutputFormat,
    },
    /// Serve conversions over HTTP. `None` falls back to the config values.
    Serve {
        host: Option<String>,
        port: Option<u16>,
    },
}

/// Runs the normalise, fetch and format pipeline for one request.
///
/// Amount parsing happens before the provider is called, so an invalid amount
/// never reaches the network.
pub async fn convert(
    raw: &RawParams,
    symbols: &SymbolTable,
    provider: &dyn RateProvider,
) -> Result<ConversionResult, ConvertError> {
    let request = crate::core::request::normalize(raw, symbols)?;
    debug!(?request, "Normalized conversion request");

    let rates = provider
        .fetch_rates(&request.input_currency, &request.output_currencies)
        .await?;

    Ok(crate::core::result::format(&request, &rates))
}

pub fn build_provider(config: &AppConfig) -> Result<LatestRatesProvider> {
    LatestRatesProvider::new(
        &config.provider.base_url,
        Duration::from_secs(config.provider.timeout_secs),
    )
    .context("Failed to build HTTP client for rate provider")
}

/// Runs a command and returns the process exit status: 0 on success, the
/// error's exit code when a conversion fails.
pub async fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<u8> {
    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let provider = build_provider(&config)?;
    let symbols = SymbolTable::default();

    match command {
        AppCommand::Convert { params, format } => {
            Ok(cli::convert::run(&params, format, &symbols, &provider).await)
        }
        AppCommand::Serve { host, port } => {
            let host = host.unwrap_or(config.server.host);
            let port = port.unwrap_or(config.server.port);
            info!(%host, port, provider = %config.provider.base_url, "Starting server");
            let state = cli::server::ServerState {
                symbols,
                provider: Arc::new(provider),
            };
            cli::server::run(&host, port, state).await?;
            Ok(0)
        }
    }
}
