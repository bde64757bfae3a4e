use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use fxconv::cli::convert::OutputFormat;
use fxconv::core::RawParams;
use fxconv::core::log::init_logging;
use std::process::ExitCode;

/// Convert an amount between currencies using live exchange rates.
///
/// Without arguments, starts the HTTP endpoint.
#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(flatten)]
    convert: ConvertArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct ConvertArgs {
    /// Amount to convert
    #[arg(long, allow_hyphen_values = true, requires = "input_currency")]
    amount: Option<String>,

    /// Input currency code or symbol; when repeated, the last one is used
    #[arg(long = "input_currency", alias = "input-currency", requires = "amount")]
    input_currency: Vec<String>,

    /// Comma-separated output currency codes or symbols; all if omitted
    #[arg(long = "output_currency", alias = "output-currency", requires = "amount")]
    output_currency: Option<String>,

    /// Output format [default: json]
    #[arg(long, value_enum, requires = "amount")]
    format: Option<OutputFormat>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Serve conversions over HTTP
    Serve {
        /// Address to bind, overrides the config
        #[arg(long)]
        host: Option<String>,
        /// Port to bind, overrides the config
        #[arg(long)]
        port: Option<u16>,
    },
}

impl From<ConvertArgs> for fxconv::AppCommand {
    fn from(args: ConvertArgs) -> fxconv::AppCommand {
        // No conversion arguments means server mode; clap rejects the other
        // conversion flags without --amount
        if args.amount.is_none() {
            return fxconv::AppCommand::Serve {
                host: None,
                port: None,
            };
        }
        fxconv::AppCommand::Convert {
            params: RawParams {
                amount: args.amount,
                input_currency: args.input_currency,
                output_currency: args.output_currency,
            },
            format: args.format.unwrap_or_default(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config_path = cli.config_path.as_deref();
    let result = match cli.command {
        Some(Commands::Setup) => fxconv::cli::setup::setup().map(|_| ExitCode::SUCCESS),
        Some(Commands::Serve { host, port }) => {
            fxconv::run_command(fxconv::AppCommand::Serve { host, port }, config_path)
                .await
                .map(ExitCode::from)
        }
        None => fxconv::run_command(cli.convert.into(), config_path)
            .await
            .map(ExitCode::from),
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
