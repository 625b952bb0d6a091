use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use cnb_fx::core::log::init_logging;
use cnb_fx::core::request::RawRequest;

/// Converts amounts between currencies using the Czech National Bank daily rates.
///
/// Without a subcommand, converts `--amount` of `--input_currency` and prints
/// the result as JSON.
#[derive(Parser)]
#[command(version, about, args_conflicts_with_subcommands = true)]
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
    /// Amount of currency to exchange
    #[arg(long, allow_hyphen_values = true)]
    amount: Option<String>,

    /// Code or symbol of the currency to exchange from
    #[arg(long = "input_currency")]
    input_currency: Option<String>,

    /// Code or symbol of the currency to exchange to (default: all)
    #[arg(long = "output_currency")]
    output_currency: Option<String>,
}

impl From<ConvertArgs> for RawRequest {
    fn from(args: ConvertArgs) -> RawRequest {
        RawRequest {
            amount: args.amount,
            input_currency: args.input_currency,
            output_currency: args.output_currency,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Serve conversions over HTTP
    Serve {
        /// Address to bind, overrides the configured one
        #[arg(short, long)]
        listen: Option<String>,
    },
    /// Print today's exchange rate table
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config_path = cli.config_path.as_deref();
    let result = match cli.command {
        Some(Commands::Setup) => match config_path {
            Some(path) => cnb_fx::cli::setup::setup_at_path(path),
            None => cnb_fx::cli::setup::setup(),
        },
        Some(Commands::Serve { listen }) => {
            cnb_fx::run_command(
                cnb_fx::AppCommand::Serve {
                    listen_addr: listen,
                },
                config_path,
            )
            .await
        }
        Some(Commands::List) => cnb_fx::run_command(cnb_fx::AppCommand::List, config_path).await,
        None => {
            cnb_fx::run_command(cnb_fx::AppCommand::Convert(cli.convert.into()), config_path)
                .await
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
