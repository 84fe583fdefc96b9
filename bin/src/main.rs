//! iipcast CLI binary.
//!
//! Forecasts an industry index from its leading indicators and propagates
//! the forecast into stock financial statements.

mod cmd;
mod data;

use std::path::PathBuf;
use std::process;

use anyhow::Result;
use clap::{Parser, Subcommand};
use iipcast::data::StatementKind;
use iipcast::{CorrelationBucket, ForecastSelection, ProjectionPolicy};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "iipcast")]
#[command(about = "Industry index forecasting and propagation into stock financials", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Data directory
    #[arg(long, global = true, env = "IIPCAST_DATA_DIR", default_value = "data")]
    data_dir: PathBuf,

    /// JSON pipeline configuration file
    #[arg(short, long, global = true, env = "IIPCAST_CONFIG")]
    config: Option<PathBuf>,

    /// Indicator catalog JSON replacing the built-in one
    #[arg(long, global = true, env = "IIPCAST_CATALOG")]
    catalog: Option<PathBuf>,

    /// Interpretation text JSON replacing the built-in one
    #[arg(long, global = true, env = "IIPCAST_INTERPRETATIONS")]
    interpretations: Option<PathBuf>,

    /// Log filter (trace, debug, info, warn, error or an EnvFilter directive)
    #[arg(long, global = true, env = "IIPCAST_LOG", default_value = "warn")]
    log: String,
}

/// Indicator input shared by `forecast` and `project`.
#[derive(clap::Args)]
struct InputArgs {
    /// Industry name
    #[arg(short, long)]
    industry: String,

    /// Manual indicator value as NAME=VALUE (repeatable, unset indicators default to 100)
    #[arg(short = 'v', long = "value")]
    values: Vec<String>,

    /// Indicator CSV to use instead of manual values
    #[arg(long, conflicts_with = "values")]
    indicators: Option<PathBuf>,

    /// Use the stored indicator history of the industry
    #[arg(long, conflicts_with_all = ["values", "indicators"])]
    history: bool,

    /// Forecast used for propagation (linear, arima, forest, consensus)
    #[arg(short, long)]
    select: Option<ForecastSelection>,
}

#[derive(Subcommand)]
enum Commands {
    /// List industries and their indicators
    Industries {
        /// Show leading and lagging indicators
        #[arg(short, long)]
        verbose: bool,
    },

    /// Fit the estimators and forecast the next index value
    Forecast {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Forecast and project stock financial statements
    Project {
        #[command(flatten)]
        input: InputArgs,

        /// Stock name(s)
        #[arg(long, value_delimiter = ',', required = true)]
        stocks: Vec<String>,

        /// Projection policy (ratio-scaling or correlation-growth)
        #[arg(short, long)]
        policy: Option<ProjectionPolicy>,

        /// Statement row label, e.g. "Jun 2024"
        #[arg(long, env = "IIPCAST_TARGET_DATE")]
        date: Option<String>,

        /// Statement sheet (income, balance, cash)
        #[arg(long)]
        statement: Option<StatementKind>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// List stocks with loaded data
    Stocks,

    /// Show the interpretation text for a metric and correlation bucket
    Interpret {
        /// Financial metric, e.g. "Net Profit"
        metric: String,

        /// Correlation bucket, e.g. strong-positive
        bucket: CorrelationBucket,
    },
}

fn main() {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .with(tracing_subscriber::EnvFilter::new(&cli.log))
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut config = data::load_config(cli.config.as_deref())?;
    let catalog = data::load_catalog(cli.catalog.as_deref())?;
    let interpretations = data::load_interpretations(cli.interpretations.as_deref())?;
    tracing::debug!(data_dir = %cli.data_dir.display(), ?config, "configuration loaded");

    match cli.command {
        Commands::Industries { verbose } => cmd::industries::list_industries(&catalog, verbose),
        Commands::Forecast { input } => {
            if let Some(select) = input.select {
                config.selection = select;
            }
            let ctx = data::Context::load(&cli.data_dir, catalog, interpretations)?;
            cmd::forecast::show_forecast(&ctx, config, &input)
        }
        Commands::Project {
            input,
            stocks,
            policy,
            date,
            statement,
            format,
        } => {
            if let Some(select) = input.select {
                config.selection = select;
            }
            if let Some(policy) = policy {
                config.policy = policy;
            }
            if let Some(date) = date {
                config.target_date = date;
            }
            if let Some(statement) = statement {
                config.statement = statement;
            }
            let ctx = data::Context::load(&cli.data_dir, catalog, interpretations)?;
            cmd::project::project_stocks(&ctx, config, &input, &stocks, &format)
        }
        Commands::Stocks => {
            let ctx = data::Context::load(&cli.data_dir, catalog, interpretations)?;
            cmd::stocks::list_stocks(&ctx)
        }
        Commands::Interpret { metric, bucket } => {
            cmd::interpret::show_interpretation(&interpretations, &metric, bucket)
        }
    }
}
