// scripts/bs_cli.rs
//! Command-line front end: prices, Greeks, sweeps and heatmaps as JSON.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use fast_bs::analytics::{evaluate, price, OptionType};
use fast_bs::grid::{heatmap_with_config, sweep_with_config, GridConfig, SweepSpec, SweepVariable};
use fast_bs::output;
use fast_bs::params::{normalize, RawInput, TimeUnit};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Black-Scholes pricing and sensitivity analysis
#[derive(Parser, Debug)]
#[command(name = "bs-cli")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Grid configuration file (TOML format)
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "FAST_BS_LOG_LEVEL", default_value = "info", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args, Debug, Clone, Copy)]
struct MarketArgs {
    /// Spot price of the underlying
    #[arg(short = 's', long, default_value_t = 100.0)]
    spot: f64,

    /// Strike price
    #[arg(short = 'k', long, default_value_t = 100.0)]
    strike: f64,

    /// Time to maturity (years, or days with --days)
    #[arg(short = 't', long, default_value_t = 1.0)]
    maturity: f64,

    /// Continuously compounded risk-free rate
    #[arg(short = 'r', long, default_value_t = 0.05, allow_negative_numbers = true)]
    rate: f64,

    /// Volatility
    #[arg(short = 'v', long, default_value_t = 0.2)]
    volatility: f64,

    /// Read the maturity as calendar days
    #[arg(long)]
    days: bool,
}

impl From<MarketArgs> for RawInput {
    fn from(args: MarketArgs) -> Self {
        RawInput {
            spot: args.spot,
            strike: args.strike,
            time_to_maturity: args.maturity,
            risk_free_rate: args.rate,
            volatility: args.volatility,
            time_unit: if args.days { TimeUnit::Days } else { TimeUnit::Years },
        }
    }
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Call and put prices
    Price(MarketArgs),
    /// Prices plus call and put Greeks
    Greeks(MarketArgs),
    /// Price one side across a range of one input
    Sweep {
        #[command(flatten)]
        market: MarketArgs,
        /// Input to sweep (spot, strike, time_to_maturity, risk_free_rate, volatility)
        #[arg(long)]
        variable: String,
        #[arg(long, default_value = "call")]
        option_type: String,
        #[arg(long, allow_negative_numbers = true)]
        min: f64,
        #[arg(long, allow_negative_numbers = true)]
        max: f64,
        /// Number of points (defaults to the grid config)
        #[arg(long)]
        steps: Option<usize>,
        /// Also write the points as CSV
        #[arg(long, value_name = "FILE")]
        csv: Option<PathBuf>,
    },
    /// Spot × volatility price grid
    Heatmap {
        #[command(flatten)]
        market: MarketArgs,
        /// Also write the grid as CSV
        #[arg(long, value_name = "FILE")]
        csv: Option<PathBuf>,
    },
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let config = match &cli.config {
        Some(path) => GridConfig::from_toml_file(path)
            .with_context(|| format!("loading grid config from {}", path.display()))?,
        None => GridConfig::default(),
    };

    match cli.command {
        Command::Price(market) => {
            let params = normalize(&market.into())?;
            print_json(&price(&params)?)?;
        }
        Command::Greeks(market) => {
            let params = normalize(&market.into())?;
            print_json(&evaluate(&params)?)?;
        }
        Command::Sweep {
            market,
            variable,
            option_type,
            min,
            max,
            steps,
            csv,
        } => {
            let raw: RawInput = market.into();
            let params = normalize(&raw)?;
            let variable: SweepVariable = variable.parse()?;
            let option_type: OptionType = option_type.parse()?;
            let spec = SweepSpec::new(variable, min, max)
                .with_steps(steps.unwrap_or(config.default_sweep_steps))
                .with_time_unit(raw.time_unit);

            info!(%variable, %option_type, steps = spec.steps, "running sweep");
            let result = sweep_with_config(&params, &spec, option_type, &config)?;
            if let Some(path) = csv {
                output::write_sweep_to_file(&path, &result)
                    .with_context(|| format!("writing {}", path.display()))?;
                info!(path = %path.display(), "sweep written");
            }
            print_json(&result)?;
        }
        Command::Heatmap { market, csv } => {
            let params = normalize(&market.into())?;
            info!(points = config.heatmap_points, "running heatmap");
            let grid = heatmap_with_config(&params, &config)?;
            if let Some(path) = csv {
                output::write_heatmap_to_file(&path, &grid)
                    .with_context(|| format!("writing {}", path.display()))?;
                info!(path = %path.display(), "heatmap written");
            }
            print_json(&grid)?;
        }
    }

    Ok(())
}
