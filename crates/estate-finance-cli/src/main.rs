mod commands;
mod config;
mod input;
mod log;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::loan::{AmortizationArgs, EligibilityArgs, EmiArgs, PropertyEmiArgs};
use commands::pricing::{EstimatePriceArgs, InsightsArgs, TrendArgs};
use config::CliConfig;

/// Home-loan EMI and property price estimates
#[derive(Parser)]
#[command(
    name = "estate",
    version,
    about = "Home-loan EMI and property price estimates",
    long_about = "A CLI for home-buying arithmetic with decimal precision. Computes loan \
                  EMIs, down-payment and registration costs, amortization schedules, \
                  loan eligibility, heuristic property prices and locality trends."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// YAML file with default rate, tenure and down payment
    #[arg(long, global = true)]
    config: Option<String>,

    /// Log calculation steps to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Equal monthly installment for a loan
    Emi(EmiArgs),
    /// EMI, down payment and upfront costs for a property
    PropertyEmi(PropertyEmiArgs),
    /// Month-by-month repayment schedule
    Amortization(AmortizationArgs),
    /// Largest loan an income qualifies for
    Eligibility(EligibilityArgs),
    /// Heuristic property price in lakhs
    EstimatePrice(EstimatePriceArgs),
    /// Market and locality insights for a predicted price
    Insights(InsightsArgs),
    /// Compounded locality price trend and forecast
    Trends(TrendArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();
    log::init_logging(cli.verbose);

    let config = match CliConfig::load(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    };

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Emi(args) => commands::loan::run_emi(args, &config),
        Commands::PropertyEmi(args) => commands::loan::run_property_emi(args, &config),
        Commands::Amortization(args) => commands::loan::run_amortization(args, &config),
        Commands::Eligibility(args) => commands::loan::run_eligibility(args, &config),
        Commands::EstimatePrice(args) => commands::pricing::run_estimate_price(args),
        Commands::Insights(args) => commands::pricing::run_insights(args),
        Commands::Trends(args) => commands::pricing::run_trends(args),
        Commands::Version => {
            println!("estate {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
