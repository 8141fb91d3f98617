use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;

use estate_finance_core::guard::sanitize_text;
use estate_finance_core::pricing::estimate::{self, PricePredictionInput};
use estate_finance_core::pricing::insights::{self, InsightsInput};
use estate_finance_core::pricing::trends::{self, TrendInput};

use crate::input;

/// Arguments for a heuristic price estimate
#[derive(Args)]
pub struct EstimatePriceArgs {
    /// Locality name (e.g. "Whitefield")
    #[arg(long)]
    pub location: Option<String>,

    /// Size descriptor (e.g. "3 BHK")
    #[arg(long, default_value = "2 BHK")]
    pub size: String,

    /// Total built-up area in square feet
    #[arg(long)]
    pub sqft: Option<Decimal>,

    /// Seed for the randomized +/-10% market variation
    #[arg(long)]
    pub seed: Option<u64>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for locality and market insights
#[derive(Args)]
pub struct InsightsArgs {
    /// Path to JSON input file with the predicted price and market figures
    #[arg(long)]
    pub input: Option<String>,
}

/// Arguments for a locality price trend
#[derive(Args)]
#[command(allow_hyphen_values = true)]
pub struct TrendArgs {
    /// Locality name
    #[arg(long)]
    pub location: Option<String>,

    /// Price at the start of the first year, in lakhs
    #[arg(long)]
    pub base_price: Option<Decimal>,

    /// First year of the series
    #[arg(long)]
    pub first_year: Option<i32>,

    /// Comma-separated annual growth percentages (e.g. 8.5,9,11.2)
    #[arg(long, value_delimiter = ',')]
    pub growth: Vec<Decimal>,

    /// Locality amenities score, 0–100
    #[arg(long)]
    pub amenities_score: Option<Decimal>,

    /// Public-transport score, 0–100
    #[arg(long)]
    pub transport_score: Option<Decimal>,

    /// Schools score, 0–100
    #[arg(long)]
    pub schools_score: Option<Decimal>,

    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,
}

pub fn run_estimate_price(args: EstimatePriceArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let price_input = match input::read_typed::<PricePredictionInput>(args.input.as_deref())? {
        Some(i) => i,
        None => PricePredictionInput {
            location_name: args
                .location
                .ok_or("--location is required (or provide --input)")?,
            size_descriptor: args.size,
            total_area_sqft: args.sqft.ok_or("--sqft is required (or provide --input)")?,
        },
    }
    .sanitized();

    let result = match args.seed {
        Some(seed) => estimate::predict_price_with_jitter(&price_input, seed)?,
        None => estimate::predict_price(&price_input)?,
    };
    Ok(serde_json::to_value(result)?)
}

pub fn run_insights(args: InsightsArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut insights_input = input::read_typed::<InsightsInput>(args.input.as_deref())?
        .ok_or("--input <file.json> or stdin required for insights")?;
    insights_input.location_name = sanitize_text(&insights_input.location_name).into_owned();
    let result = insights::build_insights(&insights_input)?;
    Ok(serde_json::to_value(result)?)
}

pub fn run_trends(args: TrendArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut trend_input = match input::read_typed::<TrendInput>(args.input.as_deref())? {
        Some(i) => i,
        None => TrendInput {
            location_name: args
                .location
                .ok_or("--location is required (or provide --input)")?,
            base_price_lakhs: args
                .base_price
                .ok_or("--base-price is required (or provide --input)")?,
            first_year: args
                .first_year
                .ok_or("--first-year is required (or provide --input)")?,
            annual_growth_percent: args.growth,
            amenities_score: args.amenities_score,
            transport_score: args.transport_score,
            schools_score: args.schools_score,
        },
    };
    trend_input.location_name = sanitize_text(&trend_input.location_name).into_owned();
    let result = trends::analyze_trend(&trend_input)?;
    Ok(serde_json::to_value(result)?)
}
