use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::EstateFinanceError;
use crate::pricing::estimate::per_sqft;
use crate::types::{lakhs_to_rupees, with_metadata, ComputationOutput, Lakhs, Money, Percent};
use crate::EstateFinanceResult;

pub const DEFAULT_MARKET_AVERAGE_LAKHS: Lakhs = dec!(112.5);
pub const DEFAULT_ANNUAL_GROWTH_PERCENT: Percent = dec!(9.2);

/// Localities with metro-grade connectivity.
const WELL_CONNECTED: [&str; 2] = ["whitefield", "koramangala"];

const PREMIUM_AMENITIES_THRESHOLD: Lakhs = dec!(120);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InvestmentRating {
    Excellent,
    Good,
    Average,
}

impl InvestmentRating {
    /// Rating from annual price growth: above 12% Excellent, above 8% Good.
    pub fn from_growth(annual_growth_percent: Percent) -> Self {
        if annual_growth_percent > dec!(12) {
            InvestmentRating::Excellent
        } else if annual_growth_percent > dec!(8) {
            InvestmentRating::Good
        } else {
            InvestmentRating::Average
        }
    }

    /// Rating from a 0–100 locality amenities score.
    pub fn from_amenities_score(score: Decimal) -> Self {
        if score > dec!(80) {
            InvestmentRating::Excellent
        } else if score > dec!(60) {
            InvestmentRating::Good
        } else {
            InvestmentRating::Average
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PriceTrend {
    Rising,
    Stable,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Level {
    Excellent,
    Premium,
    High,
    Good,
    Standard,
    Medium,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightsInput {
    pub location_name: String,
    pub size_descriptor: String,
    pub total_area_sqft: Decimal,
    pub predicted_price_lakhs: Lakhs,
    /// Average price of comparable homes in the locality
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_average_lakhs: Option<Lakhs>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annual_growth_percent: Option<Percent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentProperty {
    pub location_name: String,
    pub size_descriptor: String,
    pub price_lakhs: Lakhs,
    pub price_per_sqft: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketData {
    pub average_price_lakhs: Lakhs,
    /// Predicted price relative to the market average, in percent
    pub premium_to_market_percent: Percent,
    pub annual_growth_percent: Percent,
    pub price_trend: PriceTrend,
    pub investment_rating: InvestmentRating,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationInsights {
    pub connectivity: Level,
    pub amenities: Level,
    pub future_prospects: Level,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InsightsOutput {
    pub current_property: CurrentProperty,
    pub market_data: MarketData,
    pub location_insights: LocationInsights,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Dashboard insights accompanying a price prediction.
pub fn build_insights(
    input: &InsightsInput,
) -> EstateFinanceResult<ComputationOutput<InsightsOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.total_area_sqft <= Decimal::ZERO {
        return Err(EstateFinanceError::invalid(
            "total_area_sqft",
            "Total area must be positive",
        ));
    }
    if input.predicted_price_lakhs <= Decimal::ZERO {
        return Err(EstateFinanceError::invalid(
            "predicted_price_lakhs",
            "Predicted price must be positive",
        ));
    }
    if matches!(input.market_average_lakhs, Some(avg) if avg <= Decimal::ZERO) {
        return Err(EstateFinanceError::invalid(
            "market_average_lakhs",
            "Market average must be positive",
        ));
    }

    let average = input
        .market_average_lakhs
        .unwrap_or(DEFAULT_MARKET_AVERAGE_LAKHS);
    let growth = input
        .annual_growth_percent
        .unwrap_or(DEFAULT_ANNUAL_GROWTH_PERCENT);
    if input.market_average_lakhs.is_none() || input.annual_growth_percent.is_none() {
        warnings.push("Market figures not supplied; city-wide defaults used".into());
    }

    let price = input.predicted_price_lakhs;
    let location = input.location_name.to_lowercase();
    let rising = growth > dec!(10);

    let output = InsightsOutput {
        current_property: CurrentProperty {
            location_name: input.location_name.clone(),
            size_descriptor: input.size_descriptor.clone(),
            price_lakhs: price,
            price_per_sqft: per_sqft(lakhs_to_rupees(price)?, input.total_area_sqft)?,
        },
        market_data: MarketData {
            average_price_lakhs: average,
            premium_to_market_percent: (price - average)
                .checked_div(average)
                .and_then(|premium| premium.checked_mul(dec!(100)))
                .ok_or_else(|| {
                    EstateFinanceError::invalid(
                        "market_average_lakhs",
                        "Premium to market is not representable",
                    )
                })?
                .round_dp(2),
            annual_growth_percent: growth,
            price_trend: if rising {
                PriceTrend::Rising
            } else {
                PriceTrend::Stable
            },
            investment_rating: InvestmentRating::from_growth(growth),
        },
        location_insights: LocationInsights {
            connectivity: if WELL_CONNECTED.iter().any(|l| location.contains(l)) {
                Level::Excellent
            } else {
                Level::Good
            },
            amenities: if price > PREMIUM_AMENITIES_THRESHOLD {
                Level::Premium
            } else {
                Level::Standard
            },
            future_prospects: if rising { Level::High } else { Level::Medium },
        },
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Locality and market insights for a predicted price",
        input,
        warnings,
        elapsed,
        output,
    ))
}
