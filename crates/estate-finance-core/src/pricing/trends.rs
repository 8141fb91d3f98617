use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::EstateFinanceError;
use crate::pricing::insights::InvestmentRating;
use crate::types::{with_metadata, ComputationOutput, Lakhs, Percent};
use crate::EstateFinanceResult;

/// Next-year forecast uplift over the latest price.
pub const FORECAST_UPLIFT: Decimal = dec!(1.1);

/// Average growth above which a locality counts as high-growth, in percent.
pub const HIGH_GROWTH_THRESHOLD: Percent = dec!(12);

/// Years of history needed before a forecast is rated medium confidence.
pub const MEDIUM_CONFIDENCE_YEARS: usize = 3;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendInput {
    pub location_name: String,
    /// Price at the start of `first_year`, in lakhs
    pub base_price_lakhs: Lakhs,
    pub first_year: i32,
    /// Growth for each year from `first_year` onward, in percent
    pub annual_growth_percent: Vec<Percent>,
    /// Locality amenities score, 0–100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amenities_score: Option<Decimal>,
    /// Public-transport score, 0–100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transport_score: Option<Decimal>,
    /// Schools score, 0–100
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schools_score: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendPoint {
    pub year: i32,
    pub price_lakhs: Lakhs,
    pub growth_percent: Percent,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Recommendation {
    Buy,
    Hold,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confidence {
    Low,
    Medium,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrendOutput {
    pub location_name: String,
    pub series: Vec<TrendPoint>,
    /// Growth from the first to the last point of the series
    pub total_growth_percent: Percent,
    pub average_annual_growth_percent: Percent,
    pub current_price_lakhs: Lakhs,
    /// Change over the last year of the series; zero for a single-year series
    pub one_year_change_lakhs: Lakhs,
    pub next_year_forecast_lakhs: Lakhs,
    pub forecast_confidence: Confidence,
    pub investment_rating: InvestmentRating,
    pub recommendation: Recommendation,
    /// Short observations such as "High growth potential area"
    pub market_insights: Vec<String>,
}

/// Compound a yearly price series and summarise it into an investment view.
pub fn analyze_trend(input: &TrendInput) -> EstateFinanceResult<ComputationOutput<TrendOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.base_price_lakhs <= Decimal::ZERO {
        return Err(EstateFinanceError::invalid(
            "base_price_lakhs",
            "Base price must be positive",
        ));
    }
    if input.annual_growth_percent.is_empty() {
        return Err(EstateFinanceError::invalid(
            "annual_growth_percent",
            "At least one year of growth is required",
        ));
    }
    if input.annual_growth_percent.iter().any(|g| *g <= dec!(-100)) {
        return Err(EstateFinanceError::invalid(
            "annual_growth_percent",
            "Annual growth must be above -100%",
        ));
    }
    for (field, score) in [
        ("amenities_score", input.amenities_score),
        ("transport_score", input.transport_score),
        ("schools_score", input.schools_score),
    ] {
        if matches!(score, Some(s) if s < Decimal::ZERO || s > dec!(100)) {
            return Err(EstateFinanceError::invalid(
                field,
                "Score must be between 0 and 100",
            ));
        }
    }

    // Unrounded prices; the reported series is rounded to paise.
    let mut prices = Vec::with_capacity(input.annual_growth_percent.len());
    let mut price = input.base_price_lakhs;
    for growth in &input.annual_growth_percent {
        price = price
            .checked_mul(Decimal::ONE + growth / dec!(100))
            .ok_or_else(|| {
                EstateFinanceError::invalid("annual_growth_percent", "Price series overflows")
            })?;
        prices.push(price);
    }
    let series: Vec<TrendPoint> = (input.first_year..)
        .zip(prices.iter().zip(&input.annual_growth_percent))
        .map(|(year, (price, growth))| TrendPoint {
            year,
            price_lakhs: price.round_dp(2),
            growth_percent: *growth,
        })
        .collect();

    let first = prices[0];
    let last = prices[prices.len() - 1];
    let one_year_change = if prices.len() > 1 {
        last - prices[prices.len() - 2]
    } else {
        Decimal::ZERO
    };
    let total_growth = (last - first)
        .checked_div(first)
        .and_then(|g| g.checked_mul(dec!(100)))
        .ok_or_else(|| {
            EstateFinanceError::invalid("base_price_lakhs", "Base price is too small to track")
        })?;
    let forecast = last.checked_mul(FORECAST_UPLIFT).ok_or_else(|| {
        EstateFinanceError::invalid("annual_growth_percent", "Forecast overflows")
    })?;
    let growth_sum = input
        .annual_growth_percent
        .iter()
        .try_fold(Decimal::ZERO, |acc, g| acc.checked_add(*g))
        .ok_or_else(|| {
            EstateFinanceError::invalid("annual_growth_percent", "Growth total overflows")
        })?;
    let average_growth = growth_sum / Decimal::from(input.annual_growth_percent.len());

    let mut market_insights = Vec::new();
    if average_growth > HIGH_GROWTH_THRESHOLD {
        market_insights.push("High growth potential area".to_string());
    }
    if matches!(input.transport_score, Some(s) if s > dec!(70)) {
        market_insights.push("Excellent connectivity".to_string());
    }
    if matches!(input.schools_score, Some(s) if s > dec!(75)) {
        market_insights.push("Family-friendly location".to_string());
    }

    let investment_rating = match input.amenities_score {
        Some(score) => InvestmentRating::from_amenities_score(score),
        None => {
            warnings.push("No amenities score supplied; rating defaults to Good".into());
            InvestmentRating::Good
        }
    };
    let recommendation = match investment_rating {
        InvestmentRating::Excellent | InvestmentRating::Good => Recommendation::Buy,
        InvestmentRating::Average => Recommendation::Hold,
    };

    let output = TrendOutput {
        location_name: input.location_name.clone(),
        total_growth_percent: total_growth.round_dp(1),
        average_annual_growth_percent: average_growth.round_dp(1),
        current_price_lakhs: last.round_dp(2),
        one_year_change_lakhs: one_year_change.round_dp(2),
        next_year_forecast_lakhs: forecast.round_dp(2),
        forecast_confidence: if series.len() >= MEDIUM_CONFIDENCE_YEARS {
            Confidence::Medium
        } else {
            Confidence::Low
        },
        investment_rating,
        recommendation,
        market_insights,
        series,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Compounded locality price trend",
        input,
        warnings,
        elapsed,
        output,
    ))
}
