use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::error::EstateFinanceError;
use crate::types::{lakhs_to_rupees, with_metadata, ComputationOutput, Lakhs, Money, Multiplier};
use crate::EstateFinanceResult;

/// Flat base price of a 1,000 sqft home in lakhs
pub const BASE_PRICE_LAKHS: Lakhs = dec!(50);

/// No estimate is ever reported below this many lakhs.
pub const MINIMUM_PRICE_LAKHS: Lakhs = dec!(10);

pub const REFERENCE_AREA_SQFT: Decimal = dec!(1000);

/// Localities that command a premium, matched as lowercase substrings.
pub const PREMIUM_LOCATIONS: [&str; 4] = ["whitefield", "koramangala", "indiranagar", "jayanagar"];

pub const PREMIUM_LOCATION_MULTIPLIER: Multiplier = dec!(1.4);

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Room-count band read from a size descriptor such as "3 BHK".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SizeTier {
    FourRoom,
    ThreeRoom,
    OneRoom,
    /// Two rooms or anything unrecognised
    Standard,
}

impl SizeTier {
    /// Digits are checked in the order 4, 3, 1: "1 or 4 BHK" is a four-room home.
    pub fn from_descriptor(descriptor: &str) -> Self {
        if descriptor.contains('4') {
            SizeTier::FourRoom
        } else if descriptor.contains('3') {
            SizeTier::ThreeRoom
        } else if descriptor.contains('1') {
            SizeTier::OneRoom
        } else {
            SizeTier::Standard
        }
    }

    pub fn multiplier(self) -> Multiplier {
        match self {
            SizeTier::FourRoom => dec!(1.6),
            SizeTier::ThreeRoom => dec!(1.3),
            SizeTier::OneRoom => dec!(0.7),
            SizeTier::Standard => Decimal::ONE,
        }
    }
}

/// Whether a locality name falls in one of the [`PREMIUM_LOCATIONS`].
pub fn is_premium_location(location_name: &str) -> bool {
    let location = location_name.to_lowercase();
    PREMIUM_LOCATIONS.iter().any(|p| location.contains(p))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePredictionInput {
    #[serde(alias = "location")]
    pub location_name: String,
    /// Free-form size such as "2 BHK" or "4 Bedroom"
    #[serde(alias = "size")]
    pub size_descriptor: String,
    #[serde(alias = "total_sqft")]
    pub total_area_sqft: Decimal,
}

#[cfg(feature = "guard")]
impl PricePredictionInput {
    /// Strip markup and control characters from both free-text fields.
    pub fn sanitized(self) -> Self {
        use crate::guard::sanitize_text;

        PricePredictionInput {
            location_name: sanitize_text(&self.location_name).into_owned(),
            size_descriptor: sanitize_text(&self.size_descriptor).into_owned(),
            total_area_sqft: self.total_area_sqft,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricePrediction {
    pub estimated_price_lakhs: Lakhs,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceEstimateOutput {
    pub estimated_price_lakhs: Lakhs,
    pub estimated_price_rupees: Money,
    pub price_per_sqft: Money,
    pub size_tier: SizeTier,
    pub premium_location: bool,
    /// True when the minimum price replaced a lower heuristic value
    pub floor_applied: bool,
    /// Random scaling applied before the floor, when the estimate was jittered
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jitter_factor: Option<Multiplier>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Deterministic heuristic price estimate in lakhs, floored at [`MINIMUM_PRICE_LAKHS`].
pub fn estimate_property_price(input: &PricePredictionInput) -> EstateFinanceResult<PricePrediction> {
    let raw = heuristic_price(input)?;
    Ok(PricePrediction {
        estimated_price_lakhs: raw.max(MINIMUM_PRICE_LAKHS),
    })
}

/// Reported price estimate with per-sqft figures and the factors applied.
pub fn predict_price(
    input: &PricePredictionInput,
) -> EstateFinanceResult<ComputationOutput<PriceEstimateOutput>> {
    let start = Instant::now();
    let raw = heuristic_price(input)?;
    let (output, warnings) = report_estimate(input, raw, None)?;

    Ok(with_metadata(
        "Heuristic price estimate (area, room count, locality premium)",
        input,
        warnings,
        start.elapsed().as_micros() as u64,
        output,
    ))
}

/// Heuristic estimate scaled by a seeded random factor in [0.9, 1.1].
///
/// The same seed always yields the same estimate. The floor is applied after
/// the factor.
#[cfg(feature = "jitter")]
pub fn estimate_with_jitter(
    input: &PricePredictionInput,
    seed: u64,
) -> EstateFinanceResult<PricePrediction> {
    let (jittered, _) = jittered_price(input, seed)?;
    Ok(PricePrediction {
        estimated_price_lakhs: jittered.max(MINIMUM_PRICE_LAKHS),
    })
}

/// Reported variant of [`estimate_with_jitter`], carrying the factor drawn.
#[cfg(feature = "jitter")]
pub fn predict_price_with_jitter(
    input: &PricePredictionInput,
    seed: u64,
) -> EstateFinanceResult<ComputationOutput<PriceEstimateOutput>> {
    let start = Instant::now();
    let (jittered, factor) = jittered_price(input, seed)?;
    let (output, warnings) = report_estimate(input, jittered, Some(factor))?;

    Ok(with_metadata(
        "Heuristic price estimate with seeded market jitter",
        &serde_json::json!({ "input": input, "seed": seed }),
        warnings,
        start.elapsed().as_micros() as u64,
        output,
    ))
}

#[cfg(feature = "jitter")]
fn jittered_price(
    input: &PricePredictionInput,
    seed: u64,
) -> EstateFinanceResult<(Lakhs, Multiplier)> {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    let raw = heuristic_price(input)?;
    let mut rng = StdRng::seed_from_u64(seed);
    let factor = dec!(0.9) + Decimal::new(rng.gen_range(0..=20_000), 5);
    debug!(seed, factor = %factor, "applying price jitter");

    Ok((scale(raw, factor)?, factor))
}

fn report_estimate(
    input: &PricePredictionInput,
    raw: Lakhs,
    jitter_factor: Option<Multiplier>,
) -> EstateFinanceResult<(PriceEstimateOutput, Vec<String>)> {
    let mut warnings: Vec<String> = Vec::new();

    let floor_applied = raw < MINIMUM_PRICE_LAKHS;
    let price = raw.max(MINIMUM_PRICE_LAKHS);
    if floor_applied {
        warnings.push(format!(
            "Heuristic value {} lakhs is below the {MINIMUM_PRICE_LAKHS} lakh minimum; minimum reported",
            raw.round_dp(2)
        ));
    }

    let rupees = lakhs_to_rupees(price)?;
    let output = PriceEstimateOutput {
        estimated_price_lakhs: price.round_dp(2),
        estimated_price_rupees: rupees.round_dp(2),
        price_per_sqft: per_sqft(rupees, input.total_area_sqft)?,
        size_tier: SizeTier::from_descriptor(&input.size_descriptor),
        premium_location: is_premium_location(&input.location_name),
        floor_applied,
        jitter_factor,
    };
    Ok((output, warnings))
}

/// Rupees per square foot, rounded to paise.
pub(crate) fn per_sqft(rupees: Money, area_sqft: Decimal) -> EstateFinanceResult<Money> {
    rupees
        .checked_div(area_sqft)
        .map(|v| v.round_dp(2))
        .ok_or_else(|| {
            EstateFinanceError::invalid("total_area_sqft", "Price per sqft is not representable")
        })
}

fn scale(price: Lakhs, factor: Multiplier) -> EstateFinanceResult<Lakhs> {
    price.checked_mul(factor).ok_or_else(|| {
        EstateFinanceError::invalid("total_area_sqft", "Area is too large to price")
    })
}

// ---------------------------------------------------------------------------
// Heuristic
// ---------------------------------------------------------------------------

fn heuristic_price(input: &PricePredictionInput) -> EstateFinanceResult<Lakhs> {
    if input.total_area_sqft <= Decimal::ZERO {
        return Err(EstateFinanceError::invalid(
            "total_area_sqft",
            "Total area must be positive",
        ));
    }

    let tier = SizeTier::from_descriptor(&input.size_descriptor);
    let premium = is_premium_location(&input.location_name);

    let mut price = scale(BASE_PRICE_LAKHS, input.total_area_sqft / REFERENCE_AREA_SQFT)?;
    price = scale(price, tier.multiplier())?;
    if premium {
        price = scale(price, PREMIUM_LOCATION_MULTIPLIER)?;
    }

    debug!(
        location = %input.location_name,
        tier = ?tier,
        premium,
        price = %price,
        "heuristic price before floor"
    );

    Ok(price)
}
