use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::error::EstateFinanceError;
use crate::loan::emi::{compute_emi, LoanRequest, LoanSchedule};
use crate::types::{lakhs_to_rupees, with_metadata, ComputationOutput, Lakhs, Money, Percent};
use crate::EstateFinanceResult;

/// Share of monthly income a lender lets an EMI consume (40% rule).
pub const AFFORDABILITY_RATIO: Decimal = dec!(0.4);

/// Registration, stamp duty and allied charges as a share of property price.
pub const REGISTRATION_COST_RATE: Decimal = dec!(0.07);

pub const DEFAULT_DOWN_PAYMENT_PERCENT: Percent = dec!(20);
pub const DEFAULT_RATE_PERCENT: Percent = dec!(8.5);
pub const DEFAULT_TENURE_YEARS: u32 = 20;

fn default_down_payment_percent() -> Percent {
    DEFAULT_DOWN_PAYMENT_PERCENT
}

fn default_rate_percent() -> Percent {
    DEFAULT_RATE_PERCENT
}

fn default_tenure_years() -> u32 {
    DEFAULT_TENURE_YEARS
}

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Financing a specific property with a down payment.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyEmiInput {
    /// Listed property price in lakhs
    pub property_price_lakhs: Lakhs,
    /// Share of the price paid upfront, 0–100
    #[serde(default = "default_down_payment_percent")]
    pub down_payment_percent: Percent,
    #[serde(default = "default_rate_percent")]
    pub annual_rate_percent: Percent,
    #[serde(default = "default_tenure_years")]
    pub tenure_years: u32,
}

/// Full cost picture of buying a property on a home loan. Rupee amounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PropertyEmiOutput {
    pub property_price: Money,
    pub down_payment: Money,
    pub loan_amount: Money,
    pub monthly_payment: Money,
    pub total_interest: Money,
    /// Price plus all interest paid over the tenure
    pub total_cost: Money,
    pub registration_cost: Money,
    /// Cash needed at purchase: down payment plus registration
    pub upfront_cost: Money,
    /// Gross monthly income at which the EMI hits the affordability ratio
    pub monthly_income_required: Money,
    pub annual_rate_percent: Percent,
    pub tenure_years: u32,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Down payment, loan, EMI and upfront costs for a property purchase.
pub fn calculate_property_emi(
    input: &PropertyEmiInput,
) -> EstateFinanceResult<ComputationOutput<PropertyEmiOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_input(input)?;

    let property_price = lakhs_to_rupees(input.property_price_lakhs)?;
    let down_payment = property_price * (input.down_payment_percent / dec!(100));
    let loan_amount = property_price - down_payment;

    let schedule = if loan_amount > Decimal::ZERO {
        compute_emi(&LoanRequest {
            principal: loan_amount,
            annual_rate_percent: input.annual_rate_percent,
            tenure_years: input.tenure_years,
        })?
    } else {
        warnings.push("Down payment covers the full price; no loan is required".into());
        LoanSchedule {
            monthly_payment: Decimal::ZERO,
            total_payment: Decimal::ZERO,
            total_interest: Decimal::ZERO,
        }
    };

    let total_cost = property_price
        .checked_add(schedule.total_interest)
        .ok_or_else(|| too_large("Total cost of ownership overflows the decimal range"))?;
    let registration_cost = property_price * REGISTRATION_COST_RATE;
    let upfront_cost = down_payment + registration_cost;
    let monthly_income_required = schedule
        .monthly_payment
        .checked_div(AFFORDABILITY_RATIO)
        .ok_or_else(|| too_large("Required income overflows the decimal range"))?;

    if input.down_payment_percent < dec!(10) {
        warnings.push(format!(
            "Down payment of {}% is below the 10% most lenders require",
            input.down_payment_percent
        ));
    }

    debug!(
        property_price = %property_price,
        loan_amount = %loan_amount,
        emi = %schedule.monthly_payment,
        "computed property EMI"
    );

    let output = PropertyEmiOutput {
        property_price,
        down_payment: down_payment.round_dp(2),
        loan_amount: loan_amount.round_dp(2),
        monthly_payment: schedule.monthly_payment.round_dp(2),
        total_interest: schedule.total_interest.round_dp(2),
        total_cost: total_cost.round_dp(2),
        registration_cost: registration_cost.round_dp(2),
        upfront_cost: upfront_cost.round_dp(2),
        monthly_income_required: monthly_income_required.round_dp(2),
        annual_rate_percent: input.annual_rate_percent,
        tenure_years: input.tenure_years,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Property EMI with down payment and registration costs",
        input,
        warnings,
        elapsed,
        output,
    ))
}

fn too_large(reason: &str) -> EstateFinanceError {
    EstateFinanceError::invalid("property_price_lakhs", reason)
}

fn validate_input(input: &PropertyEmiInput) -> EstateFinanceResult<()> {
    if input.property_price_lakhs <= Decimal::ZERO {
        return Err(EstateFinanceError::invalid(
            "property_price_lakhs",
            "Property price must be positive",
        ));
    }
    if input.down_payment_percent < Decimal::ZERO || input.down_payment_percent > dec!(100) {
        return Err(EstateFinanceError::invalid(
            "down_payment_percent",
            "Down payment must be between 0 and 100 percent",
        ));
    }
    if input.tenure_years == 0 {
        return Err(EstateFinanceError::invalid(
            "tenure_years",
            "Tenure must be at least 1 year",
        ));
    }
    if input.annual_rate_percent < Decimal::ZERO {
        return Err(EstateFinanceError::invalid(
            "annual_rate_percent",
            "Interest rate cannot be negative",
        ));
    }
    Ok(())
}
