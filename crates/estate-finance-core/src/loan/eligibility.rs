use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::warn;

use crate::error::EstateFinanceError;
use crate::loan::emi::{monthly_rate, tenure_months};
use crate::loan::property_emi::AFFORDABILITY_RATIO;
use crate::time_value::annuity_present_value;
use crate::types::{with_metadata, ComputationOutput, Lakhs, Money, Percent, RUPEES_PER_LAKH};
use crate::EstateFinanceResult;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityInput {
    /// Net monthly income in rupees
    pub monthly_income: Money,
    /// EMIs already being serviced each month
    #[serde(default)]
    pub existing_obligations: Money,
    pub annual_rate_percent: Percent,
    pub tenure_years: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EligibilityOutput {
    /// Largest new EMI the income supports
    pub max_monthly_payment: Money,
    /// Largest loan that EMI amortizes over the tenure
    pub max_loan_amount: Money,
    pub max_loan_lakhs: Lakhs,
    /// Existing obligations as a share of income
    pub current_obligation_percent: Percent,
}

/// Largest home loan an income qualifies for under the affordability rule.
pub fn calculate_eligibility(
    input: &EligibilityInput,
) -> EstateFinanceResult<ComputationOutput<EligibilityOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if input.monthly_income <= Decimal::ZERO {
        return Err(EstateFinanceError::invalid(
            "monthly_income",
            "Monthly income must be positive",
        ));
    }
    if input.existing_obligations < Decimal::ZERO {
        return Err(EstateFinanceError::invalid(
            "existing_obligations",
            "Existing obligations cannot be negative",
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

    let budget = input.monthly_income * AFFORDABILITY_RATIO - input.existing_obligations;
    let max_monthly_payment = if budget > Decimal::ZERO {
        budget
    } else {
        warn!(
            income = %input.monthly_income,
            obligations = %input.existing_obligations,
            "existing obligations exhaust the affordability budget"
        );
        warnings.push(
            "Existing obligations already use the full affordability budget; no new loan fits"
                .into(),
        );
        Decimal::ZERO
    };

    let max_loan_amount = annuity_present_value(
        max_monthly_payment,
        monthly_rate(input.annual_rate_percent),
        tenure_months(input.tenure_years)?,
    )?;

    let output = EligibilityOutput {
        max_monthly_payment: max_monthly_payment.round_dp(2),
        max_loan_amount: max_loan_amount.round_dp(2),
        max_loan_lakhs: (max_loan_amount / RUPEES_PER_LAKH).round_dp(2),
        current_obligation_percent: input
            .existing_obligations
            .checked_div(input.monthly_income)
            .and_then(|share| share.checked_mul(dec!(100)))
            .ok_or_else(|| {
                EstateFinanceError::invalid(
                    "monthly_income",
                    "Obligations are too large relative to income",
                )
            })?
            .round_dp(2),
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Loan eligibility (EMI capped at 40% of income)",
        input,
        warnings,
        elapsed,
        output,
    ))
}
