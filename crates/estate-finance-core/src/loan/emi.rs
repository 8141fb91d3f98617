use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::error::EstateFinanceError;
use crate::time_value::annuity_payment;
use crate::types::{with_metadata, ComputationOutput, Money, Percent};
use crate::EstateFinanceResult;

const MONTHS_PER_YEAR: u32 = 12;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// An amortizing home loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanRequest {
    /// Amount borrowed, in rupees
    pub principal: Money,
    /// Nominal annual interest rate as a percentage (8.5 = 8.5% p.a.)
    pub annual_rate_percent: Percent,
    /// Loan tenure in whole years
    pub tenure_years: u32,
}

/// Repayment totals for a [`LoanRequest`], at full working precision.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSchedule {
    pub monthly_payment: Money,
    pub total_payment: Money,
    pub total_interest: Money,
}

/// Reported EMI breakdown, rounded to paise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmiOutput {
    pub principal: Money,
    pub annual_rate_percent: Percent,
    pub tenure_years: u32,
    pub months: u32,
    pub monthly_payment: Money,
    pub total_payment: Money,
    pub total_interest: Money,
    /// Total interest as a percentage of principal
    pub interest_to_principal_percent: Percent,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Monthly rate as a decimal fraction: R / 100 / 12.
pub fn monthly_rate(annual_rate_percent: Percent) -> Decimal {
    annual_rate_percent / dec!(100) / Decimal::from(MONTHS_PER_YEAR)
}

/// Number of monthly installments in `tenure_years`.
pub fn tenure_months(tenure_years: u32) -> EstateFinanceResult<u32> {
    tenure_years.checked_mul(MONTHS_PER_YEAR).ok_or_else(|| {
        EstateFinanceError::invalid("tenure_years", "Tenure is too long to express in months")
    })
}

/// Equal monthly installment, total payable and total interest of a loan.
///
/// Nothing is rounded; `total_interest` is always `total_payment - principal`.
/// At a zero rate the total repaid is exactly the principal.
pub fn compute_emi(request: &LoanRequest) -> EstateFinanceResult<LoanSchedule> {
    validate_request(request)?;

    let r = monthly_rate(request.annual_rate_percent);
    let n = tenure_months(request.tenure_years)?;
    let monthly_payment = annuity_payment(request.principal, r, n)?;

    let total_payment = if r.is_zero() {
        request.principal
    } else {
        monthly_payment.checked_mul(Decimal::from(n)).ok_or_else(|| {
            EstateFinanceError::invalid("rate", "Total repayment overflows the decimal range")
        })?
    };
    let total_interest = total_payment - request.principal;

    debug!(
        principal = %request.principal,
        monthly_rate = %r,
        months = n,
        emi = %monthly_payment,
        "computed EMI"
    );

    Ok(LoanSchedule {
        monthly_payment,
        total_payment,
        total_interest,
    })
}

/// EMI breakdown rounded to two decimal places, with advisory warnings.
pub fn calculate_emi(request: &LoanRequest) -> EstateFinanceResult<ComputationOutput<EmiOutput>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let schedule = compute_emi(request)?;
    let months = tenure_months(request.tenure_years)?;

    if request.annual_rate_percent > dec!(20) {
        warnings.push(format!(
            "Interest rate {}% p.a. is far above typical home-loan rates",
            request.annual_rate_percent
        ));
    }
    if request.tenure_years > 30 {
        warnings.push(format!(
            "Tenure of {} years exceeds the usual 30-year home-loan maximum",
            request.tenure_years
        ));
    }

    let output = EmiOutput {
        principal: request.principal,
        annual_rate_percent: request.annual_rate_percent,
        tenure_years: request.tenure_years,
        months,
        monthly_payment: schedule.monthly_payment.round_dp(2),
        total_payment: schedule.total_payment.round_dp(2),
        total_interest: schedule.total_interest.round_dp(2),
        interest_to_principal_percent: schedule
            .total_interest
            .checked_div(request.principal)
            .and_then(|ratio| ratio.checked_mul(dec!(100)))
            .ok_or_else(|| {
                EstateFinanceError::invalid("rate", "Interest-to-principal ratio overflows")
            })?
            .round_dp(2),
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Equal Monthly Installment (reducing-balance annuity)",
        request,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate_request(request: &LoanRequest) -> EstateFinanceResult<()> {
    if request.principal <= Decimal::ZERO {
        return Err(EstateFinanceError::invalid(
            "principal",
            "Loan principal must be positive",
        ));
    }
    if request.tenure_years == 0 {
        return Err(EstateFinanceError::invalid(
            "tenure_years",
            "Tenure must be at least 1 year",
        ));
    }
    if request.annual_rate_percent < Decimal::ZERO {
        return Err(EstateFinanceError::invalid(
            "annual_rate_percent",
            "Interest rate cannot be negative",
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_request() -> LoanRequest {
        LoanRequest {
            principal: dec!(5000000), // 50 lakh
            annual_rate_percent: dec!(8.5),
            tenure_years: 20,
        }
    }

    #[test]
    fn test_reference_emi() {
        let schedule = compute_emi(&sample_request()).unwrap();
        // 50L @ 8.5% over 20 years ≈ ₹43,391 per month
        assert!(
            (schedule.monthly_payment - dec!(43391)).abs() <= dec!(1),
            "got {}",
            schedule.monthly_payment
        );
    }

    #[test]
    fn test_interest_is_total_minus_principal() {
        let req = sample_request();
        let schedule = compute_emi(&req).unwrap();
        assert_eq!(schedule.total_interest, schedule.total_payment - req.principal);
        assert!(schedule.total_interest > Decimal::ZERO);
    }

    #[test]
    fn test_zero_rate_branch() {
        let req = LoanRequest {
            principal: dec!(1000000),
            annual_rate_percent: Decimal::ZERO,
            tenure_years: 20,
        };
        let schedule = compute_emi(&req).unwrap();
        assert_eq!(schedule.monthly_payment, dec!(1000000) / dec!(240));
        assert_eq!(schedule.total_payment, dec!(1000000));
        assert_eq!(schedule.total_interest, Decimal::ZERO);
    }

    #[test]
    fn test_zero_rate_interest_never_negative() {
        // 1/12 is non-terminating, so P/n * n would land just below P
        let req = LoanRequest {
            principal: dec!(1),
            annual_rate_percent: Decimal::ZERO,
            tenure_years: 1,
        };
        let schedule = compute_emi(&req).unwrap();
        assert_eq!(schedule.total_payment, dec!(1));
        assert!(schedule.total_interest >= Decimal::ZERO);
    }

    #[test]
    fn test_absurd_rate_is_invalid_input() {
        let req = LoanRequest {
            principal: dec!(1000000),
            annual_rate_percent: dec!(200),
            tenure_years: 30,
        };
        match compute_emi(&req) {
            Err(EstateFinanceError::InvalidInput { field, .. }) => assert_eq!(field, "rate"),
            other => panic!("expected InvalidInput on rate, got {other:?}"),
        }
        assert!(calculate_emi(&req).is_err());
    }

    #[test]
    fn test_rejects_non_positive_principal() {
        let mut req = sample_request();
        req.principal = Decimal::ZERO;
        match compute_emi(&req).unwrap_err() {
            EstateFinanceError::InvalidInput { field, .. } => assert_eq!(field, "principal"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_rejects_zero_tenure() {
        let mut req = sample_request();
        req.tenure_years = 0;
        assert!(compute_emi(&req).is_err());
    }

    #[test]
    fn test_rejects_negative_rate() {
        let mut req = sample_request();
        req.annual_rate_percent = dec!(-0.5);
        assert!(compute_emi(&req).is_err());
    }

    #[test]
    fn test_reported_values_are_rounded() {
        let out = calculate_emi(&sample_request()).unwrap();
        let r = &out.result;
        assert_eq!(r.months, 240);
        assert_eq!(r.monthly_payment, r.monthly_payment.round_dp(2));
        assert_eq!(r.total_interest, r.total_interest.round_dp(2));
        assert!(out.warnings.is_empty());
    }

    #[test]
    fn test_high_rate_warns() {
        let mut req = sample_request();
        req.annual_rate_percent = dec!(24);
        let out = calculate_emi(&req).unwrap();
        assert_eq!(out.warnings.len(), 1);
    }
}
