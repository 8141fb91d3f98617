use chrono::{Months, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::error::EstateFinanceError;
use crate::loan::emi::{compute_emi, monthly_rate, tenure_months, LoanRequest};
use crate::types::{with_metadata, ComputationOutput, Money};
use crate::EstateFinanceResult;

/// Longest tenure a month-by-month schedule is produced for.
pub const MAX_SCHEDULE_YEARS: u32 = 50;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationInput {
    pub loan: LoanRequest,
    /// Disbursement date; installment `k` falls due `k` months later
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,
}

/// One monthly installment split into interest and principal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub month: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_date: Option<NaiveDate>,
    pub payment: Money,
    pub interest: Money,
    pub principal: Money,
    pub closing_balance: Money,
}

/// Interest and principal repaid in one loan year.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearSummary {
    pub year: u32,
    pub interest_paid: Money,
    pub principal_paid: Money,
    pub closing_balance: Money,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationOutput {
    pub monthly_payment: Money,
    pub total_payment: Money,
    pub total_interest: Money,
    pub schedule: Vec<AmortizationRow>,
    pub yearly: Vec<YearSummary>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Month-by-month repayment schedule for a level-EMI loan.
///
/// Interest accrues on the opening balance each month. The final installment
/// absorbs any residual so the loan closes at exactly zero.
pub fn build_amortization_schedule(
    input: &AmortizationInput,
) -> EstateFinanceResult<ComputationOutput<AmortizationOutput>> {
    let start = Instant::now();
    let warnings: Vec<String> = Vec::new();

    if input.loan.tenure_years > MAX_SCHEDULE_YEARS {
        return Err(EstateFinanceError::invalid(
            "tenure_years",
            format!("Schedules are limited to {MAX_SCHEDULE_YEARS} years"),
        ));
    }

    let emi = compute_emi(&input.loan)?.monthly_payment;
    let r = monthly_rate(input.loan.annual_rate_percent);
    let months = tenure_months(input.loan.tenure_years)?;

    let mut balance = input.loan.principal;
    let mut schedule = Vec::with_capacity(months as usize);
    let mut yearly = Vec::with_capacity(input.loan.tenure_years as usize);
    let mut total_payment = Decimal::ZERO;
    let mut total_interest = Decimal::ZERO;
    let mut year_interest = Decimal::ZERO;
    let mut year_principal = Decimal::ZERO;

    for month in 1..=months {
        let interest = balance * r;
        let (payment, principal) = if month == months {
            (interest + balance, balance)
        } else {
            (emi, emi - interest)
        };
        balance -= principal;

        total_payment += payment;
        total_interest += interest;
        year_interest += interest;
        year_principal += principal;

        schedule.push(AmortizationRow {
            month,
            payment_date: input
                .start_date
                .and_then(|d| d.checked_add_months(Months::new(month))),
            payment: payment.round_dp(2),
            interest: interest.round_dp(2),
            principal: principal.round_dp(2),
            closing_balance: balance.round_dp(2),
        });

        if month % 12 == 0 {
            yearly.push(YearSummary {
                year: month / 12,
                interest_paid: year_interest.round_dp(2),
                principal_paid: year_principal.round_dp(2),
                closing_balance: balance.round_dp(2),
            });
            year_interest = Decimal::ZERO;
            year_principal = Decimal::ZERO;
        }
    }

    let output = AmortizationOutput {
        monthly_payment: emi.round_dp(2),
        total_payment: total_payment.round_dp(2),
        total_interest: total_interest.round_dp(2),
        schedule,
        yearly,
    };

    let elapsed = start.elapsed().as_micros() as u64;

    Ok(with_metadata(
        "Reducing-balance amortization schedule",
        input,
        warnings,
        elapsed,
        output,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_input() -> AmortizationInput {
        AmortizationInput {
            loan: LoanRequest {
                principal: dec!(1200000),
                annual_rate_percent: dec!(9),
                tenure_years: 5,
            },
            start_date: None,
        }
    }

    #[test]
    fn test_schedule_closes_at_zero() {
        let out = build_amortization_schedule(&sample_input()).unwrap().result;
        assert_eq!(out.schedule.len(), 60);
        assert_eq!(out.yearly.len(), 5);
        assert_eq!(out.schedule.last().unwrap().closing_balance, Decimal::ZERO);
    }

    #[test]
    fn test_principal_repaid_equals_loan() {
        let out = build_amortization_schedule(&sample_input()).unwrap().result;
        let repaid: Decimal = out.yearly.iter().map(|y| y.principal_paid).sum();
        assert!((repaid - dec!(1200000)).abs() <= dec!(0.05), "got {repaid}");
    }

    #[test]
    fn test_totals_match_emi_calculation() {
        let input = sample_input();
        let emi = compute_emi(&input.loan).unwrap();
        let out = build_amortization_schedule(&input).unwrap().result;
        assert!((out.total_interest - emi.total_interest).abs() <= dec!(0.01));
        assert!((out.total_payment - emi.total_payment).abs() <= dec!(0.01));
    }

    #[test]
    fn test_interest_share_declines() {
        let out = build_amortization_schedule(&sample_input()).unwrap().result;
        assert!(out.yearly[0].interest_paid > out.yearly[4].interest_paid);
        assert!(out.schedule[0].interest > out.schedule[59].interest);
    }

    #[test]
    fn test_payment_dates_follow_start_date() {
        let mut input = sample_input();
        input.start_date = NaiveDate::from_ymd_opt(2024, 1, 31);
        let out = build_amortization_schedule(&input).unwrap().result;
        assert_eq!(out.schedule[0].payment_date, NaiveDate::from_ymd_opt(2024, 2, 29));
        assert_eq!(out.schedule[11].payment_date, NaiveDate::from_ymd_opt(2025, 1, 31));
    }

    #[test]
    fn test_zero_rate_schedule_has_no_interest() {
        let mut input = sample_input();
        input.loan.annual_rate_percent = Decimal::ZERO;
        let out = build_amortization_schedule(&input).unwrap().result;
        assert_eq!(out.total_interest, Decimal::ZERO);
        assert_eq!(out.schedule[0].principal, dec!(20000));
    }

    #[test]
    fn test_rejects_overlong_schedule() {
        let mut input = sample_input();
        input.loan.tenure_years = 60;
        assert!(build_amortization_schedule(&input).is_err());
    }
}
