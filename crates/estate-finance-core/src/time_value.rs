use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;

use crate::error::EstateFinanceError;
use crate::types::Money;
use crate::EstateFinanceResult;

/// Growth of one unit over `periods` compounding periods: (1 + rate)^periods
pub fn compound_factor(periodic_rate: Decimal, periods: u32) -> EstateFinanceResult<Decimal> {
    (Decimal::ONE + periodic_rate)
        .checked_powu(u64::from(periods))
        .ok_or_else(|| {
            EstateFinanceError::invalid(
                "rate",
                format!("(1 + {periodic_rate})^{periods} overflows the decimal range"),
            )
        })
}

/// Level payment that fully amortizes `principal` over `periods`.
///
/// `P * r * (1+r)^n / ((1+r)^n - 1)`, or `P / n` when the periodic rate is
/// exactly zero. Any non-zero rate, however small, takes the annuity branch.
pub fn annuity_payment(
    principal: Money,
    periodic_rate: Decimal,
    periods: u32,
) -> EstateFinanceResult<Money> {
    if periods == 0 {
        return Err(EstateFinanceError::invalid(
            "periods",
            "Number of payments must be > 0",
        ));
    }

    let n = Decimal::from(periods);
    if periodic_rate.is_zero() {
        return Ok(principal / n);
    }

    let factor = compound_factor(periodic_rate, periods)?;
    let numerator = principal
        .checked_mul(periodic_rate)
        .and_then(|v| v.checked_mul(factor))
        .ok_or_else(|| out_of_range(periodic_rate, periods))?;
    numerator
        .checked_div(factor - Decimal::ONE)
        .ok_or_else(|| below_resolution(periodic_rate))
}

/// Principal that a level `payment` amortizes over `periods` (inverse of
/// [`annuity_payment`]).
pub fn annuity_present_value(
    payment: Money,
    periodic_rate: Decimal,
    periods: u32,
) -> EstateFinanceResult<Money> {
    let n = Decimal::from(periods);
    if periodic_rate.is_zero() {
        return payment
            .checked_mul(n)
            .ok_or_else(|| out_of_range(periodic_rate, periods));
    }

    let factor = compound_factor(periodic_rate, periods)?;
    let numerator = payment
        .checked_mul(factor - Decimal::ONE)
        .ok_or_else(|| out_of_range(periodic_rate, periods))?;
    let denominator = periodic_rate
        .checked_mul(factor)
        .ok_or_else(|| out_of_range(periodic_rate, periods))?;
    numerator
        .checked_div(denominator)
        .ok_or_else(|| below_resolution(periodic_rate))
}

fn out_of_range(periodic_rate: Decimal, periods: u32) -> EstateFinanceError {
    EstateFinanceError::invalid(
        "rate",
        format!("Annuity at {periodic_rate} over {periods} periods overflows the decimal range"),
    )
}

fn below_resolution(periodic_rate: Decimal) -> EstateFinanceError {
    EstateFinanceError::invalid(
        "rate",
        format!("Periodic rate {periodic_rate} is outside the range decimal arithmetic can resolve"),
    )
}
