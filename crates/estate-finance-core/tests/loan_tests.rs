use estate_finance_core::loan::amortization::{build_amortization_schedule, AmortizationInput};
use estate_finance_core::loan::emi::{self, LoanRequest};
use estate_finance_core::loan::property_emi::{self, PropertyEmiInput, AFFORDABILITY_RATIO};
use estate_finance_core::EstateFinanceError;
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn loan(principal: Decimal, rate: Decimal, years: u32) -> LoanRequest {
    LoanRequest {
        principal,
        annual_rate_percent: rate,
        tenure_years: years,
    }
}

// ===========================================================================
// EMI
// ===========================================================================

#[test]
fn test_fifty_lakh_loan_reference_emi() {
    // Loan-calculator reference: ₹50,00,000 @ 8.5% for 20 years ≈ ₹43,391
    let schedule = emi::compute_emi(&loan(dec!(5000000), dec!(8.5), 20)).unwrap();
    assert!(
        (schedule.monthly_payment - dec!(43391)).abs() <= dec!(1),
        "Expected EMI ~43,391, got {}",
        schedule.monthly_payment
    );
    let reported = emi::calculate_emi(&loan(dec!(5000000), dec!(8.5), 20)).unwrap();
    assert_eq!(reported.result.monthly_payment, dec!(43391.16));
}

#[test]
fn test_zero_rate_emi_is_exact_division() {
    for (p, years) in [(dec!(1000000), 20u32), (dec!(750000), 7), (dec!(1), 1), (dec!(999999.99), 30)] {
        let schedule = emi::compute_emi(&loan(p, Decimal::ZERO, years)).unwrap();
        assert_eq!(schedule.monthly_payment, p / Decimal::from(years * 12));
    }
}

#[test]
fn test_interest_identity_holds_across_inputs() {
    let cases = [
        (dec!(5000000), dec!(8.5), 20u32),
        (dec!(250000), dec!(12.75), 3),
        (dec!(10000000), dec!(6.9), 30),
        (dec!(100), dec!(0.01), 1),
        (dec!(3300000), Decimal::ZERO, 15),
    ];
    for (p, r, t) in cases {
        let s = emi::compute_emi(&loan(p, r, t)).unwrap();
        assert_eq!(s.total_interest, s.total_payment - p);
        assert!(s.monthly_payment > Decimal::ZERO);
        assert!(s.total_interest >= Decimal::ZERO, "negative interest for {p} @ {r}% / {t}y");
        if r > Decimal::ZERO {
            assert!(s.total_interest > Decimal::ZERO);
        }
    }
}

#[test]
fn test_zero_rate_repays_exactly_principal() {
    // Non-terminating quotients like 1/12 and 100/36 must not leave a residue
    for (p, years) in [(dec!(1), 1u32), (dec!(100), 3), (dec!(999999.99), 7), (dec!(2500000), 30)] {
        let s = emi::compute_emi(&loan(p, Decimal::ZERO, years)).unwrap();
        assert_eq!(s.total_payment, p);
        assert_eq!(s.total_interest, Decimal::ZERO);
    }
}

#[test]
fn test_absurd_inputs_are_rejected_not_panics() {
    for req in [
        loan(dec!(1000000), dec!(200), 30),
        loan(Decimal::MAX, dec!(8.5), 20),
        loan(dec!(1000000), dec!(5000), 50),
    ] {
        assert!(
            matches!(emi::compute_emi(&req), Err(EstateFinanceError::InvalidInput { .. })),
            "expected InvalidInput for {req:?}"
        );
    }

    let huge_property = PropertyEmiInput {
        property_price_lakhs: Decimal::MAX,
        down_payment_percent: dec!(20),
        annual_rate_percent: dec!(8.5),
        tenure_years: 20,
    };
    assert!(matches!(
        property_emi::calculate_property_emi(&huge_property),
        Err(EstateFinanceError::InvalidInput { .. })
    ));
}

#[test]
fn test_emi_is_idempotent() {
    let req = loan(dec!(4200000), dec!(9.15), 25);
    let a = emi::compute_emi(&req).unwrap();
    let b = emi::compute_emi(&req).unwrap();
    assert_eq!(a, b);
}

#[test]
fn test_emi_invalid_inputs() {
    let bad = [
        loan(dec!(-1), dec!(8.5), 20),
        loan(Decimal::ZERO, dec!(8.5), 20),
        loan(dec!(100000), dec!(8.5), 0),
        loan(dec!(100000), dec!(-1), 20),
    ];
    for req in bad {
        assert!(matches!(
            emi::compute_emi(&req),
            Err(EstateFinanceError::InvalidInput { .. })
        ));
    }
}

// ===========================================================================
// Property EMI
// ===========================================================================

#[test]
fn test_property_emi_composes_loan_emi() {
    let input = PropertyEmiInput {
        property_price_lakhs: dec!(62.5),
        down_payment_percent: dec!(25),
        annual_rate_percent: dec!(8.5),
        tenure_years: 20,
    };
    let out = property_emi::calculate_property_emi(&input).unwrap().result;
    let direct = emi::compute_emi(&loan(dec!(4687500), dec!(8.5), 20)).unwrap();

    assert_eq!(out.loan_amount, dec!(4687500));
    assert_eq!(out.monthly_payment, direct.monthly_payment.round_dp(2));
    assert_eq!(
        out.monthly_income_required,
        (direct.monthly_payment / AFFORDABILITY_RATIO).round_dp(2)
    );
    assert_eq!(out.upfront_cost, dec!(1562500) + dec!(437500));
}

// ===========================================================================
// Amortization
// ===========================================================================

#[test]
fn test_amortization_first_month_split() {
    let input = AmortizationInput {
        loan: loan(dec!(5000000), dec!(8.5), 20),
        start_date: None,
    };
    let out = build_amortization_schedule(&input).unwrap().result;
    let first = &out.schedule[0];
    // Month 1 interest = 50,00,000 × 8.5% / 12 = 35,416.67
    assert_eq!(first.interest, dec!(35416.67));
    assert_eq!(first.payment, dec!(43391.16));
    assert_eq!(out.yearly.len(), 20);
}
