use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::EstateFinanceError;
use crate::EstateFinanceResult;

/// Monetary amounts in rupees. Wraps Decimal to prevent accidental f64 usage.
pub type Money = Decimal;

/// Rates expressed as percentages (8.5 = 8.5%), the convention of every loan form.
pub type Percent = Decimal;

/// Property prices quoted in lakhs (1 lakh = 100,000 rupees)
pub type Lakhs = Decimal;

/// Dimensionless scaling factors (1.4x premium, 0.7x studio discount)
pub type Multiplier = Decimal;

/// Rupees in one lakh
pub const RUPEES_PER_LAKH: Decimal = dec!(100000);

/// Convert a lakh-denominated price into rupees.
pub fn lakhs_to_rupees(lakhs: Lakhs) -> EstateFinanceResult<Money> {
    lakhs.checked_mul(RUPEES_PER_LAKH).ok_or_else(|| {
        EstateFinanceError::invalid(
            "price_lakhs",
            format!("{lakhs} lakhs is too large to express in rupees"),
        )
    })
}

/// Standard computation output envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationOutput<T: Serialize> {
    pub result: T,
    pub methodology: String,
    pub assumptions: serde_json::Value,
    pub warnings: Vec<String>,
    pub metadata: ComputationMetadata,
}

/// Metadata for every computation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComputationMetadata {
    pub version: String,
    pub computation_time_us: u64,
    pub precision: String,
}

/// Helper to wrap computation results with metadata
pub fn with_metadata<T: Serialize>(
    methodology: &str,
    assumptions: &impl Serialize,
    warnings: Vec<String>,
    elapsed_us: u64,
    result: T,
) -> ComputationOutput<T> {
    ComputationOutput {
        result,
        methodology: methodology.to_string(),
        assumptions: serde_json::to_value(assumptions).unwrap_or_default(),
        warnings,
        metadata: ComputationMetadata {
            version: env!("CARGO_PKG_VERSION").to_string(),
            computation_time_us: elapsed_us,
            precision: "rust_decimal_128bit".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lakhs_to_rupees() {
        assert_eq!(lakhs_to_rupees(dec!(50)).unwrap(), dec!(5000000));
        assert_eq!(lakhs_to_rupees(dec!(0.5)).unwrap(), dec!(50000));
    }

    #[test]
    fn test_lakhs_to_rupees_overflow() {
        assert!(lakhs_to_rupees(Decimal::from_scientific("1e24").unwrap()).is_err());
        assert!(lakhs_to_rupees(Decimal::MAX).is_err());
    }

    #[test]
    fn test_envelope_carries_warnings_and_version() {
        let out = with_metadata("test", &"inputs", vec!["careful".into()], 7, dec!(1));
        assert_eq!(out.warnings, vec!["careful".to_string()]);
        assert_eq!(out.metadata.computation_time_us, 7);
        assert_eq!(out.metadata.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(out.assumptions, serde_json::json!("inputs"));
    }
}
