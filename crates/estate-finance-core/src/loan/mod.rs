pub mod amortization;
pub mod eligibility;
pub mod emi;
pub mod property_emi;
