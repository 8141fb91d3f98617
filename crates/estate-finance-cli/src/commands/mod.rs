pub mod loan;
pub mod pricing;
