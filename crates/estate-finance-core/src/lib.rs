pub mod error;
pub mod time_value;
pub mod types;

#[cfg(feature = "loan")]
pub mod loan;

#[cfg(feature = "pricing")]
pub mod pricing;

#[cfg(feature = "guard")]
pub mod guard;

pub use error::EstateFinanceError;
pub use types::*;

/// Standard result type for all estate-finance operations
pub type EstateFinanceResult<T> = Result<T, EstateFinanceError>;
