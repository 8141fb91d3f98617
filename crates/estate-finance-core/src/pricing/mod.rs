pub mod estimate;
pub mod insights;
pub mod trends;
