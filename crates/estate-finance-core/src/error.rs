use thiserror::Error;

#[derive(Debug, Error)]
pub enum EstateFinanceError {
    #[error("Invalid input: {field}: {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl EstateFinanceError {
    pub(crate) fn invalid(field: &str, reason: impl Into<String>) -> Self {
        EstateFinanceError::InvalidInput {
            field: field.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for EstateFinanceError {
    fn from(e: serde_json::Error) -> Self {
        EstateFinanceError::SerializationError(e.to_string())
    }
}
