use thiserror::Error;

/// A single failed form field, reported in the order the form checks them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub reason: String,
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.reason)
    }
}

#[derive(Debug, Error)]
pub enum RealtyError {
    #[error("Invalid input: {field} — {reason}")]
    InvalidInput { field: String, reason: String },

    #[error("Validation failed: {0}")]
    Validation(FieldError),

    #[error("Unexpected response shape: {0}")]
    UnexpectedResponse(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl RealtyError {
    pub(crate) fn required(field: &str, reason: &str) -> Self {
        RealtyError::Validation(FieldError {
            field: field.to_string(),
            reason: reason.to_string(),
        })
    }
}

impl From<serde_json::Error> for RealtyError {
    fn from(e: serde_json::Error) -> Self {
        RealtyError::SerializationError(e.to_string())
    }
}
