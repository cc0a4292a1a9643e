use reqwest::StatusCode;
use thiserror::Error;

use realty_core::RealtyError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("server returned {status}: {message}")]
    Status { status: StatusCode, message: String },

    #[error(transparent)]
    Response(#[from] RealtyError),
}

impl ApiError {
    /// Build the error for a non-2xx reply, pulling the server's own
    /// explanation out of the body when there is one.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = realty_core::envelope::decode_message(body)
            .ok()
            .and_then(|m| m.text().map(str::to_string))
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request was not successful")
                    .to_string()
            });
        ApiError::Status { status, message }
    }
}
