//! Error taxonomy for a single conversion

use serde_json::{Value, json};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    /// Amount token is not a number. Raised before any network call.
    #[error("Invalid amount: '{token}' is not a number")]
    InvalidAmount { token: String },

    #[error("Rate provider responded with HTTP status {status}")]
    ProviderError { status: u16 },

    #[error("Failed to reach rate provider: {cause}")]
    TransportError {
        #[source]
        cause: reqwest::Error,
    },

    /// Body is not JSON or has no `rates` map.
    #[error("Malformed rate provider response: {reason}")]
    MalformedResponse { reason: String },
}

impl ConvertError {
    /// Stable machine-readable code, shared by both entry points.
    pub fn code(&self) -> &'static str {
        match self {
            ConvertError::InvalidAmount { .. } => "INVALID_AMOUNT",
            ConvertError::ProviderError { .. } => "PROVIDER_ERROR",
            ConvertError::TransportError { .. } => "TRANSPORT_ERROR",
            ConvertError::MalformedResponse { .. } => "MALFORMED_RESPONSE",
        }
    }

    /// Process exit code used by the command-line entry point.
    pub fn exit_code(&self) -> u8 {
        match self {
            ConvertError::InvalidAmount { .. } => 2,
            ConvertError::ProviderError { .. } => 3,
            ConvertError::TransportError { .. } => 4,
            ConvertError::MalformedResponse { .. } => 5,
        }
    }

    pub fn to_json(&self) -> Value {
        let mut error = json!({
            "code": self.code(),
            "message": self.to_string(),
        });
        if let ConvertError::ProviderError { status } = self {
            error["status"] = json!(status);
        }
        json!({ "error": error })
    }
}
