use thiserror::Error;

use crate::types::ValidationError;

/// Errors returned by xRocket operations.
///
/// A webhook whose signature does not match is not an error for
/// [`WebhookVerifier::verify`](crate::WebhookVerifier::verify), which just
/// returns `false`. [`XRocketError::InvalidSignature`] only appears when the
/// caller asks for a parsed webhook.
#[derive(Debug, Error)]
pub enum XRocketError {
    #[error("config error: {0}")]
    Config(String),

    #[error("http error: {0}")]
    Http(String),

    /// The API answered with `success: false`.
    #[error("api error: {message}")]
    Api {
        message: String,
        errors: Vec<ValidationError>,
    },

    #[error("invalid invoice: {0}")]
    InvalidInvoice(String),

    #[error("webhook signature verification failed")]
    InvalidSignature,

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}
