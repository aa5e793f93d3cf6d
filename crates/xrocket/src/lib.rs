//! Client for the xRocket Pay API.
//!
//! Covers the three REST calls the SDK needs (app info, invoice creation,
//! currency listing) and authentication of inbound webhooks.
//!
//! # Webhook signatures
//!
//! xRocket Pay signs each webhook body with HMAC-SHA256. The key is the raw
//! SHA-256 digest of the app's API token; the lowercase hex MAC arrives in
//! the `Rocket-Pay-Signature` header. [`WebhookVerifier`] implements the
//! check with a constant-time comparison and is available without the HTTP
//! stack (`default-features = false`).
//!
//! # Quick example (client)
//!
//! ```no_run
//! use xrocket::{ClientConfig, CreateInvoiceOptions, XRocketClient};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), xrocket::XRocketError> {
//! let client = XRocketClient::new(ClientConfig::new("YOUR_API_TOKEN"))?;
//!
//! let invoice = client
//!     .create_invoice(&CreateInvoiceOptions::new(1.5).with_description("coffee"))
//!     .await?;
//! println!("pay at {}", invoice.link);
//! # Ok(())
//! # }
//! ```

// Core types
pub mod config;
pub mod constants;
pub mod error;
pub mod types;

// Webhook authentication
pub mod hmac;
pub mod security;
pub mod webhook;

// HTTP client
#[cfg(feature = "full")]
pub mod http_client;

// Re-exports
pub use config::{ClientConfig, ConfigError};
pub use constants::*;
pub use error::XRocketError;
pub use types::*;
pub use webhook::{WebhookHeaders, WebhookVerifier};

#[cfg(feature = "full")]
pub use http_client::XRocketClient;
