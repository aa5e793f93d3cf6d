//! Inbound webhook authentication.
//!
//! Pass the body exactly as received. Parsing and re-serializing JSON before
//! verification changes the bytes and makes valid deliveries fail.
//!
//! ```
//! use std::collections::HashMap;
//! use xrocket::WebhookVerifier;
//!
//! let verifier = WebhookVerifier::new("test-token").unwrap();
//! let mut headers = HashMap::new();
//! headers.insert(
//!     "Rocket-Pay-Signature".to_string(),
//!     "8c69492f2a5ef7d8adeb61a5df8cdc1482555be079695e8febf9e3e6c5b67c33".to_string(),
//! );
//! assert!(verifier.verify("{}", &headers));
//! ```

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use crate::constants::SIGNATURE_HEADER;
use crate::error::XRocketError;
use crate::hmac::{compute_signature, derive_signing_key, verify_signature, SigningKey};
use crate::security::REDACTED;
use crate::types::Webhook;

/// Header containers the verifier can read a signature from.
///
/// Implementations must match names case-insensitively, since HTTP layers
/// differ in how they normalize header casing.
pub trait WebhookHeaders {
    /// Value of the header called `name`, if present and valid UTF-8.
    /// Several matches that disagree yield `None`.
    fn header_value(&self, name: &str) -> Option<&str>;
}

/// Case-insensitive lookup. Several matching keys with different values
/// yield `None`, so map iteration order never decides the result.
fn find_ignore_case<'a>(
    pairs: impl Iterator<Item = (&'a str, &'a str)>,
    name: &str,
) -> Option<&'a str> {
    let mut found: Option<&'a str> = None;
    for (_, value) in pairs.filter(|(key, _)| key.eq_ignore_ascii_case(name)) {
        match found {
            Some(prev) if prev != value => return None,
            _ => found = Some(value),
        }
    }
    found
}

impl<K: AsRef<str>, V: AsRef<str>, S> WebhookHeaders for HashMap<K, V, S> {
    fn header_value(&self, name: &str) -> Option<&str> {
        find_ignore_case(self.iter().map(|(k, v)| (k.as_ref(), v.as_ref())), name)
    }
}

impl<K: AsRef<str>, V: AsRef<str>> WebhookHeaders for BTreeMap<K, V> {
    fn header_value(&self, name: &str) -> Option<&str> {
        find_ignore_case(self.iter().map(|(k, v)| (k.as_ref(), v.as_ref())), name)
    }
}

impl<K: AsRef<str>, V: AsRef<str>> WebhookHeaders for [(K, V)] {
    fn header_value(&self, name: &str) -> Option<&str> {
        find_ignore_case(self.iter().map(|(k, v)| (k.as_ref(), v.as_ref())), name)
    }
}

impl<K: AsRef<str>, V: AsRef<str>, const N: usize> WebhookHeaders for [(K, V); N] {
    fn header_value(&self, name: &str) -> Option<&str> {
        self.as_slice().header_value(name)
    }
}

impl<K: AsRef<str>, V: AsRef<str>> WebhookHeaders for Vec<(K, V)> {
    fn header_value(&self, name: &str) -> Option<&str> {
        self.as_slice().header_value(name)
    }
}

#[cfg(feature = "full")]
impl WebhookHeaders for reqwest::header::HeaderMap {
    fn header_value(&self, name: &str) -> Option<&str> {
        let mut values = self.get_all(name).iter().map(|v| v.to_str().ok());
        let first = values.next()??;
        values.all(|v| v == Some(first)).then_some(first)
    }
}

/// Verifies `rocket-pay-signature` headers for one API token.
///
/// The signing key is derived once at construction; the token itself is not
/// retained. Verification is a pure function of the key, the body bytes and
/// the claimed header, so a verifier can be shared freely across threads.
#[derive(Clone)]
pub struct WebhookVerifier {
    key: SigningKey,
}

impl fmt::Debug for WebhookVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WebhookVerifier")
            .field("key", &REDACTED)
            .finish()
    }
}

impl WebhookVerifier {
    /// Build a verifier from the app's API token.
    ///
    /// An empty token is rejected with [`XRocketError::Config`] instead of
    /// producing a verifier that signs with `SHA-256("")`.
    pub fn new(token: &str) -> Result<Self, XRocketError> {
        if token.is_empty() {
            return Err(XRocketError::Config(
                "API token must not be empty".to_string(),
            ));
        }
        Ok(Self {
            key: derive_signing_key(token),
        })
    }

    /// Signature xRocket Pay would send for `body`.
    pub fn sign(&self, body: impl AsRef<[u8]>) -> String {
        compute_signature(&self.key, body.as_ref())
    }

    /// Returns `true` only if the headers carry a signature that exactly
    /// matches the HMAC of `body`. A missing or empty header, a wrong
    /// signature or a malformed one all yield `false`.
    pub fn verify<H>(&self, body: impl AsRef<[u8]>, headers: &H) -> bool
    where
        H: WebhookHeaders + ?Sized,
    {
        let Some(claimed) = headers.header_value(SIGNATURE_HEADER) else {
            tracing::warn!("webhook signature header missing");
            return false;
        };

        if verify_signature(&self.key, body.as_ref(), claimed) {
            true
        } else {
            tracing::warn!(
                claimed_len = claimed.len(),
                "webhook signature mismatch"
            );
            false
        }
    }

    /// Verify the delivery, then decode it into a [`Webhook`].
    pub fn parse<H>(&self, body: &str, headers: &H) -> Result<Webhook, XRocketError>
    where
        H: WebhookHeaders + ?Sized,
    {
        if !self.verify(body, headers) {
            return Err(XRocketError::InvalidSignature);
        }
        let webhook: Webhook = serde_json::from_str(body)?;
        tracing::debug!(
            kind = ?webhook.kind,
            invoice_id = webhook.data.id,
            "webhook verified"
        );
        Ok(webhook)
    }
}
