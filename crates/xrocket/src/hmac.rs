//! Webhook signing primitives.
//!
//! xRocket Pay signs each webhook body with HMAC-SHA256, keyed by the raw
//! SHA-256 digest of the app's API token, and sends the lowercase hex MAC
//! in the `rocket-pay-signature` header.

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use crate::security::constant_time_eq;

type HmacSha256 = Hmac<Sha256>;

/// Raw signing key derived from an API token.
pub type SigningKey = [u8; 32];

/// Derive the signing key: SHA-256 over the UTF-8 bytes of `token`.
pub fn derive_signing_key(token: &str) -> SigningKey {
    let mut key = [0u8; 32];
    key.copy_from_slice(&Sha256::digest(token.as_bytes()));
    key
}

/// Compute HMAC-SHA256 over `body` with `key`.
/// Returns the lowercase hex-encoded MAC (64 characters).
pub fn compute_signature(key: &[u8], body: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(key).expect("HMAC accepts any key length");
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}

/// Check a claimed signature against the body.
///
/// The claim must be the exact lowercase hex string; uppercase or otherwise
/// malformed values go through the same comparison and fail it.
pub fn verify_signature(key: &[u8], body: &[u8], signature: &str) -> bool {
    let expected = compute_signature(key, body);
    constant_time_eq(expected.as_bytes(), signature.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::SIGNATURE_HEX_LEN;

    // Reference values for token "test-token" and body "{}".
    const TEST_KEY_HEX: &str = "4c5dc9b7708905f77f5e5d16316b5dfb425e68cb326dcd55a860e90a7707031e";
    const TEST_SIG: &str = "8c69492f2a5ef7d8adeb61a5df8cdc1482555be079695e8febf9e3e6c5b67c33";

    #[test]
    fn test_derive_signing_key_vector() {
        assert_eq!(hex::encode(derive_signing_key("test-token")), TEST_KEY_HEX);
    }

    #[test]
    fn test_derive_signing_key_is_deterministic() {
        assert_eq!(derive_signing_key("abc"), derive_signing_key("abc"));
        assert_ne!(derive_signing_key("abc"), derive_signing_key("abd"));
    }

    #[test]
    fn test_compute_signature_vector() {
        let key = derive_signing_key("test-token");
        let sig = compute_signature(&key, b"{}");
        assert_eq!(sig, TEST_SIG);
        assert_eq!(sig.len(), SIGNATURE_HEX_LEN);
    }

    #[test]
    fn test_signature_is_lowercase_hex() {
        let sig = compute_signature(&derive_signing_key("t"), b"body");
        assert!(sig
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
    }

    #[test]
    fn test_verify_roundtrip() {
        let key = derive_signing_key("secret");
        let sig = compute_signature(&key, b"payload");
        assert!(verify_signature(&key, b"payload", &sig));
    }

    #[test]
    fn test_verify_rejects_uppercase() {
        let key = derive_signing_key("test-token");
        assert!(!verify_signature(&key, b"{}", &TEST_SIG.to_uppercase()));
    }

    #[test]
    fn test_verify_rejects_non_hex() {
        let key = derive_signing_key("test-token");
        assert!(!verify_signature(&key, b"{}", "not-hex-zz"));
        assert!(!verify_signature(&key, b"{}", ""));
    }

    #[test]
    fn test_empty_body_still_signs() {
        let key = derive_signing_key("test-token");
        let sig = compute_signature(&key, b"");
        assert!(verify_signature(&key, b"", &sig));
        assert!(!verify_signature(&key, b"", TEST_SIG));
    }
}
