//! Secret-handling helpers shared by the webhook verifier and the client
//! configuration.

use subtle::ConstantTimeEq;

/// Placeholder printed instead of secrets in `Debug` output.
pub(crate) const REDACTED: &str = "[REDACTED]";

/// Compare two byte strings in constant time with respect to their content.
///
/// Inputs of different lengths compare unequal immediately. Only the length
/// of a signature is observable this way, and that length is public.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.ct_eq(b).into()
}
