//! Tolerant string → number coercion.
//!
//! Monitoring tool output is loosely structured; a field that fails to parse
//! becomes 0 / 0.0 rather than an error. This also means a zero can mask a
//! malformed field — that is the capture pipeline's documented contract, not
//! something to tighten here.

/// True when the token is a non-empty run of ASCII digits.
pub(crate) fn is_uint(token: &str) -> bool {
    !token.is_empty() && token.bytes().all(|b| b.is_ascii_digit())
}

/// Coerces an integer token; any non-digit content yields 0.
pub fn coerce_u64(token: &str) -> u64 {
    if is_uint(token) {
        token.parse().unwrap_or(0)
    } else {
        0
    }
}

/// Coerces a process-id token; any non-digit content yields 0.
pub fn coerce_u32(token: &str) -> u32 {
    if is_uint(token) {
        token.parse().unwrap_or(0)
    } else {
        0
    }
}

/// Coerces a percentage token, tolerating a decimal point.
/// Non-numeric content yields 0.0.
pub fn coerce_pct(token: &str) -> f64 {
    let numeric = token.bytes().any(|b| b.is_ascii_digit())
        && token.bytes().all(|b| b.is_ascii_digit() || b == b'.');
    if numeric {
        token.parse().unwrap_or(0.0)
    } else {
        0.0
    }
}
