//! Request signing for the management API.
//!
//! The server recomputes the signature from the decoded parameters, so only
//! the string that is hashed has to follow the canonical form:
//!
//! 1. Sort parameters by lower-cased name.
//! 2. Render each as `name=value` with the value form-encoded and `+`
//!    replaced by `%20`.
//! 3. Join with `&` and lower-case the whole string.
//! 4. HMAC-SHA1 with the secret key, then base64.

use base64::Engine;
use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::error::{ApiError, Result};

type HmacSha1 = Hmac<Sha1>;

/// Encodes a query value the way the server expects it.
#[must_use]
pub fn encode(value: &str) -> String {
    url::form_urlencoded::byte_serialize(value.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

fn sorted(params: &[(String, String)]) -> Vec<&(String, String)> {
    let mut sorted: Vec<_> = params.iter().collect();
    sorted.sort_by_key(|(key, _)| key.to_lowercase());
    sorted
}

/// Builds the lower-cased canonical string that gets signed.
#[must_use]
pub fn canonical_query(params: &[(String, String)]) -> String {
    sorted(params)
        .into_iter()
        .map(|(key, value)| format!("{}={}", key, encode(value)))
        .collect::<Vec<_>>()
        .join("&")
        .to_lowercase()
}

/// Computes the base64 signature for a parameter set.
///
/// # Errors
///
/// Returns an error if the HMAC cannot be keyed.
pub fn sign(params: &[(String, String)], secret_key: &str) -> Result<String> {
    let mut mac = HmacSha1::new_from_slice(secret_key.as_bytes())
        .map_err(|e| ApiError::Signing(e.to_string()))?;
    mac.update(canonical_query(params).as_bytes());
    Ok(base64::engine::general_purpose::STANDARD.encode(mac.finalize().into_bytes()))
}

/// Renders the full query string to send, signature appended.
///
/// # Errors
///
/// Returns an error if signing fails.
pub fn signed_query(params: &[(String, String)], secret_key: &str) -> Result<String> {
    let signature = sign(params, secret_key)?;
    let mut query = sorted(params)
        .into_iter()
        .map(|(key, value)| format!("{}={}", key, encode(value)))
        .collect::<Vec<_>>();
    query.push(format!("signature={}", encode(&signature)));
    Ok(query.join("&"))
}
