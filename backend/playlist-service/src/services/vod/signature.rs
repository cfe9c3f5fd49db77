/// RPC request signing for the upstream VOD OpenAPI - HMAC-SHA1
///
/// Implements the canonical RPC signature: parameters are percent-encoded,
/// sorted, joined into a canonicalized query string, wrapped into the
/// string-to-sign, and signed with `access_key_secret + "&"`.
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha1::Sha1;

use crate::error::{AppError, Result};

type HmacSha1 = Hmac<Sha1>;

/// Percent-encode one parameter key or value per the RPC rules:
/// unreserved characters (`A-Z a-z 0-9 - _ . ~`) stay literal, space becomes
/// `%20`, `*` becomes `%2A`.
pub fn percent_encode(raw: &str) -> String {
    urlencoding::encode(raw).into_owned()
}

/// Build the sorted, encoded canonicalized query string.
fn canonicalized_query(params: &[(String, String)]) -> String {
    let mut encoded: Vec<(String, String)> = params
        .iter()
        .map(|(k, v)| (percent_encode(k), percent_encode(v)))
        .collect();
    encoded.sort();

    encoded
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}

/// Encode `params` into a wire query string using the same percent-encoding
/// the signature was computed over. Letting an HTTP client re-encode the
/// parameters can diverge from the signed form, so the query is built here.
pub fn encoded_query(params: &[(String, String)]) -> String {
    params
        .iter()
        .map(|(k, v)| format!("{}={}", percent_encode(k), percent_encode(v)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Compute the request signature over `params` (which must not yet contain
/// a `Signature` entry).
pub fn sign_request(
    http_method: &str,
    params: &[(String, String)],
    access_key_secret: &str,
) -> Result<String> {
    let canonical = canonicalized_query(params);
    let string_to_sign = format!(
        "{}&{}&{}",
        http_method,
        percent_encode("/"),
        percent_encode(&canonical)
    );

    let key = format!("{}&", access_key_secret);
    let mut mac = HmacSha1::new_from_slice(key.as_bytes())
        .map_err(|e| AppError::Internal(format!("HMAC key error: {}", e)))?;
    mac.update(string_to_sign.as_bytes());

    Ok(STANDARD.encode(mac.finalize().into_bytes()))
}
