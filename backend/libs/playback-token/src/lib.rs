//! Playback credential (playAuth) signing and verification
//!
//! Mints the JWT a video player presents to authorize playback of a single
//! video. Tokens are signed with HS256 using the application play key fetched
//! from the VOD service; the key is per-call and never stored here.
//!
//! Player SDKs older than 7.10.0 cannot complete playback auth with a
//! locally signed `vid + playAuth` pair.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Default VOD application id used when no explicit app is configured.
pub const DEFAULT_APP_ID: &str = "app-1000000";

/// Default region embedded in tokens when the caller supplies none.
pub const DEFAULT_REGION_ID: &str = "cn-shanghai";

/// Token validity window: one hour, in milliseconds.
pub const EXPIRED_TIME_MILLS: i64 = 60 * 60 * 1000;

/// Playback auth window handed to the player, in seconds.
const AUTH_TIMEOUT_SECS: i64 = 1800;

/// Errors produced while minting or verifying a playback credential.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TokenError {
    #[error("invalid signing input: {0}")]
    InvalidInput(&'static str),

    #[error("token is not in header.payload.signature form")]
    Malformed,

    #[error("token payload cannot be decoded")]
    Undecodable,

    #[error("token signature does not match")]
    BadSignature,

    #[error("token has expired")]
    Expired,

    #[error("token issue time is in the future")]
    IssuedInFuture,

    #[error("token signing failed: {0}")]
    Signing(String),
}

/// Fixed playback description block embedded in every token.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayContentInfo {
    pub formats: String,
    pub auth_timeout: i64,
    pub stream_type: String,
}

impl Default for PlayContentInfo {
    fn default() -> Self {
        Self {
            formats: "mp4".to_string(),
            auth_timeout: AUTH_TIMEOUT_SECS,
            stream_type: "video".to_string(),
        }
    }
}

/// Claims carried by a playback credential.
///
/// Timestamps are Unix milliseconds to match what the player SDK expects.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayAuthClaims {
    pub app_id: String,
    pub video_id: String,
    pub current_time_stamp: Option<i64>,
    pub expire_time_stamp: Option<i64>,
    pub region_id: String,
    pub play_content_info: PlayContentInfo,
}

/// Mint a playback credential for `video_id`, signed with `play_key`.
///
/// An empty `region_id` falls back to [`DEFAULT_REGION_ID`]; empty
/// `video_id` or `play_key` is rejected.
pub fn sign(video_id: &str, play_key: &str, region_id: &str) -> Result<String, TokenError> {
    sign_at(video_id, play_key, region_id, Utc::now().timestamp_millis())
}

/// Verify a playback credential against `play_key`.
pub fn verify(token: &str, play_key: &str) -> Result<(), TokenError> {
    verify_at(token, play_key, Utc::now().timestamp_millis())
}

fn sign_at(
    video_id: &str,
    play_key: &str,
    region_id: &str,
    now_ms: i64,
) -> Result<String, TokenError> {
    let video_id = video_id.trim();
    if video_id.is_empty() {
        return Err(TokenError::InvalidInput("videoId must not be empty"));
    }
    let play_key = play_key.trim();
    if play_key.is_empty() {
        return Err(TokenError::InvalidInput("playKey must not be empty"));
    }
    let region_id = match region_id.trim() {
        "" => DEFAULT_REGION_ID,
        trimmed => trimmed,
    };

    let claims = PlayAuthClaims {
        app_id: DEFAULT_APP_ID.to_string(),
        video_id: video_id.to_string(),
        current_time_stamp: Some(now_ms),
        expire_time_stamp: Some(now_ms + EXPIRED_TIME_MILLS),
        region_id: region_id.to_string(),
        play_content_info: PlayContentInfo::default(),
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(play_key.as_bytes()),
    )
    .map_err(|err| TokenError::Signing(err.to_string()))
}

fn verify_at(token: &str, play_key: &str, now_ms: i64) -> Result<(), TokenError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 || parts.iter().any(|part| part.is_empty()) {
        return Err(TokenError::Malformed);
    }

    // The payload must at least be valid base64url-encoded JSON before we
    // bother checking the signature.
    let payload = URL_SAFE_NO_PAD
        .decode(parts[1])
        .map_err(|_| TokenError::Undecodable)?;
    serde_json::from_slice::<serde_json::Value>(&payload).map_err(|_| TokenError::Undecodable)?;

    // The token carries custom millisecond timestamps instead of the standard
    // exp claim, so jsonwebtoken's own temporal validation is disabled.
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = false;
    validation.set_required_spec_claims::<&str>(&[]);

    let data = decode::<PlayAuthClaims>(
        token,
        &DecodingKey::from_secret(play_key.trim().as_bytes()),
        &validation,
    )
    .map_err(|err| match err.kind() {
        jsonwebtoken::errors::ErrorKind::InvalidSignature => TokenError::BadSignature,
        _ => TokenError::Undecodable,
    })?;

    // Temporal checks run only after the signature has been validated. A
    // missing or future issue time is rejected to guard against forged
    // future-dated tokens.
    match data.claims.current_time_stamp {
        Some(issued_at) if issued_at <= now_ms => {}
        _ => return Err(TokenError::IssuedInFuture),
    }

    if let Some(expire_at) = data.claims.expire_time_stamp {
        if expire_at < now_ms {
            return Err(TokenError::Expired);
        }
    }

    Ok(())
}
