//! Advisory classification of cached token values.
//!
//! Used only for diagnostics: a value that looks like a three-segment
//! structured token gets its middle segment decoded and its expiry claim
//! inspected, so logs can say "served an expired session token" while the
//! value itself is still returned unchanged. Expiry enforcement belongs to
//! the identity provider, never to the cache.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};

/// Best-effort structural classification of a cached value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenShape {
    /// Not a three-segment dot-delimited value.
    Opaque,
    /// Three segments, but the middle one does not decode to a claims
    /// object with a numeric `exp`.
    ThreeSegment,
    /// Three segments with a numeric `exp` claim in the middle segment.
    Claims {
        /// `exp` claim, seconds since the Unix epoch.
        expires_at: i64,
        /// Whether `exp` is in the past at classification time.
        expired: bool,
    },
}

/// Classify a cached value. Never fails; anything unrecognized is
/// [`TokenShape::Opaque`].
pub fn classify(value: &str) -> TokenShape {
    let segments: Vec<&str> = value.split('.').collect();
    if segments.len() != 3 || segments.iter().any(|s| s.is_empty()) {
        return TokenShape::Opaque;
    }

    match decode_exp(segments[1]) {
        Some(expires_at) => TokenShape::Claims {
            expires_at,
            expired: expires_at < chrono::Utc::now().timestamp(),
        },
        None => TokenShape::ThreeSegment,
    }
}

fn decode_exp(segment: &str) -> Option<i64> {
    // Tokens in the wild carry the middle segment both padded and unpadded.
    let bytes = URL_SAFE_NO_PAD
        .decode(segment.trim_end_matches('='))
        .ok()?;
    let claims: serde_json::Value = serde_json::from_slice(&bytes).ok()?;
    claims.as_object()?.get("exp")?.as_i64()
}
