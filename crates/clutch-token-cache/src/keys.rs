//! Token cache key constants.

/// Well-known cache keys used by the identity integration.
///
/// These select extra diagnostic logging only; the cache treats every key
/// the same for correctness.
pub struct TokenKeys;

impl TokenKeys {
    /// Session token issued by the identity provider.
    pub const SESSION: &'static str = "__session";

    /// Prefix for OAuth provider tokens (e.g. `oauth_google_token`).
    pub const OAUTH_PREFIX: &'static str = "oauth_";

    /// Whether a key is one the identity integration is known to use.
    pub fn is_known(key: &str) -> bool {
        key == Self::SESSION || key.starts_with(Self::OAUTH_PREFIX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_keys() {
        assert!(TokenKeys::is_known("__session"));
        assert!(TokenKeys::is_known("oauth_google_token"));
        assert!(!TokenKeys::is_known("random_key"));
    }
}
