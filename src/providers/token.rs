//! Bearer token caching for OAuth-protected providers.
//!
//! One slot per client, swapped atomically. Two requests that both find the
//! slot stale will both fetch; the later store wins. Tokens are reusable
//! bearer credentials so the duplicate fetch is harmless.

use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

use arc_swap::ArcSwapOption;

/// Seconds before expiry at which a cached token stops being handed out.
pub const REFRESH_MARGIN_SECS: u64 = 30;

/// A bearer token and the instant it expires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedToken {
    pub access_token: String,
    /// Expiry timestamp (seconds since epoch).
    pub expires_at: u64,
}

impl CachedToken {
    /// Build a token that expires `lifetime_secs` after `now`.
    pub fn issued_at(access_token: String, now: u64, lifetime_secs: u64) -> Self {
        Self {
            access_token,
            expires_at: now.saturating_add(lifetime_secs),
        }
    }

    /// Usable only while more than the refresh margin remains.
    pub fn is_valid_at(&self, now: u64) -> bool {
        now.saturating_add(REFRESH_MARGIN_SECS) < self.expires_at
    }
}

/// Process-lifetime holder for the current token.
#[derive(Debug, Default)]
pub struct TokenCache {
    slot: ArcSwapOption<CachedToken>,
}

impl TokenCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached token, if one exists and is still valid at `now`.
    pub fn current(&self, now: u64) -> Option<Arc<CachedToken>> {
        self.slot.load_full().filter(|token| token.is_valid_at(now))
    }

    /// Replace the cached token.
    pub fn store(&self, token: CachedToken) -> Arc<CachedToken> {
        let token = Arc::new(token);
        self.slot.store(Some(Arc::clone(&token)));
        token
    }
}

/// Current time in seconds since the Unix epoch.
pub fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
