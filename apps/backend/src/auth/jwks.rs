use std::future::Future;
use std::time::{Duration, Instant};

use jsonwebtoken::jwk::{Jwk, JwkSet};
use parking_lot::{Mutex, RwLock};
use tracing::{info, warn};

use crate::error::AppError;

/// Minimum gap between two refetches triggered by unknown `kid`s.
const REFRESH_INTERVAL: Duration = Duration::from_secs(60);

/// Download the issuer's signing keys.
pub async fn fetch_jwks(url: &str) -> Result<JwkSet, AppError> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(10))
        .build()
        .map_err(|e| AppError::config(format!("Failed to build HTTP client: {e}")))?;

    let set = client
        .get(url)
        .send()
        .await
        .and_then(|resp| resp.error_for_status())
        .map_err(|e| AppError::config(format!("Failed to fetch JWKS from {url}: {e}")))?
        .json::<JwkSet>()
        .await
        .map_err(|e| AppError::config(format!("Invalid JWKS document at {url}: {e}")))?;

    if set.keys.is_empty() {
        return Err(AppError::config(format!("JWKS at {url} contains no keys")));
    }

    info!(url, keys = set.keys.len(), "Loaded identity provider signing keys");
    Ok(set)
}

/// The issuer's key set, swapped in place when the issuer rotates keys.
///
/// Shared by every clone of the owning `SecurityConfig`.
pub struct JwksCache {
    url: String,
    keys: RwLock<JwkSet>,
    last_refresh: Mutex<Option<Instant>>,
}

impl JwksCache {
    pub fn new(url: impl Into<String>, keys: JwkSet) -> Self {
        Self {
            url: url.into(),
            keys: RwLock::new(keys),
            last_refresh: Mutex::new(None),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn len(&self) -> usize {
        self.keys.read().keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Key for `kid`. A set with a single key accepts tokens without one.
    pub fn find(&self, kid: Option<&str>) -> Option<Jwk> {
        let set = self.keys.read();
        match kid {
            Some(kid) => set.find(kid).cloned(),
            None if set.keys.len() == 1 => set.keys.first().cloned(),
            None => None,
        }
    }

    /// Refetch from the issuer, at most once per [`REFRESH_INTERVAL`].
    pub async fn refresh(&self) -> Result<bool, AppError> {
        let url = self.url.clone();
        self.refresh_with(|| async move { fetch_jwks(&url).await })
            .await
    }

    /// Replace the set with what `fetch` returns.
    ///
    /// Returns `Ok(false)` without calling `fetch` when the last attempt was
    /// less than [`REFRESH_INTERVAL`] ago. A failed fetch keeps the old keys
    /// and still counts as an attempt.
    pub async fn refresh_with<F, Fut>(&self, fetch: F) -> Result<bool, AppError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<JwkSet, AppError>>,
    {
        {
            let mut last = self.last_refresh.lock();
            if last.is_some_and(|at| at.elapsed() < REFRESH_INTERVAL) {
                return Ok(false);
            }
            *last = Some(Instant::now());
        }

        match fetch().await {
            Ok(set) => {
                info!(url = %self.url, keys = set.keys.len(), "Signing keys refreshed");
                *self.keys.write() = set;
                Ok(true)
            }
            Err(err) => {
                warn!(url = %self.url, error = %err, "Signing key refresh failed");
                Err(err)
            }
        }
    }
}

/// RSA public key from RFC 7517 appendix A.1, published under each of `kids`.
#[cfg(test)]
pub(crate) fn test_key_set(kids: &[&str]) -> JwkSet {
    const MODULUS: &str = "0vx7agoebGcQSuuPiLJXZptN9nndrQmbXEps2aiAFbWhM78LhWx4cbbfAAtVT86zwu1RK7aPFFxuhDR1L6tSoc_BJECPebWKRXjBZCiFV4n3oknjhMstn64tZ_2W-5JsGY4Hc5n9yBXArwl93lqt7_RN5w6Cf0h4QyQ5v-65YGjQR0_FDW2QvzqY368QQMicAtaSqzs8KJZgnYb9c7d0zgdAZHzu6qMQvRL5hajrn1n91CbOpbISD08qNLyrdkt-bFTWhAI4vMQFh6WeZu0fM4lFd2NcRwr3XPksINHaQ-G_xBniIqbw0Ls1jF44-csFCur-kEgU8awapJzKnqDKgw";

    let keys: Vec<serde_json::Value> = kids
        .iter()
        .map(|kid| {
            serde_json::json!({
                "kty": "RSA",
                "kid": kid,
                "use": "sig",
                "alg": "RS256",
                "n": MODULUS,
                "e": "AQAB",
            })
        })
        .collect();
    serde_json::from_value(serde_json::json!({ "keys": keys })).unwrap()
}
