use std::sync::Arc;

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey};

use crate::auth::jwks::JwksCache;
use crate::error::AppError;

/// Where token signatures are checked against.
#[derive(Clone)]
pub enum SigningKeys {
    /// HS256 shared secret (local development and tests)
    Shared(Vec<u8>),
    /// RS256 public keys published by the identity provider
    Jwks(Arc<JwksCache>),
}

impl std::fmt::Debug for SigningKeys {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Shared(_) => f.write_str("Shared(***)"),
            Self::Jwks(cache) => write!(f, "Jwks({} keys from {})", cache.len(), cache.url()),
        }
    }
}

/// JWT verification settings
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub issuer: String,
    pub audience: Option<String>,
    pub keys: SigningKeys,
}

impl SecurityConfig {
    pub fn shared(
        issuer: impl Into<String>,
        audience: Option<String>,
        secret: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            issuer: issuer.into(),
            audience,
            keys: SigningKeys::Shared(secret.into()),
        }
    }

    pub fn jwks(
        issuer: impl Into<String>,
        audience: Option<String>,
        cache: Arc<JwksCache>,
    ) -> Self {
        Self {
            issuer: issuer.into(),
            audience,
            keys: SigningKeys::Jwks(cache),
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        match self.keys {
            SigningKeys::Shared(_) => Algorithm::HS256,
            SigningKeys::Jwks(_) => Algorithm::RS256,
        }
    }

    /// Key for a token header's `kid`. A JWKS with a single key accepts tokens without one.
    pub fn decoding_key(&self, kid: Option<&str>) -> Result<DecodingKey, AppError> {
        match &self.keys {
            SigningKeys::Shared(secret) => Ok(DecodingKey::from_secret(secret)),
            SigningKeys::Jwks(cache) => {
                let jwk = cache
                    .find(kid)
                    .ok_or_else(AppError::unauthorized_invalid_jwt)?;
                DecodingKey::from_jwk(&jwk).map_err(|_| AppError::unauthorized_invalid_jwt())
            }
        }
    }

    /// Whether a token signed with `kid` can be checked without refetching keys.
    pub fn knows_kid(&self, kid: Option<&str>) -> bool {
        match &self.keys {
            SigningKeys::Shared(_) => true,
            SigningKeys::Jwks(cache) => cache.find(kid).is_some(),
        }
    }

    /// Refetch the issuer's keys (rate-limited). No-op for a shared secret.
    pub async fn refresh_keys(&self) -> Result<bool, AppError> {
        match &self.keys {
            SigningKeys::Shared(_) => Ok(false),
            SigningKeys::Jwks(cache) => cache.refresh().await,
        }
    }

    /// Only shared-secret configurations can sign tokens locally.
    pub fn encoding_key(&self) -> Result<EncodingKey, AppError> {
        match &self.keys {
            SigningKeys::Shared(secret) => Ok(EncodingKey::from_secret(secret)),
            SigningKeys::Jwks(_) => Err(AppError::config(
                "Cannot mint tokens when verifying against the issuer's JWKS",
            )),
        }
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self::shared(
            "https://auth.wordsense.local",
            None,
            b"default_secret_for_tests_only".to_vec(),
        )
    }
}
