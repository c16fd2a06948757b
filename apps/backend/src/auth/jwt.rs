use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, decode_header, encode, Header, Validation};
use tracing::debug;

use super::claims::{Audience, Claims};
use crate::state::security_config::SecurityConfig;
use crate::AppError;

const ACCESS_TOKEN_TTL_SECS: i64 = 15 * 60;

/// Mint a 15-minute access token. Only available with a shared secret.
pub fn mint_access_token(
    sub: &str,
    email: Option<&str>,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal("Failed to get current time"))?
        .as_secs() as i64;

    let claims = Claims {
        sub: sub.to_string(),
        email: email.map(str::to_string),
        iss: security.issuer.clone(),
        aud: security.audience.clone().map(Audience::One),
        iat,
        exp: iat + ACCESS_TOKEN_TTL_SECS,
    };

    encode(
        &Header::new(security.algorithm()),
        &claims,
        &security.encoding_key()?,
    )
    .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
}

/// Verify signature, issuer, audience and expiry.
///
/// Expired tokens map to `UNAUTHORIZED_EXPIRED_JWT`; every other failure to
/// `UNAUTHORIZED_INVALID_JWT`.
pub fn verify_access_token(token: &str, security: &SecurityConfig) -> Result<Claims, AppError> {
    let header = decode_header(token).map_err(|_| AppError::unauthorized_invalid_jwt())?;
    let key = security.decoding_key(header.kid.as_deref())?;

    let mut validation = Validation::new(security.algorithm());
    validation.set_issuer(&[security.issuer.as_str()]);
    validation.set_required_spec_claims(&["exp", "sub", "iss"]);
    match &security.audience {
        Some(aud) => validation.set_audience(&[aud.as_str()]),
        None => validation.validate_aud = false,
    }

    decode::<Claims>(token, &key, &validation)
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AppError::unauthorized_expired_jwt(),
            _ => AppError::unauthorized_invalid_jwt(),
        })
}

/// [`verify_access_token`], refetching the issuer's keys first when the
/// token names a `kid` that is not in the current set.
pub async fn verify_access_token_refreshing(
    token: &str,
    security: &SecurityConfig,
) -> Result<Claims, AppError> {
    let header = decode_header(token).map_err(|_| AppError::unauthorized_invalid_jwt())?;
    if let Some(kid) = header.kid.as_deref() {
        if !security.knows_kid(Some(kid)) {
            debug!(kid, "Unknown signing key id, refreshing keys");
            // Failures are logged by the cache; verification then rejects the token.
            let _ = security.refresh_keys().await;
        }
    }
    verify_access_token(token, security)
}
