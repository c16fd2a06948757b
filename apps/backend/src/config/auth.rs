use std::env;

use super::must_var;
use crate::error::AppError;

/// Identity provider settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthConfig {
    /// Issuer URL, always with a scheme and without a trailing slash.
    pub issuer: String,
    pub audience: Option<String>,
    /// Shared HS256 secret; when absent the issuer's JWKS is used.
    pub jwt_secret: Option<String>,
}

impl AuthConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let issuer = normalize_issuer(&must_var("AUTH_ISSUER_DOMAIN")?);
        let audience = optional("AUTH_AUDIENCE");
        let jwt_secret = optional("AUTH_JWT_SECRET");
        Ok(Self {
            issuer,
            audience,
            jwt_secret,
        })
    }

    pub fn jwks_url(&self) -> String {
        format!("{}/.well-known/jwks.json", self.issuer)
    }
}

fn optional(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Adds `https://` when no scheme is present and strips trailing slashes.
pub fn normalize_issuer(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.starts_with("https://") || trimmed.starts_with("http://") {
        trimmed.to_string()
    } else {
        format!("https://{trimmed}")
    }
}
