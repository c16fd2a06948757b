//! Identity claims carried by access tokens.

use serde::{Deserialize, Serialize};

/// `aud` may be a single string or a list depending on the provider.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(untagged)]
pub enum Audience {
    One(String),
    Many(Vec<String>),
}

/// Verified claims, inserted into request extensions by `JwtExtract`.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Identity-provider subject (users.sub)
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    pub iss: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<Audience>,
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
}
