//! Bearer-token verification against the identity provider.

pub mod claims;
pub mod jwks;
pub mod jwt;

pub use claims::{Audience, Claims};
pub use jwt::{mint_access_token, verify_access_token, verify_access_token_refreshing};
