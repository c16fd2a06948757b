use std::time::{Duration, SystemTime};

use wordsense_backend::{mint_access_token, SecurityConfig};

pub fn mint_test_token(sub: &str, email: &str, sec: &SecurityConfig) -> String {
    mint_access_token(sub, Some(email), SystemTime::now(), sec).expect("mint token")
}

/// `Authorization` header value.
pub fn bearer_header(sub: &str, email: &str, sec: &SecurityConfig) -> String {
    format!("Bearer {}", mint_test_token(sub, email, sec))
}

/// Issued two hours ago, so past its 15-minute lifetime.
pub fn mint_expired_token(sub: &str, email: &str, sec: &SecurityConfig) -> String {
    let issued = SystemTime::now() - Duration::from_secs(7200);
    mint_access_token(sub, Some(email), issued, sec).expect("mint expired token")
}
