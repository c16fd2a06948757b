//! ULID-based unique values so tests sharing a database never collide.

use ulid::Ulid;

/// `{prefix}-{ulid}`
pub fn unique_str(prefix: &str) -> String {
    format!("{prefix}-{}", Ulid::new())
}

/// `{prefix}-{ulid}@example.test`
pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@example.test", Ulid::new())
}

/// Identity-provider style subject, e.g. `auth0|user-01J...`.
pub fn unique_sub(prefix: &str) -> String {
    format!("auth0|{}", unique_str(prefix))
}
