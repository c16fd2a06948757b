use sea_orm::ConnectionTrait;
use tracing::{debug, info};

use crate::error::AppError;
use crate::logging::pii::{redact_sub, Redacted};
use crate::repos::users::{self, User};

/// Find or create the user behind an identity-provider subject.
///
/// Idempotent: repeated calls with the same `sub` return the same row, and a
/// changed email claim is written back.
pub async fn ensure_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    sub: &str,
    email: Option<&str>,
) -> Result<User, AppError> {
    if sub.trim().is_empty() {
        return Err(AppError::unauthorized_invalid_jwt());
    }

    let (user, created) = users::ensure_user(conn, sub, email).await?;

    if created {
        info!(
            user_id = user.id,
            sub = %redact_sub(sub),
            email = %Redacted(email.unwrap_or("")),
            "Provisioned user on first sign-in"
        );
    } else {
        debug!(user_id = user.id, sub = %redact_sub(sub), "Known user");
    }

    Ok(user)
}
