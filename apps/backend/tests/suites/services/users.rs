use backend_test_support::unique_helpers::{unique_email, unique_sub};
use wordsense_backend::db::require_db;
use wordsense_backend::services::users;

use crate::support::build_empty_state;

#[tokio::test]
async fn ensure_user_is_idempotent_and_tracks_email() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_empty_state().await?;
    let db = require_db(&state)?;
    let sub = unique_sub("user");

    let first = users::ensure_user(db, &sub, None).await?;
    let again = users::ensure_user(db, &sub, None).await?;
    assert_eq!(first.id, again.id);
    assert!(again.email.is_none());

    let email = unique_email("user");
    let updated = users::ensure_user(db, &sub, Some(&email)).await?;
    assert_eq!(updated.id, first.id);
    assert_eq!(updated.email.as_deref(), Some(email.as_str()));
    Ok(())
}
