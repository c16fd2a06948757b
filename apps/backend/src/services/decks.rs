//! Deck management: name validation, create, list, delete, live-query fan-out.

use sea_orm::ConnectionTrait;
use tracing::info;
use unicode_normalization::UnicodeNormalization;

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};
use crate::repos::decks::{self, Deck};
use crate::state::app_state::AppState;

pub const MAX_DECK_NAME_CHARS: usize = 50;

/// NFKC-normalise and trim a deck name, rejecting blank or overlong names.
pub fn normalize_deck_name(raw: &str) -> Result<String, DomainError> {
    let normalized: String = raw.nfkc().collect();
    let name = normalized.trim();

    if name.is_empty() {
        return Err(DomainError::validation(
            ValidationKind::InvalidDeckName,
            "Deck name must not be empty",
        ));
    }
    if name.chars().count() > MAX_DECK_NAME_CHARS {
        return Err(DomainError::validation(
            ValidationKind::InvalidDeckName,
            format!("Deck name must be at most {MAX_DECK_NAME_CHARS} characters"),
        ));
    }
    Ok(name.to_string())
}

pub async fn list_decks<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<Deck>, AppError> {
    Ok(decks::list_for_user(conn, user_id).await?)
}

/// Create a deck for `user_id` and push the new list to live subscribers.
pub async fn create_deck(state: &AppState, user_id: i64, raw_name: &str) -> Result<Deck, AppError> {
    let name = normalize_deck_name(raw_name)?;

    let deck = with_txn(state, |txn| {
        Box::pin(async move { Ok(decks::create_deck(txn, user_id, &name).await?) })
    })
    .await?;

    info!(user_id, deck_id = deck.id, "Deck created");
    state.live_queries().notify_decks_changed(user_id);
    Ok(deck)
}

/// Hard-delete a deck owned by `user_id`. Someone else's deck is reported as missing.
pub async fn delete_deck(state: &AppState, user_id: i64, deck_id: i64) -> Result<(), AppError> {
    let removed = with_txn(state, |txn| {
        Box::pin(async move { Ok(decks::delete_for_user(txn, user_id, deck_id).await?) })
    })
    .await?;

    if !removed {
        return Err(DomainError::not_found(
            NotFoundKind::Deck,
            format!("Deck {deck_id} not found"),
        )
        .into());
    }

    info!(user_id, deck_id, "Deck deleted");
    state.live_queries().notify_decks_changed(user_id);
    Ok(())
}
