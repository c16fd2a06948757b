//! Deck repository functions (generic over ConnectionTrait).

use sea_orm::ConnectionTrait;
use serde::Serialize;

use crate::adapters::decks_sea::{self as decks_adapter, DeckCreate};
use crate::entities::decks;
use crate::errors::domain::DomainError;

/// Deck domain model
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Deck {
    pub id: i64,
    #[serde(skip)]
    pub user_id: i64,
    pub deck_name: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: time::OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: time::OffsetDateTime,
}

impl From<decks::Model> for Deck {
    fn from(model: decks::Model) -> Self {
        Self {
            id: model.id,
            user_id: model.user_id,
            deck_name: model.deck_name,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

pub async fn create_deck<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    deck_name: &str,
) -> Result<Deck, DomainError> {
    let deck = decks_adapter::create_deck(conn, DeckCreate::new(user_id, deck_name)).await?;
    Ok(Deck::from(deck))
}

pub async fn list_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<Deck>, DomainError> {
    let decks = decks_adapter::list_for_user(conn, user_id).await?;
    Ok(decks.into_iter().map(Deck::from).collect())
}

/// `true` when a deck owned by `user_id` was removed.
pub async fn delete_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    deck_id: i64,
) -> Result<bool, DomainError> {
    Ok(decks_adapter::delete_for_user(conn, user_id, deck_id).await? > 0)
}
