//! Catalog repository: rows are validated into domain cards on the way out.

use sea_orm::ConnectionTrait;
use tracing::error;

use crate::adapters::cards_sea::{self as cards_adapter, CardCreate};
use crate::domain::{Card, CardKey, Rarity};
use crate::entities::cards;
use crate::errors::domain::{DomainError, InfraErrorKind};

impl TryFrom<cards::Model> for Card {
    type Error = DomainError;

    fn try_from(model: cards::Model) -> Result<Self, Self::Error> {
        let rarity = model.rarity.parse::<Rarity>().map_err(|_| {
            error!(card_id = model.id, rarity = %model.rarity, "Stored card has unknown rarity");
            DomainError::infra(
                InfraErrorKind::DataCorruption,
                format!("Card {} has an unknown rarity", model.id),
            )
        })?;
        Ok(Card {
            id: model.id,
            text: model.text,
            rarity,
            card_number: model.card_number,
        })
    }
}

fn into_cards(rows: Vec<cards::Model>) -> Result<Vec<Card>, DomainError> {
    rows.into_iter().map(Card::try_from).collect()
}

pub async fn list_by_rarity<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rarity: Rarity,
) -> Result<Vec<Card>, DomainError> {
    into_cards(cards_adapter::list_by_rarity(conn, rarity.as_str()).await?)
}

pub async fn page_by_rarity<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rarity: Rarity,
    after_id: Option<i64>,
    limit: u64,
) -> Result<Vec<Card>, DomainError> {
    into_cards(cards_adapter::page_by_rarity(conn, rarity.as_str(), after_id, limit).await?)
}

pub async fn find_by_keys<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    keys: &[CardKey],
) -> Result<Vec<Card>, DomainError> {
    let pairs: Vec<(String, String)> = keys
        .iter()
        .map(|k| (k.rarity.as_str().to_string(), k.card_number()))
        .collect();
    into_cards(cards_adapter::find_by_keys(conn, &pairs).await?)
}

pub async fn count_cards<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, DomainError> {
    Ok(cards_adapter::count_cards(conn).await?)
}

pub async fn insert_cards<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rows: impl IntoIterator<Item = (Rarity, String, String)>,
) -> Result<u64, DomainError> {
    let rows = rows
        .into_iter()
        .map(|(rarity, text, card_number)| CardCreate {
            text,
            rarity: rarity.as_str().to_string(),
            card_number,
        })
        .collect();
    Ok(cards_adapter::insert_cards(conn, rows).await?)
}
