//! SeaORM adapter for the card catalog.

use std::collections::BTreeMap;

use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, NotSet, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use crate::entities::cards;

#[derive(Debug, Clone)]
pub struct CardCreate {
    pub text: String,
    pub rarity: String,
    pub card_number: String,
}

/// Every card of one rarity, id order.
pub async fn list_by_rarity<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rarity: &str,
) -> Result<Vec<cards::Model>, sea_orm::DbErr> {
    cards::Entity::find()
        .filter(cards::Column::Rarity.eq(rarity))
        .order_by_asc(cards::Column::Id)
        .all(conn)
        .await
}

/// Up to `limit` cards of one rarity with `id > after_id`, id order.
pub async fn page_by_rarity<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rarity: &str,
    after_id: Option<i64>,
    limit: u64,
) -> Result<Vec<cards::Model>, sea_orm::DbErr> {
    let mut query = cards::Entity::find().filter(cards::Column::Rarity.eq(rarity));
    if let Some(after) = after_id {
        query = query.filter(cards::Column::Id.gt(after));
    }
    query
        .order_by_asc(cards::Column::Id)
        .limit(limit)
        .all(conn)
        .await
}

/// Card numbers per `IN (...)` list; keeps each statement well under bind limits.
const LOOKUP_CHUNK: usize = 500;

/// Cards matching any `(rarity, card_number)` pair, id order.
///
/// Keys are grouped by rarity and queried as `rarity = ? AND card_number IN (...)`
/// in chunks, so the statement size does not grow with the batch.
pub async fn find_by_keys<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    keys: &[(String, String)],
) -> Result<Vec<cards::Model>, sea_orm::DbErr> {
    let mut by_rarity: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for (rarity, number) in keys {
        by_rarity
            .entry(rarity.as_str())
            .or_default()
            .push(number.as_str());
    }

    let mut found = Vec::new();
    for (rarity, mut numbers) in by_rarity {
        numbers.sort_unstable();
        numbers.dedup();
        for chunk in numbers.chunks(LOOKUP_CHUNK) {
            let rows = cards::Entity::find()
                .filter(cards::Column::Rarity.eq(rarity))
                .filter(cards::Column::CardNumber.is_in(chunk.iter().copied()))
                .all(conn)
                .await?;
            found.extend(rows);
        }
    }

    // Groups and chunks are disjoint, so a row is fetched at most once.
    found.sort_by_key(|row| row.id);
    Ok(found)
}

pub async fn count_cards<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<u64, sea_orm::DbErr> {
    cards::Entity::find().count(conn).await
}

pub async fn insert_cards<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rows: Vec<CardCreate>,
) -> Result<u64, sea_orm::DbErr> {
    if rows.is_empty() {
        return Ok(0);
    }
    let now = time::OffsetDateTime::now_utc();
    let count = rows.len() as u64;
    let models = rows.into_iter().map(|row| cards::ActiveModel {
        id: NotSet,
        text: Set(row.text),
        rarity: Set(row.rarity),
        card_number: Set(row.card_number),
        created_at: Set(now),
    });
    cards::Entity::insert_many(models)
        .exec_without_returning(conn)
        .await?;
    Ok(count)
}
