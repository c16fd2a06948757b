//! SeaORM adapter for decks.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, QueryOrder,
    Set,
};

use crate::entities::decks;

pub mod dto;

pub use dto::DeckCreate;

pub async fn create_deck<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: DeckCreate,
) -> Result<decks::Model, sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    decks::ActiveModel {
        id: NotSet,
        user_id: Set(dto.user_id),
        deck_name: Set(dto.deck_name),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
}

/// Owner's decks in creation order.
pub async fn list_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
) -> Result<Vec<decks::Model>, sea_orm::DbErr> {
    decks::Entity::find()
        .filter(decks::Column::UserId.eq(user_id))
        .order_by_asc(decks::Column::Id)
        .all(conn)
        .await
}

/// Delete a deck only if `user_id` owns it. Returns rows affected.
pub async fn delete_for_user<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    user_id: i64,
    deck_id: i64,
) -> Result<u64, sea_orm::DbErr> {
    let res = decks::Entity::delete_many()
        .filter(decks::Column::Id.eq(deck_id))
        .filter(decks::Column::UserId.eq(user_id))
        .exec(conn)
        .await?;
    Ok(res.rows_affected)
}
