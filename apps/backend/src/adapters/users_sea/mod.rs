//! SeaORM adapter for user repository.

use sea_orm::sea_query::OnConflict;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, NotSet, QueryFilter, Set,
};

use crate::entities::users;

pub mod dto;

pub use dto::UserUpsert;

pub async fn find_user_by_sub<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    sub: &str,
) -> Result<Option<users::Model>, sea_orm::DbErr> {
    users::Entity::find()
        .filter(users::Column::Sub.eq(sub))
        .one(conn)
        .await
}

/// Insert the user if the subject is new, otherwise refresh a changed email.
///
/// Returns the row and whether it was inserted by this call. Safe under
/// concurrent first requests for the same subject.
pub async fn ensure_user_by_sub<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: UserUpsert,
) -> Result<(users::Model, bool), sea_orm::DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let active = users::ActiveModel {
        id: NotSet,
        sub: Set(dto.sub.clone()),
        email: Set(dto.email.clone()),
        created_at: Set(now),
        updated_at: Set(now),
    };

    let rows = users::Entity::insert(active)
        .on_conflict(OnConflict::column(users::Column::Sub).do_nothing().to_owned())
        .exec_without_returning(conn)
        .await?;

    let user = find_user_by_sub(conn, &dto.sub)
        .await?
        .ok_or_else(|| sea_orm::DbErr::RecordNotFound("users.sub not found".to_string()))?;

    if rows == 0 && dto.email.is_some() && user.email != dto.email {
        let mut active: users::ActiveModel = user.into();
        active.email = Set(dto.email);
        active.updated_at = Set(now);
        let updated = active.update(conn).await?;
        return Ok((updated, false));
    }

    Ok((user, rows == 1))
}
