//! Fixture catalog loading for development databases.

use sea_orm::ConnectionTrait;
use tracing::info;

use crate::domain::fixtures::catalog_seed;
use crate::error::AppError;
use crate::repos::cards;

/// Insert the fixture catalog when the cards table is empty.
///
/// Returns the number of rows written; `0` when cards already exist.
pub async fn seed_catalog<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<u64, AppError> {
    let existing = cards::count_cards(conn).await?;
    if existing > 0 {
        info!(existing, "Catalog already populated, skipping seed");
        return Ok(0);
    }

    let rows = catalog_seed()
        .into_iter()
        .map(|seed| (seed.rarity, seed.text.to_string(), seed.card_number));
    let inserted = cards::insert_cards(conn, rows).await?;

    info!(inserted, "Catalog seeded");
    Ok(inserted)
}
