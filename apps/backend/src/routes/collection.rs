use std::collections::HashMap;

use actix_web::{web, HttpResponse};
use serde::Serialize;

use crate::db::require_db;
use crate::domain::fixtures::{MockUserCard, MOCK_USER_CARDS};
use crate::domain::{Card, CardKey};
use crate::error::AppError;
use crate::extractors::CurrentUser;
use crate::services::catalog;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
pub struct OwnedCard {
    pub user_card_id: &'static str,
    pub is_locked: bool,
    pub card: Card,
}

/// Pair ownership records with catalog cards; records without a card are dropped.
///
/// When the catalog holds several rows for one key the first (lowest id) wins.
pub fn join_owned(records: &[MockUserCard], cards: Vec<Card>) -> Vec<OwnedCard> {
    let mut by_key: HashMap<CardKey, Card> = HashMap::with_capacity(cards.len());
    for card in cards {
        let Ok(index) = card.card_number.parse::<u32>() else {
            continue;
        };
        by_key.entry(CardKey::new(card.rarity, index)).or_insert(card);
    }

    records
        .iter()
        .filter_map(|record| {
            by_key.get(&record.key()).map(|card| OwnedCard {
                user_card_id: record.id,
                is_locked: record.is_locked,
                card: card.clone(),
            })
        })
        .collect()
}

async fn collection(
    _user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let keys: Vec<CardKey> = MOCK_USER_CARDS.iter().map(MockUserCard::key).collect();
    let cards = catalog::get_cards_by_details(db, &keys).await?;
    Ok(HttpResponse::Ok().json(join_owned(MOCK_USER_CARDS, cards)))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("", web::get().to(collection));
}
