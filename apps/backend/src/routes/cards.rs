use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::db::require_db;
use crate::domain::{CardKey, Rarity};
use crate::error::AppError;
use crate::extractors::{CurrentUser, PageQuery, ValidatedJson};
use crate::services::catalog;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct LookupEntry {
    rarity: String,
    index: u32,
}

#[derive(Debug, Deserialize)]
struct LookupRequest {
    requests: Vec<LookupEntry>,
}

impl LookupRequest {
    /// Rarity strings are parsed here so unknown tiers report `INVALID_RARITY`.
    fn into_keys(self) -> Result<Vec<CardKey>, AppError> {
        self.requests
            .into_iter()
            .map(|entry| -> Result<CardKey, AppError> {
                let rarity = entry.rarity.parse::<Rarity>()?;
                Ok(CardKey::new(rarity, entry.index))
            })
            .collect()
    }
}

async fn legendary(
    _user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let cards = catalog::get_legendary(db).await?;
    Ok(HttpResponse::Ok().json(cards))
}

async fn tier_page(
    _user: CurrentUser,
    path: web::Path<String>,
    query: PageQuery,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let rarity = path.into_inner().parse::<Rarity>()?;
    let db = require_db(&app_state)?;
    let page =
        catalog::get_tier_page(db, rarity, query.num_items, query.cursor.as_deref()).await?;
    Ok(HttpResponse::Ok().json(page))
}

async fn lookup(
    _user: CurrentUser,
    body: ValidatedJson<LookupRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let keys = body.into_inner().into_keys()?;
    let db = require_db(&app_state)?;
    let cards = catalog::get_cards_by_details(db, &keys).await?;
    Ok(HttpResponse::Ok().json(cards))
}

async fn rarities() -> HttpResponse {
    HttpResponse::Ok().json(catalog::rarity_table())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/legendary", web::get().to(legendary))
        .route("/tier/{rarity}", web::get().to(tier_page))
        .route("/lookup", web::post().to(lookup))
        .route("/rarities", web::get().to(rarities));
}
