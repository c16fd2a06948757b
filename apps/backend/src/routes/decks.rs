use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::db::require_db;
use crate::error::AppError;
use crate::extractors::{CurrentUser, DeckId, ValidatedJson};
use crate::services::decks as deck_service;
use crate::state::app_state::AppState;

#[derive(Debug, Deserialize)]
struct CreateDeckRequest {
    deck_name: String,
}

async fn create_deck(
    current_user: CurrentUser,
    body: ValidatedJson<CreateDeckRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let deck = deck_service::create_deck(&app_state, current_user.id, &body.deck_name).await?;
    Ok(HttpResponse::Created().json(deck))
}

async fn list_decks(
    current_user: CurrentUser,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let decks = deck_service::list_decks(db, current_user.id).await?;
    Ok(HttpResponse::Ok().json(decks))
}

async fn delete_deck(
    current_user: CurrentUser,
    deck_id: DeckId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    deck_service::delete_deck(&app_state, current_user.id, deck_id.0).await?;
    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_decks))
            .route(web::post().to(create_deck)),
    )
    .route("/{deck_id}", web::delete().to(delete_deck));
}
