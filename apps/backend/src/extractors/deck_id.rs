use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::error::AppError;
use crate::errors::ErrorCode;

/// `{deck_id}` path segment, parsed and checked to be positive.
///
/// Existence and ownership are checked by the service, so a missing deck and
/// someone else's deck look the same to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeckId(pub i64);

pub fn parse_deck_id(raw: &str) -> Result<i64, AppError> {
    let id = raw.trim().parse::<i64>().map_err(|_| {
        AppError::invalid(ErrorCode::InvalidDeckId, format!("Invalid deck id: {raw}"))
    })?;
    if id <= 0 {
        return Err(AppError::invalid(
            ErrorCode::InvalidDeckId,
            format!("Deck id must be positive, got: {id}"),
        ));
    }
    Ok(id)
}

impl FromRequest for DeckId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        let parsed = match req.match_info().get("deck_id") {
            Some(raw) => parse_deck_id(raw).map(DeckId),
            None => Err(AppError::invalid(
                ErrorCode::InvalidDeckId,
                "Missing deck_id parameter",
            )),
        };
        ready(parsed)
    }
}
