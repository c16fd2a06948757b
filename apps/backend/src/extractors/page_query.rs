use std::collections::HashMap;

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};
use futures_util::future::{ready, Ready};

use crate::error::AppError;
use crate::errors::ErrorCode;

/// `?num_items=N&cursor=C` for tier listings.
///
/// Range checks happen in the catalog service; this only requires
/// `num_items` to be a non-negative integer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageQuery {
    pub num_items: u64,
    pub cursor: Option<String>,
}

pub fn parse_page_query(query: &str) -> Result<PageQuery, AppError> {
    let params = web::Query::<HashMap<String, String>>::from_query(query)
        .map_err(|_| AppError::bad_request(ErrorCode::BadRequest, "Malformed query string"))?
        .into_inner();

    let raw = params.get("num_items").ok_or_else(|| {
        AppError::invalid(ErrorCode::InvalidPageSize, "num_items is required")
    })?;
    let num_items = raw.trim().parse::<u64>().map_err(|_| {
        AppError::invalid(
            ErrorCode::InvalidPageSize,
            format!("num_items must be a positive integer, got: {raw}"),
        )
    })?;

    Ok(PageQuery {
        num_items,
        cursor: params.get("cursor").cloned().filter(|c| !c.is_empty()),
    })
}

impl FromRequest for PageQuery {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(parse_page_query(req.query_string()))
    }
}
