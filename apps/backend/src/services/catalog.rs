//! Read-only catalog queries: whole-tier, paginated tier, and batch lookup.

use std::collections::HashSet;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use sea_orm::ConnectionTrait;
use serde::Serialize;
use tracing::debug;

use crate::domain::{Card, CardKey, Rarity, RarityStyle};
use crate::error::AppError;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::cards;

pub const MAX_PAGE_SIZE: u64 = 100;

/// One page of a tier listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CardPage {
    pub page: Vec<Card>,
    pub is_done: bool,
    pub continue_cursor: Option<String>,
}

/// Row of the tier table served to clients.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RarityInfo {
    pub rarity: Rarity,
    pub label: &'static str,
    pub tier: u8,
    pub paginated: bool,
    pub style: RarityStyle,
}

/// Position inside one tier: the last id already returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor {
    pub rarity: Rarity,
    pub last_id: i64,
}

impl Cursor {
    pub fn encode(&self) -> String {
        URL_SAFE_NO_PAD.encode(format!("{}:{}", self.rarity.as_str(), self.last_id))
    }

    pub fn decode(token: &str) -> Result<Self, DomainError> {
        let invalid = || DomainError::validation(ValidationKind::InvalidCursor, "Malformed cursor");
        let bytes = URL_SAFE_NO_PAD.decode(token.trim()).map_err(|_| invalid())?;
        let text = String::from_utf8(bytes).map_err(|_| invalid())?;
        let (rarity, last_id) = text.split_once(':').ok_or_else(invalid)?;
        let rarity = rarity.parse::<Rarity>().map_err(|_| invalid())?;
        let last_id = last_id.parse::<i64>().map_err(|_| invalid())?;
        if last_id < 0 {
            return Err(invalid());
        }
        Ok(Self { rarity, last_id })
    }
}

pub fn rarity_table() -> Vec<RarityInfo> {
    Rarity::ALL
        .into_iter()
        .map(|rarity| RarityInfo {
            rarity,
            label: rarity.label(),
            tier: rarity.tier(),
            paginated: rarity.is_paginated(),
            style: rarity.style(),
        })
        .collect()
}

/// Every legendary card, insertion order.
pub async fn get_legendary<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Card>, AppError> {
    Ok(cards::list_by_rarity(conn, Rarity::Legendary).await?)
}

/// Validate page inputs before touching the store.
pub fn validate_page_request(
    rarity: Rarity,
    num_items: u64,
    cursor: Option<&str>,
) -> Result<Option<Cursor>, DomainError> {
    if !rarity.is_paginated() {
        return Err(DomainError::validation(
            ValidationKind::RarityNotPaginated,
            format!("{rarity} cards are listed without pagination"),
        ));
    }
    if !(1..=MAX_PAGE_SIZE).contains(&num_items) {
        return Err(DomainError::validation(
            ValidationKind::InvalidPageSize,
            format!("num_items must be between 1 and {MAX_PAGE_SIZE}"),
        ));
    }
    match cursor.filter(|c| !c.trim().is_empty()) {
        None => Ok(None),
        Some(token) => {
            let cursor = Cursor::decode(token)?;
            if cursor.rarity != rarity {
                return Err(DomainError::validation(
                    ValidationKind::InvalidCursor,
                    format!("Cursor belongs to {} cards", cursor.rarity),
                ));
            }
            Ok(Some(cursor))
        }
    }
}

/// One page of a paginated tier in id order.
pub async fn get_tier_page<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    rarity: Rarity,
    num_items: u64,
    cursor: Option<&str>,
) -> Result<CardPage, AppError> {
    let after = validate_page_request(rarity, num_items, cursor)?;
    let mut page = cards::page_by_rarity(
        conn,
        rarity,
        after.map(|c| c.last_id),
        num_items + 1,
    )
    .await?;

    let has_more = page.len() as u64 > num_items;
    page.truncate(num_items as usize);

    let continue_cursor = match (has_more, page.last()) {
        (true, Some(last)) => Some(
            Cursor {
                rarity,
                last_id: last.id,
            }
            .encode(),
        ),
        _ => None,
    };

    debug!(%rarity, returned = page.len(), has_more, "Tier page served");
    Ok(CardPage {
        page,
        is_done: !has_more,
        continue_cursor,
    })
}

/// Resolve `(rarity, index)` pairs to cards.
///
/// Duplicates are collapsed, unmatched pairs are omitted, and the result is
/// in id order. An empty request never reaches the store.
pub async fn get_cards_by_details<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    requests: &[CardKey],
) -> Result<Vec<Card>, AppError> {
    if requests.is_empty() {
        return Ok(Vec::new());
    }

    let mut seen = HashSet::with_capacity(requests.len());
    let unique: Vec<CardKey> = requests
        .iter()
        .copied()
        .filter(|key| seen.insert(*key))
        .collect();

    let found = cards::find_by_keys(conn, &unique).await?;
    debug!(
        requested = requests.len(),
        unique = unique.len(),
        found = found.len(),
        "Card lookup"
    );
    Ok(found)
}
