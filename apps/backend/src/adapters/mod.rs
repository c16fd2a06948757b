//! SeaORM adapters. Functions here return `DbErr`; repos map to `DomainError`.

pub mod cards_sea;
pub mod decks_sea;
pub mod users_sea;
