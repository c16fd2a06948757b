//! Application services: orchestration over repos, transactions and live queries.

pub mod catalog;
pub mod decks;
pub mod users;
