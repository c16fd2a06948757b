//! Repository functions for the domain layer (generic over ConnectionTrait).

pub mod cards;
pub mod decks;
pub mod users;
