mod cards;
mod collection;
mod decks;
mod health;
mod headers;
