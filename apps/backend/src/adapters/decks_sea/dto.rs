//! DTOs for decks_sea adapter.

#[derive(Debug, Clone)]
pub struct DeckCreate {
    pub user_id: i64,
    pub deck_name: String,
}

impl DeckCreate {
    pub fn new(user_id: i64, deck_name: impl Into<String>) -> Self {
        Self {
            user_id,
            deck_name: deck_name.into(),
        }
    }
}
