pub mod current_user;
pub mod deck_id;
pub mod page_query;
pub mod validated_json;

pub use current_user::CurrentUser;
pub use deck_id::DeckId;
pub use page_query::PageQuery;
pub use validated_json::ValidatedJson;
