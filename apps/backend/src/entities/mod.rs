pub mod cards;
pub mod decks;
pub mod users;

pub use cards::Entity as Cards;
pub use cards::Model as Card;
pub use decks::Entity as Decks;
pub use decks::Model as Deck;
pub use users::Entity as Users;
pub use users::Model as User;
