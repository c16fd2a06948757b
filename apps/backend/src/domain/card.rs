//! Catalog card as exposed to clients.

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use super::rarity::Rarity;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Card {
    pub id: i64,
    pub text: String,
    pub rarity: Rarity,
    pub card_number: String,
}

impl Card {
    pub fn label(&self) -> &'static str {
        self.rarity.label()
    }
}

// `label` is derived from the rarity, never stored.
impl Serialize for Card {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut s = serializer.serialize_struct("Card", 5)?;
        s.serialize_field("id", &self.id)?;
        s.serialize_field("text", &self.text)?;
        s.serialize_field("rarity", &self.rarity)?;
        s.serialize_field("card_number", &self.card_number)?;
        s.serialize_field("label", self.label())?;
        s.end()
    }
}

/// One `(rarity, index)` pair of a batch lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Deserialize)]
pub struct CardKey {
    pub rarity: Rarity,
    pub index: u32,
}

impl CardKey {
    pub fn new(rarity: Rarity, index: u32) -> Self {
        Self { rarity, index }
    }

    /// Stored form of the index.
    pub fn card_number(&self) -> String {
        self.index.to_string()
    }
}
