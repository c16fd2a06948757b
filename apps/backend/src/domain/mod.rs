//! Domain layer: card tiers, card model, battle-screen view models and fixtures.

pub mod battle_view;
pub mod card;
pub mod fixtures;
pub mod rarity;

#[cfg(test)]
mod tests_props;

pub use battle_view::{
    ActionCounter, ActionCounterView, CardSource, HandCard, HandCardView, Palette,
};
pub use card::{Card, CardKey};
pub use rarity::{Rarity, RarityStyle};
