//! Display models for the battle screen: action counter and hand cards.
//!
//! Both are pure functions of their inputs; nothing here is persisted.

use serde::Serialize;

use super::card::Card;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Palette {
    Normal,
    Warning,
    Exhausted,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct ActionCounter {
    pub actions_remaining: u32,
    pub max_actions: u32,
    pub warning_threshold: u32,
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub struct ActionCounterView {
    pub palette: Palette,
    pub filled: u32,
    pub empty: u32,
}

impl ActionCounter {
    pub const DEFAULT_WARNING_THRESHOLD: u32 = 1;

    pub fn new(actions_remaining: u32, max_actions: u32) -> Self {
        Self {
            actions_remaining,
            max_actions,
            warning_threshold: Self::DEFAULT_WARNING_THRESHOLD,
        }
    }

    pub fn with_warning_threshold(mut self, threshold: u32) -> Self {
        self.warning_threshold = threshold;
        self
    }

    pub fn palette(&self) -> Palette {
        match self.actions_remaining {
            0 => Palette::Exhausted,
            n if n <= self.warning_threshold => Palette::Warning,
            _ => Palette::Normal,
        }
    }

    pub fn view(&self) -> ActionCounterView {
        let filled = self.actions_remaining.min(self.max_actions);
        ActionCounterView {
            palette: self.palette(),
            filled,
            empty: self.max_actions - filled,
        }
    }
}

/// Where a hand card was drawn from.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CardSource {
    Deck,
    Pool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HandCard {
    pub card: Card,
    pub source: CardSource,
    /// Semantic similarity in `0.0..=1.0`, if scored.
    pub similarity: Option<f64>,
    pub rarity_bonus: Option<u32>,
    pub selected: bool,
    pub disabled: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HandCardView {
    pub card: Card,
    pub source: CardSource,
    pub similarity: Option<String>,
    pub rarity_bonus: Option<String>,
    pub selected: bool,
    pub disabled: bool,
}

impl HandCard {
    pub fn new(card: Card, source: CardSource) -> Self {
        Self {
            card,
            source,
            similarity: None,
            rarity_bonus: None,
            selected: false,
            disabled: false,
        }
    }

    pub fn view(&self) -> HandCardView {
        HandCardView {
            card: self.card.clone(),
            source: self.source,
            similarity: self.similarity.map(format_similarity),
            rarity_bonus: self.rarity_bonus.map(|b| format!("+{b}")),
            selected: self.selected,
            disabled: self.disabled,
        }
    }
}

/// `0.874` -> `"87%"`. NaN renders as `"0%"`.
pub fn format_similarity(score: f64) -> String {
    let pct = if score.is_nan() {
        0.0
    } else {
        (score * 100.0).clamp(0.0, 100.0)
    };
    format!("{}%", pct.floor() as u32)
}
