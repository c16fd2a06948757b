//! Rarity tiers and their presentation table.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::domain::{DomainError, ValidationKind};

#[derive(
    Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum Rarity {
    Common,
    Rare,
    SuperRare,
    Epic,
    Legendary,
}

/// Visual treatment for a tier. Only consumed by clients.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Serialize)]
pub struct RarityStyle {
    pub color: &'static str,
    pub intensity: u8,
    pub glow: bool,
    pub animated: bool,
}

impl Rarity {
    pub const ALL: [Rarity; 5] = [
        Rarity::Common,
        Rarity::Rare,
        Rarity::SuperRare,
        Rarity::Epic,
        Rarity::Legendary,
    ];

    /// Tiers served page by page; legendary is small and always returned whole.
    pub const PAGINATED: [Rarity; 4] = [
        Rarity::Common,
        Rarity::Rare,
        Rarity::SuperRare,
        Rarity::Epic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Rarity::Common => "common",
            Rarity::Rare => "rare",
            Rarity::SuperRare => "super_rare",
            Rarity::Epic => "epic",
            Rarity::Legendary => "legendary",
        }
    }

    /// 1 (common) through 5 (legendary).
    pub fn tier(self) -> u8 {
        match self {
            Rarity::Common => 1,
            Rarity::Rare => 2,
            Rarity::SuperRare => 3,
            Rarity::Epic => 4,
            Rarity::Legendary => 5,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Rarity::Common => "並",
            Rarity::Rare => "良",
            Rarity::SuperRare => "優",
            Rarity::Epic => "傑",
            Rarity::Legendary => "極",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|r| r.label() == label.trim())
    }

    pub fn is_paginated(self) -> bool {
        self != Rarity::Legendary
    }

    pub fn style(self) -> RarityStyle {
        match self {
            Rarity::Common => RarityStyle {
                color: "#9ca3af",
                intensity: 1,
                glow: false,
                animated: false,
            },
            Rarity::Rare => RarityStyle {
                color: "#3b82f6",
                intensity: 2,
                glow: false,
                animated: false,
            },
            Rarity::SuperRare => RarityStyle {
                color: "#a855f7",
                intensity: 3,
                glow: true,
                animated: false,
            },
            Rarity::Epic => RarityStyle {
                color: "#f59e0b",
                intensity: 4,
                glow: true,
                animated: true,
            },
            Rarity::Legendary => RarityStyle {
                color: "#ef4444",
                intensity: 5,
                glow: true,
                animated: true,
            },
        }
    }
}

impl fmt::Display for Rarity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Accepts the snake_case name (any case) or the cosmetic label.
impl FromStr for Rarity {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let lowered = trimmed.to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == lowered)
            .or_else(|| Self::from_label(trimmed))
            .ok_or_else(|| {
                DomainError::validation(
                    ValidationKind::InvalidRarity,
                    format!("Unknown rarity: {trimmed}"),
                )
            })
    }
}
