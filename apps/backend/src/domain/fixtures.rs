//! Static development data: the seed catalog and mock card ownership.

use super::card::CardKey;
use super::rarity::Rarity;

/// Words per tier. `card_number` is the 1-based position within the tier.
const CATALOG: &[(Rarity, &[&str])] = &[
    (
        Rarity::Common,
        &[
            "山", "川", "木", "花", "空", "雨", "石", "火", "水", "土", "月", "風", "道", "町",
        ],
    ),
    (
        Rarity::Rare,
        &["森", "海", "雪", "星", "光", "音", "夢", "橋"],
    ),
    (Rarity::SuperRare, &["嵐", "虹", "雷", "霧", "桜", "鏡"]),
    (Rarity::Epic, &["龍", "刀", "城", "魂"]),
    (Rarity::Legendary, &["神", "宇宙", "永遠"]),
];

/// One catalog row to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedCard {
    pub text: &'static str,
    pub rarity: Rarity,
    pub card_number: String,
}

/// Seed rows in insertion order (tier by tier, then by number).
pub fn catalog_seed() -> Vec<SeedCard> {
    CATALOG
        .iter()
        .flat_map(|(rarity, words)| {
            words.iter().enumerate().map(move |(i, text)| SeedCard {
                text: *text,
                rarity: *rarity,
                card_number: (i + 1).to_string(),
            })
        })
        .collect()
}

/// Ownership record standing in for a real user-card table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MockUserCard {
    pub id: &'static str,
    pub rarity: Rarity,
    pub card_number: u32,
    pub is_locked: bool,
}

impl MockUserCard {
    pub fn key(&self) -> CardKey {
        CardKey::new(self.rarity, self.card_number)
    }
}

/// The last record points at a card that is not in the seed catalog.
pub const MOCK_USER_CARDS: &[MockUserCard] = &[
    MockUserCard {
        id: "uc_0001",
        rarity: Rarity::Common,
        card_number: 1,
        is_locked: false,
    },
    MockUserCard {
        id: "uc_0002",
        rarity: Rarity::Common,
        card_number: 5,
        is_locked: false,
    },
    MockUserCard {
        id: "uc_0003",
        rarity: Rarity::Common,
        card_number: 5,
        is_locked: true,
    },
    MockUserCard {
        id: "uc_0004",
        rarity: Rarity::Rare,
        card_number: 2,
        is_locked: false,
    },
    MockUserCard {
        id: "uc_0005",
        rarity: Rarity::SuperRare,
        card_number: 1,
        is_locked: true,
    },
    MockUserCard {
        id: "uc_0006",
        rarity: Rarity::Epic,
        card_number: 3,
        is_locked: false,
    },
    MockUserCard {
        id: "uc_0007",
        rarity: Rarity::Legendary,
        card_number: 1,
        is_locked: true,
    },
    MockUserCard {
        id: "uc_0008",
        rarity: Rarity::Epic,
        card_number: 99,
        is_locked: false,
    },
];
