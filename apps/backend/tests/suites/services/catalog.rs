use wordsense_backend::db::require_db;
use wordsense_backend::domain::{CardKey, Rarity};
use wordsense_backend::repos::cards;
use wordsense_backend::services::catalog;

use crate::support::{build_empty_state, build_test_state};

#[tokio::test]
async fn inserted_card_appears_only_in_its_tier() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_empty_state().await?;
    let db = require_db(&state)?;

    for rarity in Rarity::ALL {
        cards::insert_cards(db, [(rarity, format!("{rarity}-word"), "1".to_string())]).await?;
    }

    for rarity in Rarity::ALL {
        let listed = cards::list_by_rarity(db, rarity).await?;
        assert_eq!(listed.len(), 1, "{rarity}");
        assert_eq!(listed[0].rarity, rarity);
        assert_eq!(listed[0].text, format!("{rarity}-word"));
    }
    Ok(())
}

#[tokio::test]
async fn empty_lookup_returns_nothing_for_any_store() -> Result<(), Box<dyn std::error::Error>> {
    for state in [build_empty_state().await?, build_test_state().await?] {
        let found = catalog::get_cards_by_details(require_db(&state)?, &[]).await?;
        assert!(found.is_empty());
    }
    Ok(())
}

#[tokio::test]
async fn lookup_never_multiplies_stored_rows() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_empty_state().await?;
    let db = require_db(&state)?;

    // two stored rows share a key; no uniqueness is enforced
    cards::insert_cards(
        db,
        [
            (Rarity::Rare, "森".to_string(), "3".to_string()),
            (Rarity::Rare, "林".to_string(), "3".to_string()),
        ],
    )
    .await?;

    let key = CardKey::new(Rarity::Rare, 3);
    let found = catalog::get_cards_by_details(db, &[key, key, key]).await?;
    assert_eq!(found.len(), 2);
    Ok(())
}

#[tokio::test]
async fn tier_page_of_an_empty_tier_is_done() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_empty_state().await?;
    let page = catalog::get_tier_page(require_db(&state)?, Rarity::Epic, 10, None).await?;
    assert!(page.page.is_empty());
    assert!(page.is_done);
    assert!(page.continue_cursor.is_none());
    Ok(())
}

#[tokio::test]
async fn large_batch_lookup_resolves_every_key() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_empty_state().await?;
    let db = require_db(&state)?;

    let stored: u32 = 2000;
    let rows: Vec<(Rarity, String, String)> = (1..=stored)
        .map(|n| (Rarity::Common, format!("word-{n}"), n.to_string()))
        .collect();
    for chunk in rows.chunks(250) {
        cards::insert_cards(db, chunk.to_vec()).await?;
    }

    // 2500 common keys (500 with no card) plus a few in other tiers
    let mut keys: Vec<CardKey> = (1..=2500).map(|n| CardKey::new(Rarity::Common, n)).collect();
    keys.extend((1..=50).map(|n| CardKey::new(Rarity::Epic, n)));

    let found = catalog::get_cards_by_details(db, &keys).await?;
    assert_eq!(found.len(), stored as usize);
    assert!(found.windows(2).all(|w| w[0].id < w[1].id));
    assert!(found.iter().all(|c| c.rarity == Rarity::Common));
    Ok(())
}

#[tokio::test]
async fn mixed_rarity_lookup_is_in_id_order() -> Result<(), Box<dyn std::error::Error>> {
    let state = build_test_state().await?;
    let db = require_db(&state)?;

    let keys = [
        CardKey::new(Rarity::Legendary, 1),
        CardKey::new(Rarity::Common, 5),
        CardKey::new(Rarity::Rare, 2),
        CardKey::new(Rarity::Common, 1),
        CardKey::new(Rarity::Epic, 99),
    ];
    let found = catalog::get_cards_by_details(db, &keys).await?;

    assert_eq!(found.len(), 4);
    assert!(found.windows(2).all(|w| w[0].id < w[1].id));

    let texts: Vec<&str> = found.iter().map(|c| c.text.as_str()).collect();
    for expected in ["神", "空", "山"] {
        assert!(texts.contains(&expected), "{expected} missing from {texts:?}");
    }
    assert!(found
        .iter()
        .any(|c| c.rarity == Rarity::Rare && c.card_number == "2"));
    Ok(())
}
