use wordsense_backend::config::db::{sqlite_file_url, DbKind};
use wordsense_backend::db::require_db;
use wordsense_backend::infra::state::build_state;
use wordsense_backend::repos::cards;

use crate::support::test_security;

#[tokio::test]
async fn file_database_survives_reopen_without_reseeding() -> Result<(), Box<dyn std::error::Error>>
{
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("wordsense.db");
    let url = sqlite_file_url(path.to_str().ok_or("non-utf8 temp path")?);

    let first = build_state()
        .with_db_url(DbKind::SqliteFile, url.clone())
        .with_security(test_security())
        .with_seed(true)
        .build()
        .await?;
    let seeded = cards::count_cards(require_db(&first)?).await?;
    assert_eq!(seeded, 35);
    drop(first);

    let second = build_state()
        .with_db_url(DbKind::SqliteFile, url)
        .with_security(test_security())
        .with_seed(true)
        .build()
        .await?;
    assert_eq!(cards::count_cards(require_db(&second)?).await?, seeded);
    Ok(())
}
