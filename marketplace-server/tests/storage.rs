//! On-disk database lifecycle

use marketplace_server::db::DbService;
use marketplace_server::db::repository::settings;

#[tokio::test]
async fn opens_creates_and_migrates_a_database_file() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("marketplace.db");
    let db = DbService::new(db_path.to_str().unwrap()).await.unwrap();
    assert!(db_path.exists());

    // seed data from migrations is in place
    let rate = settings::commission_rate(&db.pool).await.unwrap();
    assert_eq!(rate, 10.0);

    // reopening against the same file is idempotent
    drop(db);
    let db = DbService::new(db_path.to_str().unwrap()).await.unwrap();
    settings::set(&db.pool, "commission_rate", "12.5")
        .await
        .unwrap();
    assert_eq!(settings::commission_rate(&db.pool).await.unwrap(), 12.5);
}

#[tokio::test]
async fn unparseable_commission_rate_falls_back_to_default() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("m.db");
    let db = DbService::new(db_path.to_str().unwrap()).await.unwrap();
    settings::set(&db.pool, "commission_rate", "not-a-number")
        .await
        .unwrap();
    assert_eq!(settings::commission_rate(&db.pool).await.unwrap(), 10.0);
}
