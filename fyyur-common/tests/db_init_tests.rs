//! Database initialization against real files
//!
//! Covers first-run creation of the file and its parent folders, reopening an
//! existing database, and data surviving a reopen.

use fyyur_common::db::init::init_database;
use fyyur_common::db::models::NewVenue;
use fyyur_common::db::venues::{count_venues, create_venue, get_venue};
use tempfile::TempDir;

#[tokio::test]
async fn test_database_creation_when_missing() {
    let temp = TempDir::new().unwrap();
    let db_path = temp.path().join("nested").join("data").join("fyyur.db");

    let pool = init_database(&db_path).await;

    assert!(pool.is_ok(), "Database initialization failed: {:?}", pool.err());
    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn test_database_opens_existing() {
    let temp = TempDir::new().unwrap();
    let db_path = temp.path().join("fyyur.db");

    let first = init_database(&db_path).await.unwrap();
    first.close().await;

    let second = init_database(&db_path).await;
    assert!(second.is_ok(), "Failed to open existing database: {:?}", second.err());
}

#[tokio::test]
async fn test_records_survive_reopen() {
    let temp = TempDir::new().unwrap();
    let db_path = temp.path().join("fyyur.db");

    let pool = init_database(&db_path).await.unwrap();
    let created = create_venue(
        &pool,
        &NewVenue {
            name: "The Dueling Pianos Bar".to_string(),
            city: "New York".to_string(),
            state: "NY".to_string(),
            address: "335 Delancey Street".to_string(),
            genres: vec!["Classical".to_string(), "R&B".to_string()],
            ..Default::default()
        },
    )
    .await
    .unwrap();
    pool.close().await;

    let pool = init_database(&db_path).await.unwrap();
    assert_eq!(count_venues(&pool).await.unwrap(), 1);

    let loaded = get_venue(&pool, created.id).await.unwrap().unwrap();
    assert_eq!(loaded, created);
}

#[tokio::test]
async fn test_schema_version_recorded() {
    let temp = TempDir::new().unwrap();
    let pool = init_database(&temp.path().join("fyyur.db")).await.unwrap();

    let version: i64 = sqlx::query_scalar("SELECT version FROM schema_version")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(version, fyyur_common::db::init::SCHEMA_VERSION);
}
