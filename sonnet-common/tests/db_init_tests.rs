//! Tests for database initialization
//!
//! Covers automatic database creation, reopening an existing file, and the
//! shape of the rhyme cache tables.

use sonnet_common::config::DatabaseConfig;
use sonnet_common::db::init::init_database;
use tempfile::TempDir;

#[tokio::test]
async fn test_database_creation_when_missing() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("rhymes.db");

    assert!(!db_path.exists());

    let result = init_database(&db_path, &DatabaseConfig::default()).await;

    assert!(result.is_ok(), "Database initialization failed: {:?}", result.err());
    assert!(db_path.exists(), "Database file was not created");
}

#[tokio::test]
async fn test_database_opens_existing_and_keeps_rows() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("rhymes.db");
    let config = DatabaseConfig::default();

    let pool = init_database(&db_path, &config).await.unwrap();
    sqlx::query("INSERT INTO words (word, populated) VALUES ('light', 1)")
        .execute(&pool)
        .await
        .unwrap();
    pool.close().await;

    let pool = init_database(&db_path, &config)
        .await
        .expect("Failed to open existing database");

    let populated: bool = sqlx::query_scalar("SELECT populated FROM words WHERE word = 'light'")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert!(populated, "Existing rows must survive re-initialization");
}

#[tokio::test]
async fn test_rhyme_tables_exist() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("rhymes.db");

    let pool = init_database(&db_path, &DatabaseConfig::default())
        .await
        .unwrap();

    let tables: Vec<String> = sqlx::query_scalar(
        "SELECT name FROM sqlite_master WHERE type='table' AND name NOT LIKE 'sqlite_%' ORDER BY name",
    )
    .fetch_all(&pool)
    .await
    .unwrap();

    assert_eq!(tables, vec!["rhymes", "schema_version", "words"]);

    let rhyme_columns: Vec<String> =
        sqlx::query_scalar("SELECT name FROM pragma_table_info('rhymes') ORDER BY cid")
            .fetch_all(&pool)
            .await
            .unwrap();
    assert_eq!(rhyme_columns, vec!["word1", "word2", "num_syllables", "score"]);
}

#[tokio::test]
async fn test_words_primary_key_rejects_duplicates() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("rhymes.db");

    let pool = init_database(&db_path, &DatabaseConfig::default())
        .await
        .unwrap();

    sqlx::query("INSERT INTO words (word) VALUES ('night')")
        .execute(&pool)
        .await
        .unwrap();
    let duplicate = sqlx::query("INSERT INTO words (word) VALUES ('night')")
        .execute(&pool)
        .await;

    assert!(duplicate.is_err(), "words.word must be unique");
}

#[tokio::test]
async fn test_wal_mode_enabled() {
    let temp_dir = TempDir::new().unwrap();
    let db_path = temp_dir.path().join("rhymes.db");

    let pool = init_database(&db_path, &DatabaseConfig::default())
        .await
        .unwrap();

    let mode: String = sqlx::query_scalar("PRAGMA journal_mode")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(mode.to_lowercase(), "wal");
}
