//! Word and rhyme fact queries
//!
//! Free functions over a single connection. Callers decide whether that
//! connection is a plain pooled connection or an open transaction.

use crate::models::RhymeFact;
use sonnet_common::Result;
use sqlx::{Row, SqliteConnection};

/// True iff `word` exists and has been populated
pub async fn is_populated(conn: &mut SqliteConnection, word: &str) -> Result<bool> {
    let populated: Option<bool> = sqlx::query_scalar("SELECT populated FROM words WHERE word = ?")
        .bind(word)
        .fetch_optional(conn)
        .await?;

    Ok(populated.unwrap_or(false))
}

/// True iff a words row exists for `word`, populated or not
pub async fn word_exists(conn: &mut SqliteConnection, word: &str) -> Result<bool> {
    let found: Option<String> = sqlx::query_scalar("SELECT word FROM words WHERE word = ?")
        .bind(word)
        .fetch_optional(conn)
        .await?;

    Ok(found.is_some())
}

/// Insert `word` as not yet populated; no-op if it already exists
pub async fn add_word(conn: &mut SqliteConnection, word: &str) -> Result<()> {
    sqlx::query("INSERT OR IGNORE INTO words (word, populated) VALUES (?, 0)")
        .bind(word)
        .execute(conn)
        .await?;

    Ok(())
}

/// Mark `word` populated, creating it if needed
///
/// Returns false when the word was already populated, in which case nothing
/// changed. The flag only ever moves from 0 to 1.
pub async fn claim_populated(conn: &mut SqliteConnection, word: &str) -> Result<bool> {
    let result = sqlx::query(
        r#"
        INSERT INTO words (word, populated) VALUES (?, 1)
        ON CONFLICT(word) DO UPDATE SET populated = 1
        WHERE words.populated = 0
        "#,
    )
    .bind(word)
    .execute(conn)
    .await?;

    Ok(result.rows_affected() > 0)
}

/// All stored facts with `word1 = word`, in insertion order
pub async fn find_rhymes(conn: &mut SqliteConnection, word: &str) -> Result<Vec<RhymeFact>> {
    let rows = sqlx::query(
        r#"
        SELECT word1, word2, num_syllables, score
        FROM rhymes
        WHERE word1 = ?
        ORDER BY rowid
        "#,
    )
    .bind(word)
    .fetch_all(conn)
    .await?;

    Ok(rows
        .into_iter()
        .map(|row| RhymeFact {
            word1: row.get("word1"),
            word2: row.get("word2"),
            num_syllables: row.get("num_syllables"),
            score: row.get("score"),
        })
        .collect())
}

/// Insert one directed fact unless `(word1, word2)` is already stored
///
/// Returns true if a row was written. An existing fact keeps its score and
/// syllable count (first write wins).
pub async fn insert_fact_if_absent(conn: &mut SqliteConnection, fact: &RhymeFact) -> Result<bool> {
    let result = sqlx::query(
        r#"
        INSERT INTO rhymes (word1, word2, num_syllables, score)
        SELECT ?, ?, ?, ?
        WHERE NOT EXISTS (
            SELECT 1 FROM rhymes WHERE word1 = ? AND word2 = ?
        )
        "#,
    )
    .bind(&fact.word1)
    .bind(&fact.word2)
    .bind(fact.num_syllables)
    .bind(fact.score)
    .bind(&fact.word1)
    .bind(&fact.word2)
    .execute(conn)
    .await?;

    Ok(result.rows_affected() > 0)
}
