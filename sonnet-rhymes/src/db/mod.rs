//! Rhyme store
//!
//! Persistent storage of words and symmetric rhyme facts in SQLite. The
//! store hands out [`StoreConnection`]s scoped to one operation; the pooled
//! connection goes back to the pool when the handle is dropped, on success
//! and error paths alike.

pub mod rhymes;

use crate::models::RhymeFact;
use sonnet_common::config::DatabaseConfig;
use sonnet_common::Result;
use sqlx::pool::PoolConnection;
use sqlx::{Connection, Sqlite, SqlitePool};
use std::path::Path;
use tracing::debug;

/// Handle to the rhyme database
///
/// Cheap to clone; all clones share one connection pool.
#[derive(Clone)]
pub struct RhymeStore {
    pool: SqlitePool,
}

impl RhymeStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating if needed) the database at `db_path`
    pub async fn open(db_path: &Path, config: &DatabaseConfig) -> Result<Self> {
        let pool = sonnet_common::db::init_database(db_path, config).await?;
        Ok(Self::new(pool))
    }

    /// Acquire a connection for the duration of one operation
    pub async fn acquire(&self) -> Result<StoreConnection> {
        let conn = self.pool.acquire().await?;
        Ok(StoreConnection { conn })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Result of a [`StoreConnection::populate`] call
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopulateOutcome {
    /// Word claimed and facts written (`facts_inserted` counts both directions)
    Populated { facts_inserted: usize },
    /// Word was already populated; nothing was written
    AlreadyPopulated,
}

/// Scoped connection to the rhyme store
pub struct StoreConnection {
    conn: PoolConnection<Sqlite>,
}

impl StoreConnection {
    pub async fn is_populated(&mut self, word: &str) -> Result<bool> {
        rhymes::is_populated(&mut self.conn, word).await
    }

    pub async fn word_exists(&mut self, word: &str) -> Result<bool> {
        rhymes::word_exists(&mut self.conn, word).await
    }

    pub async fn add_word(&mut self, word: &str) -> Result<()> {
        rhymes::add_word(&mut self.conn, word).await
    }

    pub async fn find_rhymes(&mut self, word: &str) -> Result<Vec<RhymeFact>> {
        rhymes::find_rhymes(&mut self.conn, word).await
    }

    /// Persist the provider results for `word` in one transaction
    ///
    /// Marks `word` populated, creates unpopulated rows for the words on the
    /// other side of each fact, and stores every fact in both directions,
    /// skipping pairs already present. An empty `facts` list still marks the
    /// word populated. If another caller populated `word` first, the call
    /// commits without writing and reports [`PopulateOutcome::AlreadyPopulated`].
    ///
    /// Any error drops the open transaction, which rolls it back.
    pub async fn populate(&mut self, word: &str, facts: &[RhymeFact]) -> Result<PopulateOutcome> {
        let mut tx = self.conn.begin().await?;

        // The upsert takes the write lock first so concurrent populates serialize here
        if !rhymes::claim_populated(&mut tx, word).await? {
            tx.commit().await?;
            debug!(word = %word, "Word already populated, skipping");
            return Ok(PopulateOutcome::AlreadyPopulated);
        }

        let mut facts_inserted = 0;
        for fact in facts {
            let other = if fact.word1 == word {
                &fact.word2
            } else {
                &fact.word1
            };
            rhymes::add_word(&mut tx, other).await?;

            if rhymes::insert_fact_if_absent(&mut tx, fact).await? {
                facts_inserted += 1;
            }
            if rhymes::insert_fact_if_absent(&mut tx, &fact.mirrored()).await? {
                facts_inserted += 1;
            }
        }

        tx.commit().await?;

        debug!(
            word = %word,
            provider_results = facts.len(),
            facts_inserted,
            "Populated rhymes"
        );

        Ok(PopulateOutcome::Populated { facts_inserted })
    }
}
