use chrono::Utc;
use sqlx::SqlitePool;

use super::SqliteInitError;

/// Runs a single, consolidated migration for the current schema.
///
/// Creates the full schema: dictionaries, word pairs, and progress records,
/// with the (user, slug) and (user, dictionary) uniqueness rules and cascade
/// deletes the domain relies on.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), SqliteInitError> {
    async fn is_applied(pool: &SqlitePool, version: i64) -> Result<bool, sqlx::Error> {
        let row = sqlx::query("SELECT 1 FROM schema_migrations WHERE version = ?1")
            .bind(version)
            .fetch_optional(pool)
            .await?;
        Ok(row.is_some())
    }

    sqlx::query(
        r"
            CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL
            );
            ",
    )
    .execute(pool)
    .await?;

    // Version 1: full schema.
    if !is_applied(pool, 1).await? {
        let mut tx = pool.begin().await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS dictionaries (
                    id INTEGER PRIMARY KEY,
                    user_id INTEGER NOT NULL,
                    title TEXT NOT NULL,
                    slug TEXT NOT NULL,
                    created_at TEXT NOT NULL,
                    UNIQUE (user_id, slug)
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS word_pairs (
                    id INTEGER PRIMARY KEY,
                    dictionary_id INTEGER NOT NULL,
                    original TEXT NOT NULL,
                    translation TEXT NOT NULL,
                    UNIQUE (dictionary_id, original),
                    FOREIGN KEY (dictionary_id) REFERENCES dictionaries(id) ON DELETE CASCADE
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE TABLE IF NOT EXISTS progress (
                    user_id INTEGER NOT NULL,
                    dictionary_id INTEGER NOT NULL,
                    active INTEGER NOT NULL,
                    level INTEGER NOT NULL CHECK (level >= 1),
                    start_index INTEGER NOT NULL CHECK (start_index >= 0),
                    end_index INTEGER NOT NULL CHECK (end_index >= start_index),
                    step INTEGER NOT NULL CHECK (step > 0),
                    stop_level INTEGER NOT NULL,
                    base_score INTEGER NOT NULL,
                    mastery_threshold INTEGER NOT NULL,
                    current_word_index INTEGER NOT NULL CHECK (current_word_index >= 0),
                    created_at TEXT,
                    PRIMARY KEY (user_id, dictionary_id),
                    FOREIGN KEY (dictionary_id) REFERENCES dictionaries(id) ON DELETE CASCADE
                );
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                CREATE INDEX IF NOT EXISTS idx_word_pairs_dictionary
                    ON word_pairs (dictionary_id, id);
            ",
        )
        .execute(&mut *tx)
        .await?;

        sqlx::query(
            r"
                INSERT INTO schema_migrations (version, applied_at)
                VALUES (?1, ?2)
                ON CONFLICT(version) DO NOTHING
            ",
        )
        .bind(1_i64)
        .bind(Utc::now())
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
    }

    Ok(())
}
