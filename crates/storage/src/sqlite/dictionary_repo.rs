use vocab_core::model::{Dictionary, DictionaryId, UserId, WordPair};

use super::{
    SqliteRepository,
    mapping::{map_dictionary_row, map_word_pair_row, u64_to_i64},
};
use crate::repository::{DictionaryRepository, StorageError};

#[async_trait::async_trait]
impl DictionaryRepository for SqliteRepository {
    async fn find_dictionary(
        &self,
        user_id: UserId,
        slug: &str,
    ) -> Result<Dictionary, StorageError> {
        let row = sqlx::query(
            r"
            SELECT id, user_id, title, slug, created_at
            FROM dictionaries
            WHERE user_id = ?1 AND slug = ?2
            ",
        )
        .bind(u64_to_i64("user_id", user_id.value())?)
        .bind(slug)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        match row {
            Some(row) => map_dictionary_row(&row),
            None => Err(StorageError::NotFound),
        }
    }

    async fn list_word_pairs(
        &self,
        dictionary_id: DictionaryId,
    ) -> Result<Vec<WordPair>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, dictionary_id, original, translation
            FROM word_pairs
            WHERE dictionary_id = ?1
            ORDER BY id ASC
            ",
        )
        .bind(u64_to_i64("dictionary_id", dictionary_id.value())?)
        .fetch_all(self.pool())
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut pairs = Vec::with_capacity(rows.len());
        for row in rows {
            pairs.push(map_word_pair_row(&row)?);
        }
        Ok(pairs)
    }
}

// Write-side hooks for the owning application (the scheduler itself never
// creates or deletes vocabulary). Tests use them to stand in for the
// external CRUD layer.
impl SqliteRepository {
    /// Persist or update a dictionary.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` when another dictionary of the same
    /// user already claims the slug.
    pub async fn upsert_dictionary(&self, dictionary: &Dictionary) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO dictionaries (id, user_id, title, slug, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            ON CONFLICT(id) DO UPDATE SET
                -- keep created_at from the original insert
                title = excluded.title,
                slug = excluded.slug
            ",
        )
        .bind(u64_to_i64("dictionary_id", dictionary.id().value())?)
        .bind(u64_to_i64("user_id", dictionary.user_id().value())?)
        .bind(dictionary.title())
        .bind(dictionary.slug())
        .bind(dictionary.created_at())
        .execute(self.pool())
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => StorageError::Conflict,
            other => StorageError::Connection(other.to_string()),
        })?;

        Ok(())
    }

    /// Insert a word pair at the end of its dictionary's listing.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` for a duplicate original within the
    /// dictionary.
    pub async fn insert_word_pair(&self, pair: &WordPair) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO word_pairs (id, dictionary_id, original, translation)
            VALUES (?1, ?2, ?3, ?4)
            ",
        )
        .bind(u64_to_i64("word_pair_id", pair.id().value())?)
        .bind(u64_to_i64("dictionary_id", pair.dictionary_id().value())?)
        .bind(pair.original())
        .bind(pair.translation())
        .execute(self.pool())
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(db) if db.is_unique_violation() => StorageError::Conflict,
            other => StorageError::Connection(other.to_string()),
        })?;

        Ok(())
    }

    /// Delete a dictionary; word pairs and progress records follow by
    /// cascade.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` when no row was deleted.
    pub async fn delete_dictionary(&self, dictionary_id: DictionaryId) -> Result<(), StorageError> {
        let result = sqlx::query("DELETE FROM dictionaries WHERE id = ?1")
            .bind(u64_to_i64("dictionary_id", dictionary_id.value())?)
            .execute(self.pool())
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}
