use vocab_core::model::{DictionaryId, ProgressRecord, UserId};

use super::{
    SqliteRepository,
    mapping::{map_progress_row, u64_to_i64, usize_to_i64},
};
use crate::repository::{ProgressRepository, StorageError};

#[async_trait::async_trait]
impl ProgressRepository for SqliteRepository {
    async fn find_progress(
        &self,
        user_id: UserId,
        dictionary_id: DictionaryId,
    ) -> Result<Option<ProgressRecord>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT
                user_id, dictionary_id, active, level, start_index, end_index,
                step, stop_level, base_score, mastery_threshold,
                current_word_index, created_at
            FROM progress
            WHERE user_id = ?1 AND dictionary_id = ?2
            ",
        )
        .bind(u64_to_i64("user_id", user_id.value())?)
        .bind(u64_to_i64("dictionary_id", dictionary_id.value())?)
        .fetch_optional(self.pool())
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        row.as_ref().map(map_progress_row).transpose()
    }

    async fn upsert_progress(&self, record: &ProgressRecord) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO progress (
                user_id, dictionary_id, active, level, start_index, end_index,
                step, stop_level, base_score, mastery_threshold,
                current_word_index, created_at
            )
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            ON CONFLICT(user_id, dictionary_id) DO UPDATE SET
                active = excluded.active,
                level = excluded.level,
                start_index = excluded.start_index,
                end_index = excluded.end_index,
                step = excluded.step,
                stop_level = excluded.stop_level,
                base_score = excluded.base_score,
                mastery_threshold = excluded.mastery_threshold,
                current_word_index = excluded.current_word_index,
                created_at = excluded.created_at
            ",
        )
        .bind(u64_to_i64("user_id", record.user_id().value())?)
        .bind(u64_to_i64("dictionary_id", record.dictionary_id().value())?)
        .bind(record.is_active())
        .bind(i64::from(record.level()))
        .bind(usize_to_i64("start_index", record.start_index())?)
        .bind(usize_to_i64("end_index", record.end_index())?)
        .bind(usize_to_i64("step", record.step())?)
        .bind(i64::from(record.stop_level()))
        .bind(i64::from(record.base_score()))
        .bind(i64::from(record.mastery_threshold()))
        .bind(usize_to_i64("current_word_index", record.current_word_index())?)
        .bind(record.created_at())
        .execute(self.pool())
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }
}
