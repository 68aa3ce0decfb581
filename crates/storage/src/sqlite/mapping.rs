use sqlx::Row;
use vocab_core::model::{
    Dictionary, DictionaryId, ProgressRecord, UserId, WordPair, WordPairId,
};

use crate::repository::StorageError;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

fn i64_to_u64(field: &'static str, v: i64) -> Result<u64, StorageError> {
    u64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} sign overflow")))
}

fn i64_to_u32(field: &'static str, v: i64) -> Result<u32, StorageError> {
    u32::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid {field}: {v}")))
}

fn i64_to_i32(field: &'static str, v: i64) -> Result<i32, StorageError> {
    i32::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid {field}: {v}")))
}

fn i64_to_usize(field: &'static str, v: i64) -> Result<usize, StorageError> {
    usize::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid {field}: {v}")))
}

pub(crate) fn u64_to_i64(field: &'static str, v: u64) -> Result<i64, StorageError> {
    i64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} overflow")))
}

pub(crate) fn usize_to_i64(field: &'static str, v: usize) -> Result<i64, StorageError> {
    i64::try_from(v).map_err(|_| StorageError::Serialization(format!("{field} overflow")))
}

pub(crate) fn map_dictionary_row(row: &sqlx::sqlite::SqliteRow) -> Result<Dictionary, StorageError> {
    let id = DictionaryId::new(i64_to_u64("dictionary_id", row.try_get("id").map_err(ser)?)?);
    let user_id = UserId::new(i64_to_u64("user_id", row.try_get("user_id").map_err(ser)?)?);
    let title: String = row.try_get("title").map_err(ser)?;
    let slug: String = row.try_get("slug").map_err(ser)?;
    let created_at: chrono::DateTime<chrono::Utc> = row.try_get("created_at").map_err(ser)?;

    Dictionary::new(id, user_id, title, slug, created_at).map_err(ser)
}

pub(crate) fn map_word_pair_row(row: &sqlx::sqlite::SqliteRow) -> Result<WordPair, StorageError> {
    let id = WordPairId::new(i64_to_u64("word_pair_id", row.try_get("id").map_err(ser)?)?);
    let dictionary_id = DictionaryId::new(i64_to_u64(
        "dictionary_id",
        row.try_get("dictionary_id").map_err(ser)?,
    )?);
    let original: String = row.try_get("original").map_err(ser)?;
    let translation: String = row.try_get("translation").map_err(ser)?;

    WordPair::new(id, dictionary_id, original, translation).map_err(ser)
}

pub(crate) fn map_progress_row(row: &sqlx::sqlite::SqliteRow) -> Result<ProgressRecord, StorageError> {
    let user_id = UserId::new(i64_to_u64("user_id", row.try_get("user_id").map_err(ser)?)?);
    let dictionary_id = DictionaryId::new(i64_to_u64(
        "dictionary_id",
        row.try_get("dictionary_id").map_err(ser)?,
    )?);
    let active: bool = row.try_get("active").map_err(ser)?;
    let level = i64_to_u32("level", row.try_get("level").map_err(ser)?)?;
    let start_index = i64_to_usize("start_index", row.try_get("start_index").map_err(ser)?)?;
    let end_index = i64_to_usize("end_index", row.try_get("end_index").map_err(ser)?)?;
    let step = i64_to_usize("step", row.try_get("step").map_err(ser)?)?;
    let stop_level = i64_to_u32("stop_level", row.try_get("stop_level").map_err(ser)?)?;
    let base_score = i64_to_i32("base_score", row.try_get("base_score").map_err(ser)?)?;
    let mastery_threshold = i64_to_i32(
        "mastery_threshold",
        row.try_get("mastery_threshold").map_err(ser)?,
    )?;
    let current_word_index = i64_to_usize(
        "current_word_index",
        row.try_get("current_word_index").map_err(ser)?,
    )?;
    let created_at: Option<chrono::DateTime<chrono::Utc>> =
        row.try_get("created_at").map_err(ser)?;

    ProgressRecord::from_persisted(
        user_id,
        dictionary_id,
        active,
        level,
        start_index,
        end_index,
        step,
        stop_level,
        base_score,
        mastery_threshold,
        current_word_index,
        created_at,
    )
    .map_err(ser)
}
