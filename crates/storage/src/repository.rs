use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use vocab_core::model::{Dictionary, DictionaryId, ProgressRecord, UserId, WordPair};

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Read contract over the external vocabulary store.
///
/// The scheduler only ever reads dictionaries and word pairs; creation and
/// editing belong to the owning application. `list_word_pairs` must return a
/// stable id order; the progress window indexes into it.
#[async_trait]
pub trait DictionaryRepository: Send + Sync {
    /// Resolve a dictionary by its unique (user, slug) pair.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    async fn find_dictionary(&self, user_id: UserId, slug: &str)
    -> Result<Dictionary, StorageError>;

    /// List a dictionary's word pairs in insertion (id) order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the listing cannot be read.
    async fn list_word_pairs(
        &self,
        dictionary_id: DictionaryId,
    ) -> Result<Vec<WordPair>, StorageError>;
}

/// Persistence contract for per-(user, dictionary) progress records.
#[async_trait]
pub trait ProgressRepository: Send + Sync {
    /// Fetch the record for a (user, dictionary) pair, if one exists.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the lookup fails.
    async fn find_progress(
        &self,
        user_id: UserId,
        dictionary_id: DictionaryId,
    ) -> Result<Option<ProgressRecord>, StorageError>;

    /// Persist or update a record, keyed by its (user, dictionary) pair.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the record cannot be stored.
    async fn upsert_progress(&self, record: &ProgressRecord) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    dictionaries: Arc<Mutex<HashMap<(UserId, String), Dictionary>>>,
    word_pairs: Arc<Mutex<Vec<WordPair>>>,
    progress: Arc<Mutex<HashMap<(UserId, DictionaryId), ProgressRecord>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a dictionary. Stands in for the external CRUD layer in tests.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Connection` on lock poisoning.
    pub fn insert_dictionary(&self, dictionary: Dictionary) -> Result<(), StorageError> {
        let mut guard = self
            .dictionaries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(
            (dictionary.user_id(), dictionary.slug().to_owned()),
            dictionary,
        );
        Ok(())
    }

    /// Seed a word pair. Rejects a duplicate original within a dictionary,
    /// matching the store's uniqueness rule.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` for a duplicate original.
    pub fn insert_word_pair(&self, pair: WordPair) -> Result<(), StorageError> {
        let mut guard = self
            .word_pairs
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        if guard
            .iter()
            .any(|p| p.dictionary_id() == pair.dictionary_id() && p.original() == pair.original())
        {
            return Err(StorageError::Conflict);
        }
        guard.push(pair);
        Ok(())
    }
}

#[async_trait]
impl DictionaryRepository for InMemoryRepository {
    async fn find_dictionary(
        &self,
        user_id: UserId,
        slug: &str,
    ) -> Result<Dictionary, StorageError> {
        let guard = self
            .dictionaries
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard
            .get(&(user_id, slug.to_owned()))
            .cloned()
            .ok_or(StorageError::NotFound)
    }

    async fn list_word_pairs(
        &self,
        dictionary_id: DictionaryId,
    ) -> Result<Vec<WordPair>, StorageError> {
        let guard = self
            .word_pairs
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let mut pairs: Vec<WordPair> = guard
            .iter()
            .filter(|p| p.dictionary_id() == dictionary_id)
            .cloned()
            .collect();
        pairs.sort_by_key(|p| p.id().value());
        Ok(pairs)
    }
}

#[async_trait]
impl ProgressRepository for InMemoryRepository {
    async fn find_progress(
        &self,
        user_id: UserId,
        dictionary_id: DictionaryId,
    ) -> Result<Option<ProgressRecord>, StorageError> {
        let guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(&(user_id, dictionary_id)).cloned())
    }

    async fn upsert_progress(&self, record: &ProgressRecord) -> Result<(), StorageError> {
        let mut guard = self
            .progress
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.insert(
            (record.user_id(), record.dictionary_id()),
            record.clone(),
        );
        Ok(())
    }
}

/// Aggregates the repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub vocabulary: Arc<dyn DictionaryRepository>,
    pub progress: Arc<dyn ProgressRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        Self::from_in_memory(repo)
    }

    /// Wrap an already-seeded in-memory repository.
    #[must_use]
    pub fn from_in_memory(repo: InMemoryRepository) -> Self {
        let vocabulary: Arc<dyn DictionaryRepository> = Arc::new(repo.clone());
        let progress: Arc<dyn ProgressRepository> = Arc::new(repo);
        Self {
            vocabulary,
            progress,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vocab_core::model::WordPairId;
    use vocab_core::time::fixed_now;

    fn build_dictionary(id: u64, user: u64, slug: &str) -> Dictionary {
        Dictionary::new(
            DictionaryId::new(id),
            UserId::new(user),
            format!("Dictionary {id}"),
            slug,
            fixed_now(),
        )
        .unwrap()
    }

    fn build_pair(id: u64, dictionary_id: DictionaryId, original: &str) -> WordPair {
        WordPair::new(WordPairId::new(id), dictionary_id, original, "translation").unwrap()
    }

    #[tokio::test]
    async fn finds_dictionary_by_user_and_slug() {
        let repo = InMemoryRepository::new();
        repo.insert_dictionary(build_dictionary(1, 1, "spanish"))
            .unwrap();

        let found = repo.find_dictionary(UserId::new(1), "spanish").await.unwrap();
        assert_eq!(found.id(), DictionaryId::new(1));

        // Same slug under a different user is a different dictionary.
        let err = repo
            .find_dictionary(UserId::new(2), "spanish")
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
    }

    #[tokio::test]
    async fn lists_word_pairs_in_id_order() {
        let repo = InMemoryRepository::new();
        let dictionary_id = DictionaryId::new(1);
        repo.insert_word_pair(build_pair(3, dictionary_id, "tres"))
            .unwrap();
        repo.insert_word_pair(build_pair(1, dictionary_id, "uno"))
            .unwrap();
        repo.insert_word_pair(build_pair(2, dictionary_id, "dos"))
            .unwrap();
        repo.insert_word_pair(build_pair(4, DictionaryId::new(9), "otro"))
            .unwrap();

        let pairs = repo.list_word_pairs(dictionary_id).await.unwrap();
        let originals: Vec<_> = pairs.iter().map(|p| p.original()).collect();
        assert_eq!(originals, ["uno", "dos", "tres"]);
    }

    #[tokio::test]
    async fn rejects_duplicate_original_in_a_dictionary() {
        let repo = InMemoryRepository::new();
        let dictionary_id = DictionaryId::new(1);
        repo.insert_word_pair(build_pair(1, dictionary_id, "uno"))
            .unwrap();

        let err = repo
            .insert_word_pair(build_pair(2, dictionary_id, "uno"))
            .unwrap_err();
        assert!(matches!(err, StorageError::Conflict));
    }

    #[tokio::test]
    async fn progress_round_trips_and_upserts() {
        let repo = InMemoryRepository::new();
        let user = UserId::new(1);
        let dictionary = DictionaryId::new(1);

        assert!(repo.find_progress(user, dictionary).await.unwrap().is_none());

        let mut record = ProgressRecord::defaults(user, dictionary);
        repo.upsert_progress(&record).await.unwrap();

        record.initialize(fixed_now());
        record.activate();
        repo.upsert_progress(&record).await.unwrap();

        let fetched = repo.find_progress(user, dictionary).await.unwrap().unwrap();
        assert_eq!(fetched, record);
        assert!(fetched.is_active());
    }
}
