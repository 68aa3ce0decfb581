use std::sync::Arc;

use storage::repository::{DictionaryRepository, ProgressRepository};
use vocab_core::Clock;
use vocab_core::model::{Dictionary, ProgressRecord, UserId};

use crate::error::StudyError;

/// Obtains the progress record for a (user, dictionary) pair and decides
/// whether it must be reset before use.
///
/// A record is reset when its initialization stamp lies at least one
/// calendar day in the past, or when its level ran past `stop_level`: a
/// learner coming back the next day (or after finishing) starts over from
/// the defaults. The reset, the stamp, and the `active` flag are persisted
/// before the record is handed out.
#[derive(Clone)]
pub struct SessionGate {
    clock: Clock,
    vocabulary: Arc<dyn DictionaryRepository>,
    progress: Arc<dyn ProgressRepository>,
}

impl SessionGate {
    #[must_use]
    pub fn new(
        clock: Clock,
        vocabulary: Arc<dyn DictionaryRepository>,
        progress: Arc<dyn ProgressRepository>,
    ) -> Self {
        Self {
            clock,
            vocabulary,
            progress,
        }
    }

    /// Resolve the dictionary and produce a ready-to-use progress record.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` (wrapped) when the user has no
    /// dictionary under `dictionary_slug`; propagates other storage errors
    /// unmodified.
    pub async fn obtain(
        &self,
        user_id: UserId,
        dictionary_slug: &str,
    ) -> Result<(Dictionary, ProgressRecord), StudyError> {
        let dictionary = self
            .vocabulary
            .find_dictionary(user_id, dictionary_slug)
            .await?;

        let mut record = match self
            .progress
            .find_progress(user_id, dictionary.id())
            .await?
        {
            Some(record) => record,
            None => ProgressRecord::defaults(user_id, dictionary.id()),
        };

        let now = self.clock.now();
        if record.is_stale(now) || record.is_terminal() {
            record.reset();
        }
        record.initialize(now);
        record.activate();

        self.progress.upsert_progress(&record).await?;

        Ok((dictionary, record))
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
