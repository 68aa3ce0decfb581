use std::sync::Arc;

use storage::repository::{DictionaryRepository, ProgressRepository};
use vocab_core::Clock;
use vocab_core::evaluator::{AnswerEvaluator, AnswerFeedback, EvaluateError};
use vocab_core::model::UserId;
use vocab_core::scheduler::{BatchScheduler, ScheduleOutcome, Shuffler};

use super::gate::SessionGate;
use super::locks::SessionLocks;
use super::scratch::ScratchSpace;
use super::view::{PromptView, StudyProgress, title_from_slug};
use crate::error::StudyError;

//
// ─── STEPS ─────────────────────────────────────────────────────────────────────
//

/// What the study page should show next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StudyStep {
    /// Prompt for the next word.
    Prompt(PromptView),
    /// The level ran past `stop_level`: show the congratulations page. The
    /// next obtain starts the dictionary over.
    Finished,
    /// The dictionary has no words to serve.
    NothingToStudy,
}

/// Result of submitting an answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Feedback(AnswerFeedback),
    /// See [`StudyStep::Finished`].
    Finished,
    /// See [`StudyStep::NothingToStudy`].
    NothingToStudy,
}

//
// ─── STUDY SERVICE ─────────────────────────────────────────────────────────────
//

/// Orchestrates one request of the adaptive review loop.
///
/// Every call runs gate → scheduler → (evaluator) → persist, with requests
/// for the same (user, dictionary) serialized through a per-key mutex. The
/// caller owns the per-browser-session [`ScratchSpace`] and passes it into
/// each call; the durable progress record never leaves this service.
#[derive(Clone)]
pub struct StudyService {
    gate: SessionGate,
    vocabulary: Arc<dyn DictionaryRepository>,
    progress: Arc<dyn ProgressRepository>,
    locks: SessionLocks,
    shuffle_seed: Option<u64>,
}

impl StudyService {
    #[must_use]
    pub fn new(
        clock: Clock,
        vocabulary: Arc<dyn DictionaryRepository>,
        progress: Arc<dyn ProgressRepository>,
    ) -> Self {
        Self {
            gate: SessionGate::new(clock, Arc::clone(&vocabulary), Arc::clone(&progress)),
            vocabulary,
            progress,
            locks: SessionLocks::default(),
            shuffle_seed: None,
        }
    }

    /// Fixes the batch shuffle to a deterministic permutation; tests only.
    #[must_use]
    pub fn with_shuffle_seed(mut self, seed: u64) -> Self {
        self.shuffle_seed = Some(seed);
        self
    }

    fn scheduler(&self) -> BatchScheduler {
        match self.shuffle_seed {
            Some(seed) => BatchScheduler::new().with_shuffler(Shuffler::seeded(seed)),
            None => BatchScheduler::new(),
        }
    }

    /// Produce the next prompt for the study page.
    ///
    /// # Errors
    ///
    /// Propagates storage failures; `StorageError::NotFound` (wrapped) when
    /// the dictionary does not exist for this user.
    pub async fn current_prompt(
        &self,
        user_id: UserId,
        dictionary_slug: &str,
        scratch: &mut ScratchSpace,
    ) -> Result<StudyStep, StudyError> {
        let _guard = self.locks.acquire(user_id, dictionary_slug).await?;

        scratch.enter_dictionary(dictionary_slug);
        let (dictionary, mut record) = self.gate.obtain(user_id, dictionary_slug).await?;
        let all_words = self.vocabulary.list_word_pairs(dictionary.id()).await?;

        let outcome = self
            .scheduler()
            .next_batch(&mut record, scratch.take_batch(), &all_words);
        self.progress.upsert_progress(&record).await?;

        match outcome {
            ScheduleOutcome::Finished => {
                scratch.clear_batch();
                Ok(StudyStep::Finished)
            }
            ScheduleOutcome::Batch(batch) if batch.is_empty() => {
                scratch.clear_batch();
                Ok(StudyStep::NothingToStudy)
            }
            ScheduleOutcome::Batch(batch) => {
                let index = record.current_word_index();
                let entry = batch.get(index).ok_or(EvaluateError::EmptyBatch {
                    index,
                    len: batch.len(),
                })?;

                let view = PromptView {
                    title: title_from_slug(dictionary.slug()),
                    translation: entry.translation().to_owned(),
                    progress: StudyProgress {
                        level: record.level(),
                        position: index + 1,
                        batch_size: batch.len(),
                    },
                };

                scratch.stash_batch(batch);
                Ok(StudyStep::Prompt(view))
            }
        }
    }

    /// Score the submitted answer against the word currently prompted.
    ///
    /// A missing form field should be passed as `""`. Wrong answers are
    /// appended to the scratch error-word list for end-of-session review.
    ///
    /// # Errors
    ///
    /// Propagates storage failures unmodified.
    pub async fn submit_answer(
        &self,
        user_id: UserId,
        dictionary_slug: &str,
        scratch: &mut ScratchSpace,
        raw_answer: &str,
    ) -> Result<SubmitOutcome, StudyError> {
        let _guard = self.locks.acquire(user_id, dictionary_slug).await?;

        scratch.enter_dictionary(dictionary_slug);
        let (dictionary, mut record) = self.gate.obtain(user_id, dictionary_slug).await?;
        let all_words = self.vocabulary.list_word_pairs(dictionary.id()).await?;

        let outcome = self
            .scheduler()
            .next_batch(&mut record, scratch.take_batch(), &all_words);

        let mut batch = match outcome {
            ScheduleOutcome::Finished => {
                self.progress.upsert_progress(&record).await?;
                scratch.clear_batch();
                return Ok(SubmitOutcome::Finished);
            }
            ScheduleOutcome::Batch(batch) if batch.is_empty() => {
                self.progress.upsert_progress(&record).await?;
                scratch.clear_batch();
                return Ok(SubmitOutcome::NothingToStudy);
            }
            ScheduleOutcome::Batch(batch) => batch,
        };

        let evaluator = AnswerEvaluator::new(record.mastery_threshold());
        let feedback = evaluator.evaluate(&mut batch, record.current_word_index(), raw_answer)?;

        if feedback.is_error {
            scratch.record_error(&feedback.original, &feedback.translation);
        }

        // The cursor moves now; the next scheduling pass clamps it and drops
        // any entry that just reached the threshold.
        record.advance_word_index();
        self.progress.upsert_progress(&record).await?;
        scratch.stash_batch(batch);

        Ok(SubmitOutcome::Feedback(feedback))
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
