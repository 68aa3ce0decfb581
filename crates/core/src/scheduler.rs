use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::model::{ProgressRecord, StudyBatch, WordPair};

//
// ─── SHUFFLER ──────────────────────────────────────────────────────────────────
//

/// Randomness source for batch presentation order.
///
/// Defaults to the thread-local generator; tests inject a seeded generator
/// for reproducible permutations.
#[derive(Debug, Clone, Default)]
pub enum Shuffler {
    #[default]
    Default,
    Seeded(StdRng),
}

impl Shuffler {
    /// Returns a deterministic shuffler seeded with `seed`.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self::Seeded(StdRng::seed_from_u64(seed))
    }

    /// Applies a uniform random permutation to `items`.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        match self {
            Shuffler::Default => items.shuffle(&mut rand::rng()),
            Shuffler::Seeded(rng) => items.shuffle(rng),
        }
    }
}

//
// ─── SCHEDULE OUTCOME ──────────────────────────────────────────────────────────
//

/// Result of one scheduling pass.
///
/// `Finished` and an empty `Batch` are different answers: the first means
/// the level ran past `stop_level` (route to the completion page), the
/// second means the dictionary has nothing to serve right now. Callers must
/// branch on the variant, not on batch emptiness alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScheduleOutcome {
    /// Review is complete for this dictionary until the record is reset.
    Finished,
    /// The next working set; empty when the dictionary holds no words.
    Batch(StudyBatch),
}

impl ScheduleOutcome {
    #[must_use]
    pub fn is_finished(&self) -> bool {
        matches!(self, ScheduleOutcome::Finished)
    }

    /// Returns the batch, if any.
    #[must_use]
    pub fn into_batch(self) -> Option<StudyBatch> {
        match self {
            ScheduleOutcome::Finished => None,
            ScheduleOutcome::Batch(batch) => Some(batch),
        }
    }
}

//
// ─── BATCH SCHEDULER ───────────────────────────────────────────────────────────
//

/// Computes the current working batch from the progress record and the
/// dictionary's ordered word list.
///
/// The cycle: filter mastered words out of the previous batch; when it runs
/// dry, slice the next `[start_index, end_index)` window off the word list,
/// shuffle it, and advance the window. When the window itself runs past the
/// end of the list, the level increments and the window rewinds. A fixed
/// word list is thus drilled in repeated small batches, re-surfacing only
/// words below the mastery threshold, and the session terminates after at
/// most `stop_level * ceil(words / step)` window advances.
///
/// The scheduler mutates `record` but never persists it; callers write the
/// record back before replying.
///
/// # Examples
///
/// ```
/// # use vocab_core::scheduler::{BatchScheduler, ScheduleOutcome, Shuffler};
/// # use vocab_core::model::{DictionaryId, ProgressRecord, StudyBatch, UserId, WordPair, WordPairId};
/// let words = vec![
///     WordPair::new(WordPairId::new(1), DictionaryId::new(1), "gato", "cat")?,
/// ];
/// let mut record = ProgressRecord::defaults(UserId::new(1), DictionaryId::new(1));
/// let mut scheduler = BatchScheduler::new().with_shuffler(Shuffler::seeded(7));
///
/// match scheduler.next_batch(&mut record, StudyBatch::new(), &words) {
///     ScheduleOutcome::Batch(batch) => assert_eq!(batch.len(), 1),
///     ScheduleOutcome::Finished => unreachable!(),
/// }
/// # Ok::<(), vocab_core::model::WordPairError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct BatchScheduler {
    shuffler: Shuffler,
}

impl BatchScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the randomness source; pass `Shuffler::seeded` in tests.
    #[must_use]
    pub fn with_shuffler(mut self, shuffler: Shuffler) -> Self {
        self.shuffler = shuffler;
        self
    }

    /// Runs one scheduling pass.
    ///
    /// `previous` is the batch carried over from the last request (empty on
    /// a fresh session); `all_words` is the dictionary's word list in stable
    /// id order.
    pub fn next_batch(
        &mut self,
        record: &mut ProgressRecord,
        previous: StudyBatch,
        all_words: &[WordPair],
    ) -> ScheduleOutcome {
        if record.is_terminal() {
            return ScheduleOutcome::Finished;
        }

        let mut batch = previous;
        batch.retain_unmastered(record.mastery_threshold());

        if batch.is_empty() {
            // Nothing to window over: report the empty batch as-is, without
            // level churn, so "empty dictionary" stays distinguishable from
            // "finished" by the record's level.
            if all_words.is_empty() {
                record.clamp_word_index(0);
                return ScheduleOutcome::Batch(StudyBatch::new());
            }

            // The window ran past the end of the list (also true for a
            // trailing partial window).
            if record.start_index() >= all_words.len() {
                record.advance_level();
                if record.is_terminal() {
                    return ScheduleOutcome::Finished;
                }
            }

            let start = record.start_index().min(all_words.len());
            let end = record.end_index().min(all_words.len());
            batch = StudyBatch::from_pairs(&all_words[start..end], record.base_score());
            self.shuffler.shuffle(batch.as_mut_slice());

            record.begin_next_window();
        }

        record.clamp_word_index(batch.len());

        ScheduleOutcome::Batch(batch)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
