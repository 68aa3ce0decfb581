use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::ids::{DictionaryId, UserId};
use crate::time::calendar_days_between;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("level must be >= 1, got {provided}")]
    InvalidLevel { provided: u32 },

    #[error("step must be > 0")]
    InvalidStep,

    #[error("window start {start} is past window end {end}")]
    InvalidWindow { start: usize, end: usize },
}

//
// ─── PROGRESS RECORD ───────────────────────────────────────────────────────────
//

/// Durable learning state for one (user, dictionary) pair.
///
/// Tracks the difficulty `level`, the `[start_index, end_index)` window into
/// the dictionary's ordered word list that feeds the current batch, and the
/// position of the word awaiting an answer. The record outlives browser
/// sessions; the batch it correlates with does not.
///
/// `created_at` doubles as the initialization marker: `None` means the
/// record needs (re)initialization, and the session gate stamps it on the
/// next obtain. Staleness is measured from that stamp by calendar-date
/// subtraction, so a record initialized late in the evening goes stale right
/// after midnight.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressRecord {
    user_id: UserId,
    dictionary_id: DictionaryId,
    active: bool,
    level: u32,
    start_index: usize,
    end_index: usize,
    step: usize,
    stop_level: u32,
    base_score: i32,
    mastery_threshold: i32,
    current_word_index: usize,
    created_at: Option<DateTime<Utc>>,
}

impl ProgressRecord {
    pub const DEFAULT_LEVEL: u32 = 1;
    pub const DEFAULT_STEP: usize = 5;
    pub const DEFAULT_STOP_LEVEL: u32 = 5;
    pub const DEFAULT_BASE_SCORE: i32 = 0;
    pub const DEFAULT_MASTERY_THRESHOLD: i32 = 5;

    /// Creates a record with the documented defaults for a fresh session.
    ///
    /// This is the single source of truth for default values; `reset` reuses
    /// it rather than reading per-field defaults from anywhere else.
    #[must_use]
    pub fn defaults(user_id: UserId, dictionary_id: DictionaryId) -> Self {
        Self {
            user_id,
            dictionary_id,
            active: false,
            level: Self::DEFAULT_LEVEL,
            start_index: 0,
            end_index: Self::DEFAULT_STEP,
            step: Self::DEFAULT_STEP,
            stop_level: Self::DEFAULT_STOP_LEVEL,
            base_score: Self::DEFAULT_BASE_SCORE,
            mastery_threshold: Self::DEFAULT_MASTERY_THRESHOLD,
            current_word_index: 0,
            created_at: None,
        }
    }

    /// Rehydrates a record from persisted storage.
    ///
    /// # Errors
    ///
    /// Returns `ProgressError` if the stored values violate the record's
    /// invariants (`level >= 1`, `step > 0`, window start not past its end).
    #[allow(clippy::too_many_arguments)]
    pub fn from_persisted(
        user_id: UserId,
        dictionary_id: DictionaryId,
        active: bool,
        level: u32,
        start_index: usize,
        end_index: usize,
        step: usize,
        stop_level: u32,
        base_score: i32,
        mastery_threshold: i32,
        current_word_index: usize,
        created_at: Option<DateTime<Utc>>,
    ) -> Result<Self, ProgressError> {
        if level < 1 {
            return Err(ProgressError::InvalidLevel { provided: level });
        }
        if step == 0 {
            return Err(ProgressError::InvalidStep);
        }
        if start_index > end_index {
            return Err(ProgressError::InvalidWindow {
                start: start_index,
                end: end_index,
            });
        }

        Ok(Self {
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
        })
    }

    // Accessors
    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    #[must_use]
    pub fn dictionary_id(&self) -> DictionaryId {
        self.dictionary_id
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    #[must_use]
    pub fn level(&self) -> u32 {
        self.level
    }

    #[must_use]
    pub fn start_index(&self) -> usize {
        self.start_index
    }

    #[must_use]
    pub fn end_index(&self) -> usize {
        self.end_index
    }

    #[must_use]
    pub fn step(&self) -> usize {
        self.step
    }

    #[must_use]
    pub fn stop_level(&self) -> u32 {
        self.stop_level
    }

    #[must_use]
    pub fn base_score(&self) -> i32 {
        self.base_score
    }

    #[must_use]
    pub fn mastery_threshold(&self) -> i32 {
        self.mastery_threshold
    }

    #[must_use]
    pub fn current_word_index(&self) -> usize {
        self.current_word_index
    }

    #[must_use]
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.created_at
    }

    // Lifecycle

    /// True once the level has run past `stop_level`; review is complete
    /// until the record is reset. The comparison is strict.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.level > self.stop_level
    }

    /// True when the initialization stamp lies at least one calendar day in
    /// the past. An unstamped record is never stale, only uninitialized.
    #[must_use]
    pub fn is_stale(&self, now: DateTime<Utc>) -> bool {
        match self.created_at {
            Some(created) => calendar_days_between(created, now) >= 1,
            None => false,
        }
    }

    /// True when the record still needs its initialization stamp.
    #[must_use]
    pub fn needs_init(&self) -> bool {
        self.created_at.is_none()
    }

    /// Stamps `created_at` if unset; no-op on an initialized record.
    pub fn initialize(&mut self, now: DateTime<Utc>) {
        if self.created_at.is_none() {
            self.created_at = Some(now);
        }
    }

    /// Marks the session open. Returns true when the flag changed.
    pub fn activate(&mut self) -> bool {
        if self.active {
            return false;
        }
        self.active = true;
        true
    }

    /// Returns every field to its default and clears the initialization
    /// stamp, forcing reinitialization on the next obtain.
    pub fn reset(&mut self) {
        *self = Self::defaults(self.user_id, self.dictionary_id);
    }

    // Progression

    /// Moves to the next level and rewinds the window to the front of the
    /// word list.
    pub fn advance_level(&mut self) {
        self.level += 1;
        self.start_index = 0;
        self.end_index = self.step;
    }

    /// Consumes the current window: the next batch starts where this one
    /// ended, and the batch cursor rewinds.
    pub fn begin_next_window(&mut self) {
        self.current_word_index = 0;
        self.start_index = self.end_index;
        self.end_index += self.step;
    }

    /// Points the cursor at the next batch entry. The caller re-clamps via
    /// the scheduler before the cursor is read again.
    pub fn advance_word_index(&mut self) {
        self.current_word_index += 1;
    }

    /// Wraps the cursor to 0 when it no longer fits the batch.
    pub fn clamp_word_index(&mut self, batch_len: usize) {
        if self.current_word_index + 1 > batch_len {
            self.current_word_index = 0;
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
