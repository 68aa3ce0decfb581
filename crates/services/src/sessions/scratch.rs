use serde::{Deserialize, Serialize};

use vocab_core::model::StudyBatch;

/// A word pair the user got wrong, kept for end-of-session review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorWord {
    pub original: String,
    pub translation: String,
}

/// Ephemeral per-browser-session state.
///
/// This is the counterpart of the durable `ProgressRecord`: the web layer
/// keeps one `ScratchSpace` per browser session (it serializes cleanly into
/// whatever session store it uses) and hands it to every study call. It
/// carries the current batch between requests, the error words collected so
/// far, and the cursor of the plain repeat drill. Switching to a different
/// dictionary invalidates all of it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScratchSpace {
    dictionary_slug: Option<String>,
    batch: Option<StudyBatch>,
    error_words: Vec<ErrorWord>,
    repeat_cursor: usize,
}

impl ScratchSpace {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Points the scratch at a dictionary, dropping every stashed value when
    /// it differs from the previous one. Returns true when a switch
    /// happened.
    pub fn enter_dictionary(&mut self, slug: &str) -> bool {
        if self.dictionary_slug.as_deref() == Some(slug) {
            return false;
        }
        *self = Self {
            dictionary_slug: Some(slug.to_owned()),
            ..Self::default()
        };
        true
    }

    #[must_use]
    pub fn dictionary_slug(&self) -> Option<&str> {
        self.dictionary_slug.as_deref()
    }

    /// Removes and returns the stashed batch; an absent batch reads as
    /// empty, which is exactly what the scheduler expects on a fresh
    /// session.
    pub fn take_batch(&mut self) -> StudyBatch {
        self.batch.take().unwrap_or_default()
    }

    pub fn stash_batch(&mut self, batch: StudyBatch) {
        self.batch = Some(batch);
    }

    pub fn clear_batch(&mut self) {
        self.batch = None;
    }

    #[must_use]
    pub fn has_batch(&self) -> bool {
        self.batch.is_some()
    }

    pub fn record_error(&mut self, original: &str, translation: &str) {
        self.error_words.push(ErrorWord {
            original: original.to_owned(),
            translation: translation.to_owned(),
        });
    }

    /// The words missed so far, in the order they were missed.
    #[must_use]
    pub fn error_words(&self) -> &[ErrorWord] {
        &self.error_words
    }

    #[must_use]
    pub fn repeat_cursor(&self) -> usize {
        self.repeat_cursor
    }

    pub fn advance_repeat_cursor(&mut self) {
        self.repeat_cursor += 1;
    }

    /// Rewinds the repeat drill and forgets its misses.
    pub fn reset_repeat(&mut self) {
        self.repeat_cursor = 0;
        self.error_words.clear();
    }

    /// Rewinds only the cursor, keeping the misses for the error-words page.
    pub fn rewind_repeat(&mut self) {
        self.repeat_cursor = 0;
    }
}
