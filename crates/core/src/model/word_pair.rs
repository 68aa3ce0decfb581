use thiserror::Error;

use crate::model::ids::{DictionaryId, WordPairId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum WordPairError {
    #[error("original word cannot be empty")]
    EmptyOriginal,

    #[error("translation cannot be empty")]
    EmptyTranslation,
}

//
// ─── WORD PAIR ─────────────────────────────────────────────────────────────────
//

/// One original/translation entry of a dictionary.
///
/// Word pairs are owned by the external vocabulary store. The store lists
/// them in stable insertion (id) order; the scheduler windows over that
/// order. The original is unique within its dictionary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordPair {
    id: WordPairId,
    dictionary_id: DictionaryId,
    original: String,
    translation: String,
}

impl WordPair {
    /// Creates a new word pair.
    ///
    /// # Errors
    ///
    /// Returns `WordPairError` if either side is empty or whitespace-only.
    pub fn new(
        id: WordPairId,
        dictionary_id: DictionaryId,
        original: impl Into<String>,
        translation: impl Into<String>,
    ) -> Result<Self, WordPairError> {
        let original = original.into();
        if original.trim().is_empty() {
            return Err(WordPairError::EmptyOriginal);
        }

        let translation = translation.into();
        if translation.trim().is_empty() {
            return Err(WordPairError::EmptyTranslation);
        }

        Ok(Self {
            id,
            dictionary_id,
            original: original.trim().to_owned(),
            translation: translation.trim().to_owned(),
        })
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> WordPairId {
        self.id
    }

    #[must_use]
    pub fn dictionary_id(&self) -> DictionaryId {
        self.dictionary_id
    }

    #[must_use]
    pub fn original(&self) -> &str {
        &self.original
    }

    #[must_use]
    pub fn translation(&self) -> &str {
        &self.translation
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
