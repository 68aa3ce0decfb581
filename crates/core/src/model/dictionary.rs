use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::model::ids::{DictionaryId, UserId};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum DictionaryError {
    #[error("dictionary title cannot be empty")]
    EmptyTitle,

    #[error("dictionary slug cannot be empty")]
    EmptySlug,
}

//
// ─── DICTIONARY ────────────────────────────────────────────────────────────────
//

/// A user-owned collection of word pairs.
///
/// Dictionaries are created and edited by the external vocabulary store; the
/// scheduler only ever reads them. The (user, slug) pair is unique and is the
/// handle the review loop is addressed by.
#[derive(Debug, Clone, PartialEq)]
pub struct Dictionary {
    id: DictionaryId,
    user_id: UserId,
    title: String,
    slug: String,
    created_at: DateTime<Utc>,
}

impl Dictionary {
    /// Creates a new Dictionary.
    ///
    /// Slug generation (transliteration) happens upstream; this constructor
    /// only validates that it received usable values.
    ///
    /// # Errors
    ///
    /// Returns `DictionaryError::EmptyTitle` / `EmptySlug` if either is empty
    /// or whitespace-only.
    pub fn new(
        id: DictionaryId,
        user_id: UserId,
        title: impl Into<String>,
        slug: impl Into<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, DictionaryError> {
        let title = title.into();
        if title.trim().is_empty() {
            return Err(DictionaryError::EmptyTitle);
        }

        let slug = slug.into();
        if slug.trim().is_empty() {
            return Err(DictionaryError::EmptySlug);
        }

        Ok(Self {
            id,
            user_id,
            title: title.trim().to_owned(),
            slug: slug.trim().to_owned(),
            created_at,
        })
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> DictionaryId {
        self.id
    }

    #[must_use]
    pub fn user_id(&self) -> UserId {
        self.user_id
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn slug(&self) -> &str {
        &self.slug
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    #[test]
    fn dictionary_new_rejects_empty_title() {
        let err = Dictionary::new(
            DictionaryId::new(1),
            UserId::new(1),
            "   ",
            "spanish",
            fixed_now(),
        )
        .unwrap_err();
        assert_eq!(err, DictionaryError::EmptyTitle);
    }

    #[test]
    fn dictionary_new_rejects_empty_slug() {
        let err = Dictionary::new(
            DictionaryId::new(1),
            UserId::new(1),
            "Spanish",
            "",
            fixed_now(),
        )
        .unwrap_err();
        assert_eq!(err, DictionaryError::EmptySlug);
    }

    #[test]
    fn dictionary_trims_title_and_slug() {
        let dictionary = Dictionary::new(
            DictionaryId::new(10),
            UserId::new(2),
            "  Spanish Verbs  ",
            " spanish-verbs ",
            fixed_now(),
        )
        .unwrap();

        assert_eq!(dictionary.id(), DictionaryId::new(10));
        assert_eq!(dictionary.user_id(), UserId::new(2));
        assert_eq!(dictionary.title(), "Spanish Verbs");
        assert_eq!(dictionary.slug(), "spanish-verbs");
    }
}
