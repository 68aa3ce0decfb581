use std::sync::Arc;

use storage::repository::DictionaryRepository;
use vocab_core::evaluator::normalize_answer;
use vocab_core::model::UserId;

use super::scratch::ScratchSpace;
use super::view::title_from_slug;
use crate::error::StudyError;

//
// ─── STEPS ─────────────────────────────────────────────────────────────────────
//

/// What the repeat page should show next.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepeatStep {
    Prompt(RepeatPrompt),
    /// The cursor walked off the end of the list (or the list is empty):
    /// show the congratulations page. Misses stay available for review.
    Finished,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatPrompt {
    pub title: String,
    pub translation: String,
    /// 1-based position within the full dictionary.
    pub position: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatFeedback {
    pub original: String,
    pub translation: String,
    pub user_answer: String,
    pub is_error: bool,
}

/// Result of submitting a repeat answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RepeatOutcome {
    Feedback(RepeatFeedback),
    Finished,
}

//
// ─── REPEAT SERVICE ────────────────────────────────────────────────────────────
//

/// Plain sequential drill over the entire dictionary.
///
/// No scores, levels, or windows: every word is asked exactly once in id
/// order, misses are collected on the scratch error-word list, and walking
/// off the end finishes the pass. The durable progress record is untouched:
/// the whole drill lives in the browser session.
#[derive(Clone)]
pub struct RepeatService {
    vocabulary: Arc<dyn DictionaryRepository>,
}

impl RepeatService {
    #[must_use]
    pub fn new(vocabulary: Arc<dyn DictionaryRepository>) -> Self {
        Self { vocabulary }
    }

    /// Begin a fresh pass: rewind the cursor, forget previous misses, and
    /// serve the first word.
    ///
    /// # Errors
    ///
    /// Propagates storage failures; `StorageError::NotFound` (wrapped) when
    /// the dictionary does not exist for this user.
    pub async fn start(
        &self,
        user_id: UserId,
        dictionary_slug: &str,
        scratch: &mut ScratchSpace,
    ) -> Result<RepeatStep, StudyError> {
        scratch.enter_dictionary(dictionary_slug);
        scratch.reset_repeat();
        self.current_prompt(user_id, dictionary_slug, scratch).await
    }

    /// Serve the word at the cursor without moving it.
    ///
    /// # Errors
    ///
    /// Propagates storage failures unmodified.
    pub async fn current_prompt(
        &self,
        user_id: UserId,
        dictionary_slug: &str,
        scratch: &mut ScratchSpace,
    ) -> Result<RepeatStep, StudyError> {
        scratch.enter_dictionary(dictionary_slug);
        let dictionary = self
            .vocabulary
            .find_dictionary(user_id, dictionary_slug)
            .await?;
        let words = self.vocabulary.list_word_pairs(dictionary.id()).await?;

        match words.get(scratch.repeat_cursor()) {
            Some(pair) => Ok(RepeatStep::Prompt(RepeatPrompt {
                title: format!("Repeat {}", title_from_slug(dictionary.slug())),
                translation: pair.translation().to_owned(),
                position: scratch.repeat_cursor() + 1,
                total: words.len(),
            })),
            None => {
                scratch.rewind_repeat();
                Ok(RepeatStep::Finished)
            }
        }
    }

    /// Score the answer for the word at the cursor and advance past it.
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
    ) -> Result<RepeatOutcome, StudyError> {
        scratch.enter_dictionary(dictionary_slug);
        let dictionary = self
            .vocabulary
            .find_dictionary(user_id, dictionary_slug)
            .await?;
        let words = self.vocabulary.list_word_pairs(dictionary.id()).await?;

        let Some(pair) = words.get(scratch.repeat_cursor()) else {
            scratch.rewind_repeat();
            return Ok(RepeatOutcome::Finished);
        };

        let user_answer = normalize_answer(raw_answer);
        let original = normalize_answer(pair.original());
        let is_error = user_answer != original;
        if is_error {
            scratch.record_error(&original, pair.translation());
        }
        scratch.advance_repeat_cursor();

        Ok(RepeatOutcome::Feedback(RepeatFeedback {
            original,
            translation: pair.translation().to_owned(),
            user_answer,
            is_error,
        }))
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use storage::repository::InMemoryRepository;
    use vocab_core::model::{Dictionary, DictionaryId, WordPair, WordPairId};
    use vocab_core::time::fixed_now;

    fn seed(repo: &InMemoryRepository, pairs: &[(&str, &str)]) {
        let dictionary = Dictionary::new(
            DictionaryId::new(1),
            UserId::new(1),
            "Spanish",
            "spanish",
            fixed_now(),
        )
        .unwrap();
        repo.insert_dictionary(dictionary).unwrap();
        for (i, (original, translation)) in pairs.iter().enumerate() {
            repo.insert_word_pair(
                WordPair::new(
                    WordPairId::new(i as u64 + 1),
                    DictionaryId::new(1),
                    *original,
                    *translation,
                )
                .unwrap(),
            )
            .unwrap();
        }
    }

    #[tokio::test]
    async fn walks_the_dictionary_in_order_and_collects_misses() {
        let repo = InMemoryRepository::new();
        seed(&repo, &[("gato", "cat"), ("perro", "dog")]);
        let service = RepeatService::new(Arc::new(repo));
        let mut scratch = ScratchSpace::new();

        let step = service
            .start(UserId::new(1), "spanish", &mut scratch)
            .await
            .unwrap();
        let RepeatStep::Prompt(prompt) = step else {
            panic!("expected the first word");
        };
        assert_eq!(prompt.title, "Repeat Spanish");
        assert_eq!(prompt.translation, "cat");
        assert_eq!((prompt.position, prompt.total), (1, 2));

        // Word 1 answered with the wrong original.
        let outcome = service
            .submit_answer(UserId::new(1), "spanish", &mut scratch, "perro")
            .await
            .unwrap();
        let RepeatOutcome::Feedback(feedback) = outcome else {
            panic!("expected feedback");
        };
        assert!(feedback.is_error);
        assert_eq!(feedback.original, "gato");

        // Word 2 answered correctly, case and whitespace ignored.
        let outcome = service
            .submit_answer(UserId::new(1), "spanish", &mut scratch, " PERRO ")
            .await
            .unwrap();
        let RepeatOutcome::Feedback(feedback) = outcome else {
            panic!("expected feedback");
        };
        assert!(!feedback.is_error);

        // Past the last word: finished, misses retained for review.
        let step = service
            .current_prompt(UserId::new(1), "spanish", &mut scratch)
            .await
            .unwrap();
        assert_eq!(step, RepeatStep::Finished);
        assert_eq!(scratch.error_words().len(), 1);
        assert_eq!(scratch.error_words()[0].original, "gato");
    }

    #[tokio::test]
    async fn restarting_forgets_previous_misses() {
        let repo = InMemoryRepository::new();
        seed(&repo, &[("gato", "cat")]);
        let service = RepeatService::new(Arc::new(repo));
        let mut scratch = ScratchSpace::new();

        service
            .start(UserId::new(1), "spanish", &mut scratch)
            .await
            .unwrap();
        service
            .submit_answer(UserId::new(1), "spanish", &mut scratch, "wrong")
            .await
            .unwrap();
        assert_eq!(scratch.error_words().len(), 1);

        let step = service
            .start(UserId::new(1), "spanish", &mut scratch)
            .await
            .unwrap();
        assert!(matches!(step, RepeatStep::Prompt(_)));
        assert!(scratch.error_words().is_empty());
    }

    #[tokio::test]
    async fn empty_dictionary_finishes_immediately() {
        let repo = InMemoryRepository::new();
        let dictionary = Dictionary::new(
            DictionaryId::new(1),
            UserId::new(1),
            "Empty",
            "empty",
            fixed_now(),
        )
        .unwrap();
        repo.insert_dictionary(dictionary).unwrap();
        let service = RepeatService::new(Arc::new(repo));
        let mut scratch = ScratchSpace::new();

        let step = service
            .start(UserId::new(1), "empty", &mut scratch)
            .await
            .unwrap();
        assert_eq!(step, RepeatStep::Finished);

        let outcome = service
            .submit_answer(UserId::new(1), "empty", &mut scratch, "anything")
            .await
            .unwrap();
        assert_eq!(outcome, RepeatOutcome::Finished);
    }
}
