use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::StudyBatch;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum EvaluateError {
    #[error("no word at index {index} in a batch of {len}")]
    EmptyBatch { index: usize, len: usize },
}

//
// ─── FEEDBACK ──────────────────────────────────────────────────────────────────
//

/// Where the entry's score stands after an answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreProgress {
    /// The score reached the mastery threshold; the word leaves the rotation
    /// with the next served batch.
    Mastered,
    /// Still in rotation at this score.
    Points(i32),
}

impl fmt::Display for ScoreProgress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScoreProgress::Mastered => write!(f, "pair goes to the next level"),
            ScoreProgress::Points(score) => write!(f, "point: {score}"),
        }
    }
}

/// Everything the presentation layer needs to render an answer's result.
///
/// On a wrong answer the payload carries the literal user input next to the
/// expected pair, so the page can show all three; the caller also appends
/// the pair to the session's error-word list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerFeedback {
    pub original: String,
    pub translation: String,
    pub user_answer: String,
    pub progress: ScoreProgress,
    pub is_error: bool,
}

/// Canonical answer form: trimmed and case-folded.
///
/// Batch entries are stored in this form, so one function defines matching
/// for every drill mode.
#[must_use]
pub fn normalize_answer(raw: &str) -> String {
    raw.trim().to_lowercase()
}

//
// ─── EVALUATOR ─────────────────────────────────────────────────────────────────
//

/// Scores a single user response against the current batch entry.
///
/// Answers are trimmed and case-folded before comparison; batch entries were
/// normalized the same way when built, so matching is plain equality.
/// A correct answer earns a point, a wrong one costs a point (scores may go
/// negative). Pure scoring and feedback; navigation stays with the caller,
/// which advances the cursor and lets the next scheduling pass drop any
/// entry that just reached the threshold.
#[derive(Debug, Clone, Copy)]
pub struct AnswerEvaluator {
    mastery_threshold: i32,
}

impl AnswerEvaluator {
    #[must_use]
    pub fn new(mastery_threshold: i32) -> Self {
        Self { mastery_threshold }
    }

    /// Evaluates `raw_answer` against `batch[index]`, mutating the entry's
    /// score.
    ///
    /// An absent answer field should be passed as `""`; it evaluates as an
    /// ordinary wrong answer rather than an error.
    ///
    /// # Errors
    ///
    /// Returns `EvaluateError::EmptyBatch` if `index` does not address an
    /// entry (empty batch included).
    pub fn evaluate(
        &self,
        batch: &mut StudyBatch,
        index: usize,
        raw_answer: &str,
    ) -> Result<AnswerFeedback, EvaluateError> {
        let len = batch.len();
        let entry = batch
            .get_mut(index)
            .ok_or(EvaluateError::EmptyBatch { index, len })?;

        let user_answer = normalize_answer(raw_answer);

        let is_error = user_answer != entry.original();
        if is_error {
            entry.record_incorrect();
        } else {
            entry.record_correct();
        }

        let progress = if !is_error && entry.is_mastered(self.mastery_threshold) {
            ScoreProgress::Mastered
        } else {
            ScoreProgress::Points(entry.score())
        };

        Ok(AnswerFeedback {
            original: entry.original().to_owned(),
            translation: entry.translation().to_owned(),
            user_answer,
            progress,
            is_error,
        })
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DictionaryId, WordPair, WordPairId};

    fn batch(entries: &[(&str, &str)]) -> StudyBatch {
        let pairs: Vec<_> = entries
            .iter()
            .enumerate()
            .map(|(i, (original, translation))| {
                WordPair::new(
                    WordPairId::new(i as u64 + 1),
                    DictionaryId::new(1),
                    *original,
                    *translation,
                )
                .unwrap()
            })
            .collect();
        StudyBatch::from_pairs(&pairs, 0)
    }

    #[test]
    fn answer_matching_ignores_case_and_whitespace() {
        let mut batch = batch(&[("gato", "cat")]);
        let feedback = AnswerEvaluator::new(5)
            .evaluate(&mut batch, 0, " GATO  ")
            .unwrap();

        assert!(!feedback.is_error);
        assert_eq!(feedback.user_answer, "gato");
        assert_eq!(feedback.progress, ScoreProgress::Points(1));
        assert_eq!(batch.get(0).unwrap().score(), 1);
    }

    #[test]
    fn wrong_answer_costs_a_point_and_carries_the_expected_pair() {
        let mut batch = batch(&[("gato", "cat")]);
        let feedback = AnswerEvaluator::new(5)
            .evaluate(&mut batch, 0, "perro")
            .unwrap();

        assert!(feedback.is_error);
        assert_eq!(feedback.original, "gato");
        assert_eq!(feedback.translation, "cat");
        assert_eq!(feedback.user_answer, "perro");
        assert_eq!(feedback.progress, ScoreProgress::Points(-1));
        assert_eq!(batch.get(0).unwrap().score(), -1);
    }

    #[test]
    fn missing_answer_is_an_ordinary_wrong_answer() {
        let mut batch = batch(&[("gato", "cat")]);
        let feedback = AnswerEvaluator::new(5).evaluate(&mut batch, 0, "").unwrap();

        assert!(feedback.is_error);
        assert_eq!(feedback.user_answer, "");
        assert_eq!(batch.get(0).unwrap().score(), -1);
    }

    #[test]
    fn reaching_the_threshold_signals_mastery() {
        let mut batch = batch(&[("gato", "cat")]);
        let evaluator = AnswerEvaluator::new(5);

        for _ in 0..4 {
            let feedback = evaluator.evaluate(&mut batch, 0, "gato").unwrap();
            assert!(matches!(feedback.progress, ScoreProgress::Points(_)));
        }

        let feedback = evaluator.evaluate(&mut batch, 0, "gato").unwrap();
        assert_eq!(feedback.progress, ScoreProgress::Mastered);
        assert!(batch.get(0).unwrap().is_mastered(5));
    }

    #[test]
    fn scores_keep_falling_below_zero() {
        let mut batch = batch(&[("gato", "cat")]);
        let evaluator = AnswerEvaluator::new(5);

        for _ in 0..3 {
            evaluator.evaluate(&mut batch, 0, "wrong").unwrap();
        }
        assert_eq!(batch.get(0).unwrap().score(), -3);
    }

    #[test]
    fn empty_batch_is_a_typed_error() {
        let mut batch = StudyBatch::new();
        let err = AnswerEvaluator::new(5)
            .evaluate(&mut batch, 0, "gato")
            .unwrap_err();
        assert_eq!(err, EvaluateError::EmptyBatch { index: 0, len: 0 });
    }

    #[test]
    fn score_progress_messages_render_like_the_review_page_expects() {
        assert_eq!(ScoreProgress::Mastered.to_string(), "pair goes to the next level");
        assert_eq!(ScoreProgress::Points(3).to_string(), "point: 3");
        assert_eq!(ScoreProgress::Points(-2).to_string(), "point: -2");
    }
}
