use serde::{Deserialize, Serialize};

use crate::model::word_pair::WordPair;

//
// ─── STUDY ENTRY ───────────────────────────────────────────────────────────────
//

/// One word of the transient working set, with its mutable mastery score.
///
/// Entries hold the pair by value, normalized at build time: both sides are
/// trimmed and the original is case-folded, so answer comparison is plain
/// equality. A batch can therefore outlive edits to the underlying word
/// pair; that staleness window is accepted, not detected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyEntry {
    original: String,
    translation: String,
    score: i32,
}

impl StudyEntry {
    #[must_use]
    pub fn new(original: &str, translation: &str, score: i32) -> Self {
        Self {
            original: original.trim().to_lowercase(),
            translation: translation.trim().to_owned(),
            score,
        }
    }

    #[must_use]
    pub fn from_pair(pair: &WordPair, score: i32) -> Self {
        Self::new(pair.original(), pair.translation(), score)
    }

    #[must_use]
    pub fn original(&self) -> &str {
        &self.original
    }

    #[must_use]
    pub fn translation(&self) -> &str {
        &self.translation
    }

    #[must_use]
    pub fn score(&self) -> i32 {
        self.score
    }

    /// True once the score has reached the mastery threshold; the scheduler
    /// drops such entries from the next served batch.
    #[must_use]
    pub fn is_mastered(&self, mastery_threshold: i32) -> bool {
        self.score >= mastery_threshold
    }

    /// Rewards a correct answer.
    pub fn record_correct(&mut self) {
        self.score += 1;
    }

    /// Penalizes a wrong answer. Scores have no floor and may go negative.
    pub fn record_incorrect(&mut self) {
        self.score -= 1;
    }
}

//
// ─── STUDY BATCH ───────────────────────────────────────────────────────────────
//

/// The ordered working set of words currently being drilled.
///
/// Built by the scheduler from a window slice of the dictionary, carried
/// across requests in the browser-session scratch space, and discarded on
/// reset or dictionary switch. Non-empty while review is ongoing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudyBatch {
    entries: Vec<StudyEntry>,
}

impl StudyBatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a batch from a window slice, every entry starting at
    /// `base_score`.
    #[must_use]
    pub fn from_pairs(pairs: &[WordPair], base_score: i32) -> Self {
        Self {
            entries: pairs
                .iter()
                .map(|pair| StudyEntry::from_pair(pair, base_score))
                .collect(),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<&StudyEntry> {
        self.entries.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut StudyEntry> {
        self.entries.get_mut(index)
    }

    #[must_use]
    pub fn entries(&self) -> &[StudyEntry] {
        &self.entries
    }

    /// Drops every entry that has reached the mastery threshold, keeping the
    /// relative order of the survivors.
    pub fn retain_unmastered(&mut self, mastery_threshold: i32) {
        self.entries
            .retain(|entry| !entry.is_mastered(mastery_threshold));
    }

    pub(crate) fn as_mut_slice(&mut self) -> &mut [StudyEntry] {
        &mut self.entries
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
