/// Where the learner stands inside the current batch and level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudyProgress {
    pub level: u32,
    /// 1-based position of the prompted word within the batch.
    pub position: usize,
    pub batch_size: usize,
}

/// Everything the study page needs to prompt for the next word.
///
/// Only the translation is shown; the user types the original.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptView {
    pub title: String,
    pub translation: String,
    pub progress: StudyProgress,
}

/// Turns a dictionary slug back into a display title:
/// `"spanish-verbs"` → `"Spanish Verbs"`.
pub(crate) fn title_from_slug(slug: &str) -> String {
    slug.split('-')
        .filter(|part| !part.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
