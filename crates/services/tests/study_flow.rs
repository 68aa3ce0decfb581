use std::sync::Arc;

use services::{Clock, ScratchSpace, StudyService, StudyStep, SubmitOutcome};
use storage::repository::{InMemoryRepository, ProgressRepository};
use vocab_core::model::{Dictionary, DictionaryId, UserId, WordPair, WordPairId};
use vocab_core::time::fixed_now;

const PAIRS: [(&str, &str); 4] = [
    ("gato", "cat"),
    ("perro", "dog"),
    ("pájaro", "bird"),
    ("pez", "fish"),
];

fn seed(repo: &InMemoryRepository) {
    let dictionary = Dictionary::new(
        DictionaryId::new(1),
        UserId::new(1),
        "Smoke Dictionary",
        "smoke-dictionary",
        fixed_now(),
    )
    .unwrap();
    repo.insert_dictionary(dictionary).unwrap();

    for (i, (original, translation)) in PAIRS.iter().enumerate() {
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

fn original_for(translation: &str) -> &'static str {
    PAIRS
        .iter()
        .find(|(_, t)| *t == translation)
        .map(|(o, _)| *o)
        .expect("prompt should show a seeded translation")
}

#[tokio::test]
async fn study_loop_drills_to_completion_and_persists_progress() {
    let repo = InMemoryRepository::new();
    seed(&repo);

    let service = StudyService::new(
        Clock::fixed(fixed_now()),
        Arc::new(repo.clone()),
        Arc::new(repo.clone()),
    )
    .with_shuffle_seed(7);
    let mut scratch = ScratchSpace::new();
    let user = UserId::new(1);

    // One deliberate miss on the very first prompt.
    let StudyStep::Prompt(first) = service
        .current_prompt(user, "smoke-dictionary", &mut scratch)
        .await
        .unwrap()
    else {
        panic!("expected a prompt to start with");
    };
    let SubmitOutcome::Feedback(feedback) = service
        .submit_answer(user, "smoke-dictionary", &mut scratch, "not-it")
        .await
        .unwrap()
    else {
        panic!("expected feedback for the miss");
    };
    assert!(feedback.is_error);
    assert_eq!(feedback.translation, first.translation);

    // Then answer correctly until the whole session completes.
    let mut finished = false;
    for _ in 0..200 {
        match service
            .current_prompt(user, "smoke-dictionary", &mut scratch)
            .await
            .unwrap()
        {
            StudyStep::Finished => {
                finished = true;
                break;
            }
            StudyStep::Prompt(view) => {
                service
                    .submit_answer(
                        user,
                        "smoke-dictionary",
                        &mut scratch,
                        original_for(&view.translation),
                    )
                    .await
                    .unwrap();
            }
            StudyStep::NothingToStudy => panic!("dictionary should keep serving words"),
        }
    }
    assert!(finished, "drill never completed");

    // The miss stayed on the error-word list for the review page.
    assert_eq!(scratch.error_words().len(), 1);
    assert_eq!(scratch.error_words()[0].translation, first.translation);

    // The terminal record was persisted; the next obtain resets it, which
    // is observable as a fresh level-1 session.
    let stored = repo
        .find_progress(user, DictionaryId::new(1))
        .await
        .unwrap()
        .expect("progress record persisted");
    assert!(stored.is_terminal());

    let StudyStep::Prompt(fresh) = service
        .current_prompt(user, "smoke-dictionary", &mut scratch)
        .await
        .unwrap()
    else {
        panic!("expected a fresh session after completion");
    };
    assert_eq!(fresh.progress.level, 1);
    assert_eq!(fresh.progress.batch_size, PAIRS.len());
}
