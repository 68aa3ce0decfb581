#![forbid(unsafe_code)]

pub mod error;
pub mod sessions;

pub use vocab_core::Clock;

pub use error::StudyError;
pub use sessions::{
    ErrorWord, PromptView, RepeatFeedback, RepeatOutcome, RepeatPrompt, RepeatService, RepeatStep,
    ScratchSpace, SessionGate, StudyProgress, StudyService, StudyStep, SubmitOutcome,
};
