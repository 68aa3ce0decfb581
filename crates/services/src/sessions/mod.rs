mod gate;
mod locks;
mod repeat;
mod scratch;
mod view;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::StudyError;
pub use gate::SessionGate;
pub use repeat::{RepeatFeedback, RepeatOutcome, RepeatPrompt, RepeatService, RepeatStep};
pub use scratch::{ErrorWord, ScratchSpace};
pub use view::{PromptView, StudyProgress};
pub use workflow::{StudyService, StudyStep, SubmitOutcome};
