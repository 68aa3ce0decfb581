mod batch;
mod dictionary;
mod ids;
mod progress;
mod word_pair;

pub use batch::{StudyBatch, StudyEntry};
pub use dictionary::{Dictionary, DictionaryError};
pub use ids::{DictionaryId, ParseIdError, UserId, WordPairId};
pub use progress::{ProgressError, ProgressRecord};
pub use word_pair::{WordPair, WordPairError};
