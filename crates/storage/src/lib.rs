#![forbid(unsafe_code)]

pub mod repository;
pub mod sqlite;

pub use repository::{
    DictionaryRepository, InMemoryRepository, ProgressRepository, Storage, StorageError,
};
pub use sqlite::{SqliteInitError, SqliteRepository};
