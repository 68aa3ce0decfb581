use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use tokio::sync::OwnedMutexGuard;
use vocab_core::model::UserId;

use crate::error::StudyError;

/// Serializes requests per (user, dictionary slug).
///
/// Two submissions from the same browser (say, a double-posted form) would
/// otherwise both read the same progress record and batch and the second
/// write would silently win. Holding the key's mutex across the whole
/// obtain→schedule→evaluate→persist sequence closes that race; distinct
/// users or dictionaries map to distinct keys and never contend.
#[derive(Clone, Default)]
pub(crate) struct SessionLocks {
    // The registry only ever grows; keys are tiny and bounded by the number
    // of (user, dictionary) pairs seen by this process.
    registry: Arc<Mutex<RegistryMap>>,
}

type RegistryMap = HashMap<(UserId, String), Arc<tokio::sync::Mutex<()>>>;

impl SessionLocks {
    pub(crate) async fn acquire(
        &self,
        user_id: UserId,
        slug: &str,
    ) -> Result<OwnedMutexGuard<()>, StudyError> {
        let lock = {
            let mut registry = self.registry.lock().map_err(|_| StudyError::LockPoisoned)?;
            registry
                .entry((user_id, slug.to_owned()))
                .or_default()
                .clone()
        };
        Ok(lock.lock_owned().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn same_key_is_exclusive_distinct_keys_are_not() {
        let locks = SessionLocks::default();

        let held = locks.acquire(UserId::new(1), "spanish").await.unwrap();

        // A different user may proceed immediately.
        let other_user = locks.acquire(UserId::new(2), "spanish").await.unwrap();
        drop(other_user);

        // The same key is blocked until the guard drops.
        let contended = locks.acquire(UserId::new(1), "spanish");
        tokio::select! {
            biased;
            _guard = contended => panic!("second acquire must wait for the first"),
            () = tokio::task::yield_now() => {}
        }

        drop(held);
        let _reacquired = locks.acquire(UserId::new(1), "spanish").await.unwrap();
    }
}
