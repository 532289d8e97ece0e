use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use tokio::sync::{Mutex as AsyncMutex, OwnedMutexGuard};

type SubmissionKey = (String, String);

/// Per-`(quiz_id, user_id)` mutual exclusion for the submission
/// read-modify-write.
#[derive(Default)]
pub struct SubmissionLocks {
    locks: Mutex<HashMap<SubmissionKey, Arc<AsyncMutex<()>>>>,
}

impl SubmissionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, quiz_id: &str, user_id: &str) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().unwrap_or_else(|e| e.into_inner());
            // Entries nobody holds or waits on can go.
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            locks
                .entry((quiz_id.to_string(), user_id.to_string()))
                .or_default()
                .clone()
        };

        lock.lock_owned().await
    }

    pub fn tracked_keys(&self) -> usize {
        self.locks.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}
