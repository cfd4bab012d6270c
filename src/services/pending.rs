use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::{DateTime, Utc};

/// Users whose next free-text message is a candidate bot token.
///
/// Entries live in memory only. They are created when a user picks
/// "create bot" and removed on a successful registration or a conflict.
#[derive(Debug, Clone, Default)]
pub struct PendingRegistrations {
    inner: Arc<Mutex<HashMap<u64, DateTime<Utc>>>>,
}

impl PendingRegistrations {
    pub fn new() -> Self {
        Self::default()
    }

    fn entries(&self) -> MutexGuard<'_, HashMap<u64, DateTime<Utc>>> {
        // the map stays valid even if a holder panicked
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Marks the user as awaiting a token. Re-entering keeps the original
    /// start time.
    pub fn begin(&self, user_id: u64) {
        self.entries().entry(user_id).or_insert_with(Utc::now);
    }

    pub fn is_pending(&self, user_id: u64) -> bool {
        self.entries().contains_key(&user_id)
    }

    pub fn since(&self, user_id: u64) -> Option<DateTime<Utc>> {
        self.entries().get(&user_id).copied()
    }

    /// Returns whether the user was pending.
    pub fn clear(&self, user_id: u64) -> bool {
        self.entries().remove(&user_id).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_lifecycle() {
        let pending = PendingRegistrations::new();
        assert!(!pending.is_pending(1));

        pending.begin(1);
        let started = pending.since(1).unwrap();
        pending.begin(1);
        assert_eq!(pending.since(1), Some(started));
        assert_eq!(pending.len(), 1);

        assert!(pending.clear(1));
        assert!(!pending.clear(1));
        assert!(pending.is_empty());
    }

    #[test]
    fn test_clones_share_entries() {
        let pending = PendingRegistrations::new();
        let handle = pending.clone();
        handle.begin(9);
        assert!(pending.is_pending(9));
    }
}
