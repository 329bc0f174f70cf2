use std::sync::Arc;
use std::time::{Duration, Instant};

/// A stored clipboard value and the moment it was recorded
///
/// Entries carry no expiration time of their own; the store compares their
/// age against its single configured TTL.
#[derive(Debug, Clone)]
pub struct Entry {
    value: Arc<str>,
    recorded_at: Instant,
}

impl Entry {
    /// Creates a new entry recorded at the given instant
    pub fn new(value: impl Into<Arc<str>>, recorded_at: Instant) -> Self {
        Self {
            value: value.into(),
            recorded_at,
        }
    }

    /// Returns the stored value as a string slice
    pub fn value(&self) -> &str {
        &self.value
    }

    /// Returns a shared reference to the stored value (zero-cost clone)
    pub fn value_shared(&self) -> Arc<str> {
        Arc::clone(&self.value)
    }

    /// Returns the instant this entry was recorded
    pub fn recorded_at(&self) -> Instant {
        self.recorded_at
    }

    /// Returns how long ago this entry was recorded
    pub fn age(&self) -> Duration {
        self.recorded_at.elapsed()
    }

    /// Checks whether this entry's age exceeds the given TTL
    pub fn is_expired(&self, ttl: Duration) -> bool {
        self.age() > ttl
    }
}
