use std::time::Duration;

/// Configuration for the store's TTL and background sweep task
///
/// # Example
///
/// ```rust
/// use clipboard_core::StoreConfig;
/// use std::time::Duration;
///
/// let config = StoreConfig::default()
///     .with_ttl(Duration::from_secs(3600))
///     .with_sweep_interval(Duration::from_secs(60));
/// ```
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// How long an entry lives after it was recorded (default: 24 hours)
    pub ttl: Duration,
    /// Interval between sweep runs (default: 1 hour)
    pub sweep_interval: Duration,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(24 * 60 * 60),
            sweep_interval: Duration::from_secs(60 * 60),
        }
    }
}

impl StoreConfig {
    /// Creates a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the TTL applied to every entry
    ///
    /// An entry whose age exceeds this duration is treated as absent on
    /// read and reclaimed by the next sweep.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Sets the sweep interval
    ///
    /// This determines how often the background task runs to reclaim
    /// expired entries. It is independent of the TTL; the reference setup
    /// sweeps hourly against a day-long TTL, so the sweep is a backstop
    /// against write-once, never-read keys rather than the primary expiry
    /// mechanism.
    pub fn with_sweep_interval(mut self, interval: Duration) -> Self {
        self.sweep_interval = interval;
        self
    }
}
