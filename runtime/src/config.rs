use std::time::Duration;

/// Tunables for a [`Store`](crate::Store)
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// How many effect-produced actions `subscribe_actions` receivers may lag
    pub broadcast_capacity: usize,
    /// Deadline used by [`Store::shutdown_default`](crate::Store::shutdown_default)
    pub shutdown_timeout: Duration,
}

impl StoreConfig {
    /// Config with explicit values
    #[must_use]
    pub const fn new(broadcast_capacity: usize, shutdown_timeout: Duration) -> Self {
        Self {
            broadcast_capacity,
            shutdown_timeout,
        }
    }

    /// Replace the broadcast capacity; zero is raised to one
    #[must_use]
    pub const fn with_broadcast_capacity(mut self, capacity: usize) -> Self {
        self.broadcast_capacity = if capacity == 0 { 1 } else { capacity };
        self
    }

    /// Replace the shutdown deadline
    #[must_use]
    pub const fn with_shutdown_timeout(mut self, timeout: Duration) -> Self {
        self.shutdown_timeout = timeout;
        self
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self::new(16, Duration::from_secs(30))
    }
}
