use std::time::{Duration, Instant};

/// Monotonic time source.
///
/// Implementations must never go backwards. Components that measure
/// elapsed time (hold windows, backoff delays) read it through this
/// trait rather than `Instant::now()` directly.
pub trait Clock {
    /// Time elapsed since an arbitrary fixed origin.
    fn monotonic(&self) -> Duration;
}

/// Clock backed by `std::time::Instant`, anchored at construction.
#[derive(Debug, Clone)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn monotonic(&self) -> Duration {
        self.origin.elapsed()
    }
}
