use std::sync::atomic::{AtomicU64, Ordering};

/// Dispatch counters, readable from any thread.
#[derive(Debug, Default)]
pub struct DispatchStats {
    frames_captured: AtomicU64,
    display_published: AtomicU64,
    display_skipped: AtomicU64,
    detect_enqueued: AtomicU64,
    detect_dropped: AtomicU64,
    conversion_failures: AtomicU64,
}

impl DispatchStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames_captured(&self) -> u64 {
        self.frames_captured.load(Ordering::Relaxed)
    }

    pub fn display_published(&self) -> u64 {
        self.display_published.load(Ordering::Relaxed)
    }

    /// Frames that never reached the display slot (pool empty or frame not
    /// convertible).
    pub fn display_skipped(&self) -> u64 {
        self.display_skipped.load(Ordering::Relaxed)
    }

    pub fn detect_enqueued(&self) -> u64 {
        self.detect_enqueued.load(Ordering::Relaxed)
    }

    /// Stride-eligible frames that never reached the detect queue, whether
    /// rejected by a full queue or skipped before conversion finished.
    pub fn detect_dropped(&self) -> u64 {
        self.detect_dropped.load(Ordering::Relaxed)
    }

    pub fn conversion_failures(&self) -> u64 {
        self.conversion_failures.load(Ordering::Relaxed)
    }

    pub(crate) fn record_captured(&self) {
        self.frames_captured.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_display_published(&self) {
        self.display_published.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_display_skipped(&self) {
        self.display_skipped.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_detect_enqueued(&self) {
        self.detect_enqueued.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_detect_dropped(&self) {
        self.detect_dropped.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_conversion_failure(&self) {
        self.conversion_failures.fetch_add(1, Ordering::Relaxed);
    }
}
