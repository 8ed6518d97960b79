use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

/// Runtime pipeline settings, settable without restarting capture.
///
/// The dispatcher reads the cell on every frame, so UI toggles take effect
/// on the next capture cycle.
#[derive(Debug)]
pub struct PipelineSettings {
    detection_enabled: AtomicBool,
    detect_stride: AtomicU32,
}

impl PipelineSettings {
    pub fn new(detection_enabled: bool, detect_stride: u32) -> Self {
        Self {
            detection_enabled: AtomicBool::new(detection_enabled),
            detect_stride: AtomicU32::new(detect_stride.max(1)),
        }
    }

    pub fn detection_enabled(&self) -> bool {
        self.detection_enabled.load(Ordering::Relaxed)
    }

    pub fn set_detection_enabled(&self, enabled: bool) {
        self.detection_enabled.store(enabled, Ordering::Relaxed);
    }

    pub fn detect_stride(&self) -> u32 {
        self.detect_stride.load(Ordering::Relaxed)
    }

    /// Set the sampling stride (clamped to at least 1).
    pub fn set_detect_stride(&self, stride: u32) {
        self.detect_stride.store(stride.max(1), Ordering::Relaxed);
    }

    /// Whether the frame with this sequence number goes to detection.
    ///
    /// Sampling counts sequence numbers, not wall-clock time.
    pub fn should_detect(&self, sequence: u64) -> bool {
        self.detection_enabled() && sequence % u64::from(self.detect_stride()) == 0
    }
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self::new(true, 5)
    }
}
