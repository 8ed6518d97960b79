use std::time::Duration;

use perch_base::{Clock, Tensor};

use crate::error::PipelineError;

const DEFAULT_HOLD: Duration = Duration::from_millis(3000);

/// Live/frozen display selector.
///
/// A detection freezes the display on an annotated snapshot; the freeze
/// expires after the hold duration and the display goes back to the live
/// feed. Capture and detection keep running either way, only the display
/// source switches.
pub struct HoldController<C: Clock> {
    clock: C,
    hold: Duration,
    snapshot: Tensor<u8>,
    frozen_at: Option<Duration>,
}

impl<C: Clock> HoldController<C> {
    /// Create a live controller with a hold buffer sized for `frame_shape`.
    /// The buffer is allocated once here and reused for every snapshot.
    pub fn new(clock: C, frame_shape: Vec<usize>) -> Result<Self, PipelineError> {
        Ok(Self {
            clock,
            hold: DEFAULT_HOLD,
            snapshot: Tensor::zeros(frame_shape)?,
            frozen_at: None,
        })
    }

    /// Set the freeze duration (default 3000 ms).
    pub fn with_hold(mut self, hold: Duration) -> Self {
        self.hold = hold;
        self
    }

    pub fn hold(&self) -> Duration {
        self.hold
    }

    /// Freeze on the given annotated frame. A detection while already
    /// frozen refreshes both the snapshot and the timestamp.
    pub fn on_detection(&mut self, frame: &Tensor<u8>) {
        self.snapshot.shape.clone_from(&frame.shape);
        self.snapshot.data.clone_from(&frame.data);
        self.frozen_at = Some(self.clock.monotonic());
    }

    /// The frozen snapshot, or `None` when live.
    ///
    /// Expiry happens here: the controller stays frozen through the full
    /// hold duration and goes live strictly after it.
    pub fn frozen_frame(&mut self) -> Option<&Tensor<u8>> {
        let frozen_at = self.frozen_at?;
        let elapsed = self.clock.monotonic().saturating_sub(frozen_at);
        if elapsed > self.hold {
            self.frozen_at = None;
            return None;
        }
        Some(&self.snapshot)
    }
}
