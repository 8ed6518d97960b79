/// How the head-low predicate compares the nose to the shoulder line.
///
/// `AbsoluteOffset` treats the threshold as a pixel offset and flags the head
/// as low once the nose sits more than that many pixels below the shoulder
/// midpoint. `ShoulderRatio` divides the nose drop by the shoulder height
/// difference and flags the head as low while the ratio stays UNDER the
/// threshold, matching a tuning that favours near-level shoulders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeadLowMode {
    AbsoluteOffset,
    ShoulderRatio,
}

/// Tunable geometry thresholds for posture classification.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    head_tilt_deg: f32,
    lying_head: f32,
    hunch_angle_deg: f32,
    min_confidence: f32,
    head_low_mode: HeadLowMode,
}

impl Thresholds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Absolute eye-line angle above which the head counts as tilted.
    pub fn with_head_tilt_deg(mut self, degrees: f32) -> Self {
        self.head_tilt_deg = degrees;
        self
    }

    /// Nose-below-shoulder threshold, interpreted per [`HeadLowMode`].
    pub fn with_lying_head(mut self, threshold: f32) -> Self {
        self.lying_head = threshold;
        self
    }

    /// Spine curve angle above which the back counts as hunched.
    pub fn with_hunch_angle_deg(mut self, degrees: f32) -> Self {
        self.hunch_angle_deg = degrees;
        self
    }

    /// Advisory floor for the result confidence. Results below it are still
    /// returned, only logged.
    pub fn with_min_confidence(mut self, confidence: f32) -> Self {
        self.min_confidence = confidence;
        self
    }

    pub fn with_head_low_mode(mut self, mode: HeadLowMode) -> Self {
        self.head_low_mode = mode;
        self
    }

    pub fn head_tilt_deg(&self) -> f32 {
        self.head_tilt_deg
    }

    pub fn lying_head(&self) -> f32 {
        self.lying_head
    }

    pub fn hunch_angle_deg(&self) -> f32 {
        self.hunch_angle_deg
    }

    pub fn min_confidence(&self) -> f32 {
        self.min_confidence
    }

    pub fn head_low_mode(&self) -> HeadLowMode {
        self.head_low_mode
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            head_tilt_deg: 20.0,
            lying_head: 0.7,
            hunch_angle_deg: 25.0,
            min_confidence: 0.4,
            head_low_mode: HeadLowMode::AbsoluteOffset,
        }
    }
}
