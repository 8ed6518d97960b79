use std::sync::Mutex;

use log::debug;
use perch_infer::{COCO_KEYPOINT_COUNT, Keypoint, PoseDetection};

use crate::features::{PoseFeatures, PoseSample, compute_features};
use crate::state::PostureState;
use crate::thresholds::{HeadLowMode, Thresholds};

/// Spine curve above which a low head counts as lying on the table.
const LYING_SPINE_DEG: f32 = 30.0;
/// Spine curve above which an otherwise upright subject counts as leaning.
const LEAN_SPINE_DEG: f32 = 15.0;

/// Classification outcome for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PostureResult {
    pub state: PostureState,
    /// Mean confidence of the valid keypoints, 0 when none are valid.
    pub confidence: f32,
    pub keypoints: PoseSample,
    pub features: PoseFeatures,
}

impl PostureResult {
    /// Result reported when no subject was found in the frame.
    pub fn unknown() -> Self {
        Self {
            state: PostureState::Unknown,
            confidence: 0.0,
            keypoints: [Keypoint::default(); COCO_KEYPOINT_COUNT],
            features: PoseFeatures::default(),
        }
    }
}

/// Classifies the highest-confidence detection of a frame.
///
/// The subject keeps the detector's overall score as the confidence of every
/// keypoint, so keypoint validity reduces to the coordinate checks. Rules are
/// evaluated in severity order and the first match wins.
pub fn classify_detections(detections: &[PoseDetection], thresholds: &Thresholds) -> PostureResult {
    let mut best: Option<&PoseDetection> = None;
    for detection in detections {
        match best {
            Some(current) if detection.confidence <= current.confidence => {}
            _ => best = Some(detection),
        }
    }
    let Some(subject) = best else {
        return PostureResult::unknown();
    };

    let mut sample = [Keypoint::default(); COCO_KEYPOINT_COUNT];
    for (slot, keypoint) in sample.iter_mut().zip(subject.keypoints.iter()) {
        *slot = Keypoint::new(keypoint.position, subject.confidence);
    }

    let features = compute_features(&sample, thresholds);
    let state = if features.head_low_position && features.spine_curve_angle > LYING_SPINE_DEG {
        PostureState::LyingOnTable
    } else if features.head_tilt_angle.abs() > thresholds.head_tilt_deg() {
        PostureState::HeadTilted
    } else if features.spine_curve_angle > thresholds.hunch_angle_deg() {
        PostureState::HunchedBack
    } else if features.spine_curve_angle > LEAN_SPINE_DEG && !features.head_low_position {
        PostureState::LeaningForward
    } else {
        PostureState::NormalSitting
    };

    let mut valid = 0usize;
    let mut total = 0.0f32;
    for keypoint in &sample {
        if keypoint.is_valid() {
            valid += 1;
            total += keypoint.confidence;
        }
    }
    let confidence = if valid > 0 { total / valid as f32 } else { 0.0 };
    if confidence < thresholds.min_confidence() {
        debug!(
            "posture confidence {confidence:.2} below advisory minimum {:.2}",
            thresholds.min_confidence(),
        );
    }

    PostureResult {
        state,
        confidence,
        keypoints: sample,
        features,
    }
}

/// Stateful classifier whose thresholds can be retuned between frames.
#[derive(Debug)]
pub struct PostureClassifier {
    thresholds: Mutex<Thresholds>,
}

impl PostureClassifier {
    pub fn new(thresholds: Thresholds) -> Self {
        Self {
            thresholds: Mutex::new(thresholds),
        }
    }

    pub fn classify(&self, detections: &[PoseDetection]) -> PostureResult {
        let thresholds = self.thresholds();
        classify_detections(detections, &thresholds)
    }

    /// Snapshot of the current thresholds.
    pub fn thresholds(&self) -> Thresholds {
        *self
            .thresholds
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn set_head_tilt_deg(&self, degrees: f32) {
        self.update(|thresholds| *thresholds = thresholds.with_head_tilt_deg(degrees));
    }

    pub fn set_lying_head(&self, threshold: f32) {
        self.update(|thresholds| *thresholds = thresholds.with_lying_head(threshold));
    }

    pub fn set_hunch_angle_deg(&self, degrees: f32) {
        self.update(|thresholds| *thresholds = thresholds.with_hunch_angle_deg(degrees));
    }

    pub fn set_min_confidence(&self, confidence: f32) {
        self.update(|thresholds| *thresholds = thresholds.with_min_confidence(confidence));
    }

    pub fn set_head_low_mode(&self, mode: HeadLowMode) {
        self.update(|thresholds| *thresholds = thresholds.with_head_low_mode(mode));
    }

    fn update(&self, apply: impl FnOnce(&mut Thresholds)) {
        let mut thresholds = self
            .thresholds
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        apply(&mut thresholds);
    }
}

impl Default for PostureClassifier {
    fn default() -> Self {
        Self::new(Thresholds::default())
    }
}
