use perch_infer::{COCO_KEYPOINT_COUNT, Keypoint, KeypointIndex};

use crate::thresholds::{HeadLowMode, Thresholds};

/// Ordered COCO-17 skeleton for one subject. Index with [`KeypointIndex`].
pub type PoseSample = [Keypoint; COCO_KEYPOINT_COUNT];

/// Geometric features extracted from one pose sample.
///
/// All angles are in degrees. Features whose supporting keypoints are invalid
/// are zero, so downstream rules fall through to the least alarming state
/// instead of acting on garbage coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PoseFeatures {
    /// Signed eye-line angle relative to horizontal.
    pub head_tilt_angle: f32,
    /// Deviation from a straight nose/shoulder/hip line. 0 is upright.
    pub spine_curve_angle: f32,
    /// Absolute vertical distance between the shoulders, in pixels.
    pub shoulder_balance: f32,
    /// Whether the nose sits low relative to the shoulder line.
    pub head_low_position: bool,
}

pub fn compute_features(sample: &PoseSample, thresholds: &Thresholds) -> PoseFeatures {
    PoseFeatures {
        head_tilt_angle: head_tilt_angle(sample),
        spine_curve_angle: spine_curve_angle(sample),
        shoulder_balance: shoulder_balance(sample),
        head_low_position: head_low_position(sample, thresholds),
    }
}

fn keypoint(sample: &PoseSample, index: KeypointIndex) -> Keypoint {
    sample[usize::from(index)]
}

/// Eye-line angle in degrees, measured left landmark minus right. Falls back
/// to the ear pair when either eye is invalid, and to 0 when both pairs are.
pub fn head_tilt_angle(sample: &PoseSample) -> f32 {
    let eye_pair = (
        keypoint(sample, KeypointIndex::LeftEye),
        keypoint(sample, KeypointIndex::RightEye),
    );
    let ear_pair = (
        keypoint(sample, KeypointIndex::LeftEar),
        keypoint(sample, KeypointIndex::RightEar),
    );

    let (left, right) = if eye_pair.0.is_valid() && eye_pair.1.is_valid() {
        eye_pair
    } else if ear_pair.0.is_valid() && ear_pair.1.is_valid() {
        ear_pair
    } else {
        return 0.0;
    };

    let delta = left.position - right.position;
    delta.y.atan2(delta.x).to_degrees()
}

/// Spine deviation in degrees: 180 minus the angle at the shoulder midpoint
/// between the nose and the hip midpoint. A perfectly straight line gives 0.
/// Requires the nose, both shoulders and both hips to be valid.
pub fn spine_curve_angle(sample: &PoseSample) -> f32 {
    let nose = keypoint(sample, KeypointIndex::Nose);
    let left_shoulder = keypoint(sample, KeypointIndex::LeftShoulder);
    let right_shoulder = keypoint(sample, KeypointIndex::RightShoulder);
    let left_hip = keypoint(sample, KeypointIndex::LeftHip);
    let right_hip = keypoint(sample, KeypointIndex::RightHip);

    if !nose.is_valid()
        || !left_shoulder.is_valid()
        || !right_shoulder.is_valid()
        || !left_hip.is_valid()
        || !right_hip.is_valid()
    {
        return 0.0;
    }

    let shoulder_mid = left_shoulder.position.midpoint(right_shoulder.position);
    let hip_mid = left_hip.position.midpoint(right_hip.position);

    let to_nose = nose.position - shoulder_mid;
    let to_hips = hip_mid - shoulder_mid;
    let magnitudes = to_nose.length() * to_hips.length();
    if magnitudes <= 0.0 {
        return 0.0;
    }

    let cos_vertex = (to_nose.dot(to_hips) / magnitudes).clamp(-1.0, 1.0);
    180.0 - cos_vertex.acos().to_degrees()
}

/// Absolute vertical distance between the shoulders, 0 when either is invalid.
pub fn shoulder_balance(sample: &PoseSample) -> f32 {
    let left = keypoint(sample, KeypointIndex::LeftShoulder);
    let right = keypoint(sample, KeypointIndex::RightShoulder);
    if !left.is_valid() || !right.is_valid() {
        return 0.0;
    }
    (left.position.y - right.position.y).abs()
}

/// Whether the nose sits low relative to the shoulder midpoint, per the
/// configured [`HeadLowMode`]. Invalid nose or shoulders yield false.
pub fn head_low_position(sample: &PoseSample, thresholds: &Thresholds) -> bool {
    let nose = keypoint(sample, KeypointIndex::Nose);
    let left = keypoint(sample, KeypointIndex::LeftShoulder);
    let right = keypoint(sample, KeypointIndex::RightShoulder);
    if !nose.is_valid() || !left.is_valid() || !right.is_valid() {
        return false;
    }

    let shoulder_mid = left.position.midpoint(right.position);
    let drop = nose.position.y - shoulder_mid.y;
    match thresholds.head_low_mode() {
        HeadLowMode::AbsoluteOffset => drop > thresholds.lying_head(),
        HeadLowMode::ShoulderRatio => {
            let spread = (left.position.y - right.position.y).abs() + 1.0;
            drop / spread < thresholds.lying_head()
        }
    }
}
