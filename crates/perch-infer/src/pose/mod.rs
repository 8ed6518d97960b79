mod estimator;
mod postprocess;
mod preprocess;
mod types;

pub use estimator::YoloPoseEstimator;
pub use postprocess::{iou, postprocess};
pub use preprocess::preprocess;
pub use types::{
    COCO_KEYPOINT_COUNT, KEYPOINT_VALID_CONFIDENCE, Keypoint, KeypointIndex, LetterboxInfo,
    PoseDetection,
};
