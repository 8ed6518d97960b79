pub mod classifier;
pub mod features;
pub mod state;
pub mod thresholds;

pub use classifier::{PostureClassifier, PostureResult, classify_detections};
pub use features::{
    PoseFeatures, PoseSample, compute_features, head_low_position, head_tilt_angle,
    shoulder_balance, spine_curve_angle,
};
pub use state::PostureState;
pub use thresholds::{HeadLowMode, Thresholds};
