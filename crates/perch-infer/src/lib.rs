//! Inference for the perch pipeline.
//!
//! Backend/session traits with an ONNX Runtime implementation, plus the
//! YOLO pose estimation pipeline behind the [`PoseDetector`] trait.

pub mod backend;
pub mod backends;
pub mod detector;
pub mod device;
pub mod error;
pub mod modelsource;
pub mod pose;
pub mod session;

pub use backend::Backend;
pub use detector::PoseDetector;
pub use device::Device;
pub use error::InferError;
pub use modelsource::ModelSource;
pub use session::Session;

pub use pose::{
    COCO_KEYPOINT_COUNT, KEYPOINT_VALID_CONFIDENCE, Keypoint, KeypointIndex, LetterboxInfo,
    PoseDetection, YoloPoseEstimator, iou, postprocess, preprocess,
};

#[cfg(feature = "onnx")]
pub use backends::onnx::OnnxBackend;
