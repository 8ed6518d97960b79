use perch_base::Tensor;

use crate::detector::PoseDetector;
use crate::{Backend, InferError, ModelSource};

use super::postprocess::postprocess;
use super::preprocess::preprocess;
use super::types::PoseDetection;

/// End-to-end YOLO pose estimation pipeline.
///
/// Wraps letterbox preprocessing and session inference together with the
/// post-processing pass (confidence filter plus NMS and coordinate rescale)
/// behind a single `estimate()` call.
pub struct YoloPoseEstimator {
    session: Box<dyn crate::Session>,
    conf_threshold: f32,
    iou_threshold: f32,
}

impl YoloPoseEstimator {
    /// Load the model through the given backend.
    ///
    /// Defaults: confidence threshold 0.25, NMS IoU threshold 0.45.
    pub fn new(model: ModelSource, backend: &dyn Backend) -> Result<Self, InferError> {
        let session = backend.load_model(model)?;

        Ok(Self {
            session,
            conf_threshold: 0.25,
            iou_threshold: 0.45,
        })
    }

    /// Set the minimum detection confidence (builder pattern).
    pub fn with_conf_threshold(mut self, threshold: f32) -> Self {
        self.conf_threshold = threshold;
        self
    }

    /// Set the NMS IoU threshold (builder pattern).
    pub fn with_iou_threshold(mut self, threshold: f32) -> Self {
        self.iou_threshold = threshold;
        self
    }

    pub fn conf_threshold(&self) -> f32 {
        self.conf_threshold
    }

    pub fn iou_threshold(&self) -> f32 {
        self.iou_threshold
    }

    /// Run pose estimation on an image.
    ///
    /// `image` is a Tensor<f32> with shape [H, W, 3] and values in
    /// [0, 255]. Returns detected poses sorted by confidence descending.
    pub fn estimate(&mut self, image: &Tensor<f32>) -> Result<Vec<PoseDetection>, InferError> {
        let (preprocessed, letterbox) = preprocess(image)?;

        let input_name = self
            .session
            .input_names()
            .first()
            .ok_or_else(|| InferError::BackendError("model has no inputs".to_string()))?
            .clone();

        let outputs = self.session.run(&[(input_name.as_str(), &preprocessed)])?;

        let output_name = self
            .session
            .output_names()
            .first()
            .ok_or_else(|| InferError::BackendError("model has no outputs".to_string()))?;
        let output = outputs
            .get(output_name)
            .ok_or_else(|| InferError::BackendError("model produced no outputs".to_string()))?;

        postprocess(output, &letterbox, self.conf_threshold, self.iou_threshold)
    }
}

impl PoseDetector for YoloPoseEstimator {
    fn detect(&mut self, image: &Tensor<f32>) -> Result<Vec<PoseDetection>, InferError> {
        self.estimate(image)
    }
}
