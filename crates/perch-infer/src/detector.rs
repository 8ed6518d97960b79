use perch_base::Tensor;

use crate::InferError;
use crate::pose::PoseDetection;

/// The pose-detector boundary the perception pipeline runs against.
///
/// Input is an RGB image tensor in HWC layout with values in [0, 255].
/// Implementations return one entry per detected person; the list carries
/// no ordering guarantee.
pub trait PoseDetector {
    fn detect(&mut self, image: &Tensor<f32>) -> Result<Vec<PoseDetection>, InferError>;
}
