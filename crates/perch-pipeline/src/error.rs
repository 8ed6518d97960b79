use std::fmt;

use perch_base::TensorError;
use perch_camera::CameraError;

#[derive(Debug)]
pub enum PipelineError {
    /// Capture failed; the dispatch loop has exited.
    Camera(CameraError),
    /// A fixed buffer could not be sized at construction.
    Resource(TensorError),
    /// The dispatch thread ended without reporting a result.
    CaptureThread(String),
}

impl fmt::Display for PipelineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineError::Camera(err) => write!(f, "camera error: {err}"),
            PipelineError::Resource(err) => write!(f, "resource error: {err}"),
            PipelineError::CaptureThread(msg) => write!(f, "capture thread failed: {msg}"),
        }
    }
}

impl std::error::Error for PipelineError {}

impl From<CameraError> for PipelineError {
    fn from(err: CameraError) -> Self {
        PipelineError::Camera(err)
    }
}

impl From<TensorError> for PipelineError {
    fn from(err: TensorError) -> Self {
        PipelineError::Resource(err)
    }
}
