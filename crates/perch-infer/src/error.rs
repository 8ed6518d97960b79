use std::fmt;

use crate::device::Device;

#[derive(Debug)]
pub enum InferError {
    ModelLoad(String),
    BackendError(String),
    ShapeMismatch { expected: String, got: String },
    InvalidInput { name: String, expected_names: Vec<String> },
    UnsupportedDtype(String),
    UnsupportedDevice(Device),
}

impl fmt::Display for InferError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InferError::ModelLoad(msg) => write!(f, "model load error: {msg}"),
            InferError::BackendError(msg) => write!(f, "backend error: {msg}"),
            InferError::ShapeMismatch { expected, got } => {
                write!(f, "shape mismatch: expected {expected}, got {got}")
            }
            InferError::InvalidInput { name, expected_names } => {
                write!(f, "invalid input '{name}', model expects {expected_names:?}")
            }
            InferError::UnsupportedDtype(msg) => write!(f, "unsupported dtype: {msg}"),
            InferError::UnsupportedDevice(device) => {
                write!(f, "unsupported device: {device}")
            }
        }
    }
}

impl std::error::Error for InferError {}
