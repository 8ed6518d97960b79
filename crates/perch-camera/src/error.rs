use std::fmt;

#[derive(Debug)]
pub enum CameraError {
    Device(String),
    FormatUnsupported(String),
    NotStreaming,
    AlreadyStreaming,
    AcquireTimeout,
    AcquireFailed(String),
}

impl fmt::Display for CameraError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CameraError::Device(msg) => write!(f, "device error: {msg}"),
            CameraError::FormatUnsupported(msg) => write!(f, "format unsupported: {msg}"),
            CameraError::NotStreaming => write!(f, "stream not started"),
            CameraError::AlreadyStreaming => write!(f, "stream already started"),
            CameraError::AcquireTimeout => write!(f, "frame acquire timed out"),
            CameraError::AcquireFailed(msg) => write!(f, "frame acquire failed: {msg}"),
        }
    }
}

impl std::error::Error for CameraError {}

impl From<std::io::Error> for CameraError {
    fn from(err: std::io::Error) -> Self {
        CameraError::Device(err.to_string())
    }
}
