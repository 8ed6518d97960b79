use std::fmt;

#[derive(Debug)]
pub enum DisplayError {
    Surface(String),
    ImageMismatch { expected: usize, got: usize },
}

impl fmt::Display for DisplayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DisplayError::Surface(msg) => write!(f, "display surface error: {msg}"),
            DisplayError::ImageMismatch { expected, got } => {
                write!(f, "image data mismatch: expected {expected} bytes, got {got}")
            }
        }
    }
}

impl std::error::Error for DisplayError {}
