use perch_camera::PixelFormat;

use crate::error::DisplayError;
use crate::style::StatusLine;

/// One frame handed to a display backend.
///
/// The data is borrowed for the duration of the update call; backends copy
/// out what they need to keep.
#[derive(Clone, Copy, Debug)]
pub struct ImageDescriptor<'a> {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    pub data: &'a [u8],
}

impl<'a> ImageDescriptor<'a> {
    pub fn new(width: u32, height: u32, format: PixelFormat, data: &'a [u8]) -> Self {
        Self {
            width,
            height,
            format,
            data,
        }
    }

    /// Byte length the descriptor's dimensions and format require.
    pub fn expected_len(&self) -> usize {
        self.format.frame_len(self.width, self.height)
    }

    /// Check that `data` covers the described dimensions.
    pub fn validate(&self) -> Result<(), DisplayError> {
        let expected = self.expected_len();
        if self.data.len() < expected {
            return Err(DisplayError::ImageMismatch {
                expected,
                got: self.data.len(),
            });
        }
        Ok(())
    }
}

/// Where frames and posture status end up.
///
/// Implemented by the application for its window or panel backend. A
/// surface shared between tasks is wrapped in a `Mutex` and locked only
/// for the duration of one update call.
pub trait DisplaySurface {
    /// Present a frame.
    fn update_image(&mut self, image: &ImageDescriptor<'_>) -> Result<(), DisplayError>;

    /// Present the posture status line.
    fn update_status(&mut self, status: &StatusLine) -> Result<(), DisplayError>;
}
