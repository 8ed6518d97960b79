use minifb::Window;
use perch_camera::PixelFormat;
use perch_display::{DisplayError, DisplaySurface, ImageDescriptor, StatusLine, draw};
use perch_posture::{PostureResult, PostureState};

/// Height of the status color strip along the bottom of the window, px.
pub const STRIP_HEIGHT: usize = 16;

/// Status line for a classification result. A result with no subject shows
/// the no-person status instead of "Detecting... (0.0%)".
pub fn status_for(result: &PostureResult) -> StatusLine {
    if result.state == PostureState::Unknown {
        StatusLine::no_person()
    } else {
        StatusLine::from_result(result)
    }
}

/// Window title carrying the status icon and text.
pub fn format_title(base: &str, status: &StatusLine) -> String {
    format!("{base} - {} {}", status.icon, status.text)
}

/// Paint the status indicator strip over the bottom rows of an ARGB buffer.
pub fn paint_status_strip(argb: &mut [u32], width: usize, height: usize, color: [u8; 3]) {
    let packed = ((color[0] as u32) << 16) | ((color[1] as u32) << 8) | color[2] as u32;
    let rows = STRIP_HEIGHT.min(height);

    for y in height - rows..height {
        for x in 0..width {
            argb[y * width + x] = packed;
        }
    }
}

/// Minifb-backed display surface: frames in the window, status as a title
/// suffix plus a color strip along the bottom edge.
pub struct WindowSurface {
    window: Window,
    width: usize,
    height: usize,
    title_base: String,
    color: [u8; 3],
}

impl WindowSurface {
    pub fn new(window: Window, width: usize, height: usize, title_base: &str) -> Self {
        Self {
            window,
            width,
            height,
            title_base: title_base.to_string(),
            color: [0, 0, 0],
        }
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Process window events on ticks where no frame was presented.
    pub fn pump(&mut self) {
        self.window.update();
    }
}

impl DisplaySurface for WindowSurface {
    fn update_image(&mut self, image: &ImageDescriptor<'_>) -> Result<(), DisplayError> {
        image.validate()?;
        if image.format != PixelFormat::Rgb888
            || image.width as usize != self.width
            || image.height as usize != self.height
        {
            return Err(DisplayError::Surface(format!(
                "unsupported image: {}x{} {:?}",
                image.width, image.height, image.format
            )));
        }

        let mut argb = draw::rgb_to_argb(image.data, self.width, self.height);
        paint_status_strip(&mut argb, self.width, self.height, self.color);
        self.window
            .update_with_buffer(&argb, self.width, self.height)
            .map_err(|err| DisplayError::Surface(err.to_string()))
    }

    fn update_status(&mut self, status: &StatusLine) -> Result<(), DisplayError> {
        self.color = status.color;
        self.window
            .set_title(&format_title(&self.title_base, status));
        Ok(())
    }
}
