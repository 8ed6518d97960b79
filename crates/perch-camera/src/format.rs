/// Pixel formats the capture pipeline understands.
///
/// The set mirrors what the supported sensors actually emit; requesting a
/// format the device cannot natively produce fails at stream start.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    /// 8-bit raw Bayer (BGGR).
    Raw8,
    /// 10-bit raw Bayer, 2 bytes per sample.
    Raw10,
    /// 8-bit greyscale.
    Grey,
    /// 16-bit RGB 5-6-5, little-endian.
    Rgb565,
    /// 24-bit RGB.
    Rgb888,
    /// Planar YUV 4:2:2.
    Yuv422,
    /// Planar YUV 4:2:0.
    Yuv420,
}

impl PixelFormat {
    /// V4L2 fourcc code for this format.
    pub fn fourcc(self) -> [u8; 4] {
        match self {
            PixelFormat::Raw8 => *b"BA81",
            PixelFormat::Raw10 => *b"BA10",
            PixelFormat::Grey => *b"GREY",
            PixelFormat::Rgb565 => *b"RGBP",
            PixelFormat::Rgb888 => *b"RGB3",
            PixelFormat::Yuv422 => *b"422P",
            PixelFormat::Yuv420 => *b"YU12",
        }
    }

    /// Minimum byte length of one frame at the given resolution.
    pub fn frame_len(self, width: u32, height: u32) -> usize {
        let pixels = width as usize * height as usize;
        match self {
            PixelFormat::Raw8 | PixelFormat::Grey => pixels,
            PixelFormat::Raw10 => pixels * 2,
            PixelFormat::Rgb565 => pixels * 2,
            PixelFormat::Rgb888 => pixels * 3,
            PixelFormat::Yuv422 => pixels * 2,
            PixelFormat::Yuv420 => pixels * 3 / 2,
        }
    }
}

/// Frame dimensions in pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

/// What the application asks a capture device for at stream start.
#[derive(Clone, Debug)]
pub struct FormatRequest {
    pub width: u32,
    pub height: u32,
    pub format: PixelFormat,
    pub fps: u32,
    pub buffer_count: u32,
}

/// What the device actually negotiated.
///
/// The driver may adjust the resolution and per-frame byte length; the
/// fourcc is verified to match the request exactly.
#[derive(Clone, Copy, Debug)]
pub struct StreamConfig {
    pub resolution: Resolution,
    pub format: PixelFormat,
    /// Byte length of one frame buffer as sized by the driver.
    pub frame_len: usize,
    /// Number of buffers in the exchange ring.
    pub buffer_count: usize,
}
