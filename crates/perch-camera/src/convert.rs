use crate::format::PixelFormat;

/// Converts one captured frame to packed RGB888 in a caller-provided buffer.
///
/// `rgb` must be exactly `width * height * 3` bytes; the pipeline recycles
/// these buffers, so nothing is allocated here. YUV planes convert with
/// BT.601 coefficients:
/// - R = Y + 1.402 * (V - 128)
/// - G = Y - 0.344 * (U - 128) - 0.714 * (V - 128)
/// - B = Y + 1.772 * (U - 128)
///
/// Raw8 carries no demosaic step and is treated as greyscale. Raw10 has no
/// RGB conversion.
///
/// Returns `false` when the format is not convertible, `data` is shorter
/// than the format requires, or `rgb` has the wrong length; `rgb` contents
/// are unspecified in that case. Dimensions are assumed even for the planar
/// YUV formats.
pub fn to_rgb888(format: PixelFormat, data: &[u8], width: u32, height: u32, rgb: &mut [u8]) -> bool {
    let pixels = width as usize * height as usize;
    if rgb.len() != pixels * 3 || data.len() < format.frame_len(width, height) {
        return false;
    }

    match format {
        PixelFormat::Raw8 | PixelFormat::Grey => grey_to_rgb(data, pixels, rgb),
        PixelFormat::Rgb565 => rgb565_to_rgb(data, pixels, rgb),
        PixelFormat::Rgb888 => rgb.copy_from_slice(&data[..pixels * 3]),
        PixelFormat::Yuv422 => yuv422p_to_rgb(data, width as usize, height as usize, rgb),
        PixelFormat::Yuv420 => yuv420p_to_rgb(data, width as usize, height as usize, rgb),
        PixelFormat::Raw10 => return false,
    }

    true
}

fn grey_to_rgb(data: &[u8], pixels: usize, rgb: &mut [u8]) {
    for (i, y) in data[..pixels].iter().enumerate() {
        rgb[i * 3] = *y;
        rgb[i * 3 + 1] = *y;
        rgb[i * 3 + 2] = *y;
    }
}

fn rgb565_to_rgb(data: &[u8], pixels: usize, rgb: &mut [u8]) {
    for i in 0..pixels {
        let v = u16::from_le_bytes([data[i * 2], data[i * 2 + 1]]);
        let r5 = ((v >> 11) & 0x1f) as u8;
        let g6 = ((v >> 5) & 0x3f) as u8;
        let b5 = (v & 0x1f) as u8;

        // Expand by replicating high bits so 0x1f maps to 0xff
        rgb[i * 3] = (r5 << 3) | (r5 >> 2);
        rgb[i * 3 + 1] = (g6 << 2) | (g6 >> 4);
        rgb[i * 3 + 2] = (b5 << 3) | (b5 >> 2);
    }
}

fn yuv422p_to_rgb(data: &[u8], width: usize, height: usize, rgb: &mut [u8]) {
    // Y plane, then U and V planes at half horizontal resolution
    let y_plane = &data[..width * height];
    let u_plane = &data[width * height..width * height + width / 2 * height];
    let v_plane = &data[width * height + width / 2 * height..];

    for row in 0..height {
        for col in 0..width {
            let y = y_plane[row * width + col];
            let u = u_plane[row * (width / 2) + col / 2];
            let v = v_plane[row * (width / 2) + col / 2];
            store_yuv(rgb, row * width + col, y, u, v);
        }
    }
}

fn yuv420p_to_rgb(data: &[u8], width: usize, height: usize, rgb: &mut [u8]) {
    // Y plane, then U and V planes at half resolution in both axes
    let chroma = width / 2 * (height / 2);
    let y_plane = &data[..width * height];
    let u_plane = &data[width * height..width * height + chroma];
    let v_plane = &data[width * height + chroma..];

    for row in 0..height {
        for col in 0..width {
            let y = y_plane[row * width + col];
            let u = u_plane[(row / 2) * (width / 2) + col / 2];
            let v = v_plane[(row / 2) * (width / 2) + col / 2];
            store_yuv(rgb, row * width + col, y, u, v);
        }
    }
}

fn store_yuv(rgb: &mut [u8], pixel: usize, y: u8, u: u8, v: u8) {
    let y = y as f32;
    let u = u as f32;
    let v = v as f32;

    rgb[pixel * 3] = (y + 1.402 * (v - 128.0)).clamp(0.0, 255.0) as u8;
    rgb[pixel * 3 + 1] = (y - 0.344 * (u - 128.0) - 0.714 * (v - 128.0)).clamp(0.0, 255.0) as u8;
    rgb[pixel * 3 + 2] = (y + 1.772 * (u - 128.0)).clamp(0.0, 255.0) as u8;
}
