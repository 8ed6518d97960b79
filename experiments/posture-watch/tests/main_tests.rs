use perch_base::{Tensor, TensorError};
use perch_camera::PixelFormat;

// Mirrors the helper in src/main.rs.
fn tensor_u8_to_f32(frame: &Tensor<u8>) -> Result<Tensor<f32>, TensorError> {
    Tensor::new(
        frame.shape.clone(),
        frame.data.iter().map(|&v| v as f32).collect(),
    )
}

// Mirrors the helper in src/main.rs.
fn parse_format(name: &str) -> Option<PixelFormat> {
    match name.to_ascii_lowercase().as_str() {
        "raw8" => Some(PixelFormat::Raw8),
        "raw10" => Some(PixelFormat::Raw10),
        "grey" | "gray" => Some(PixelFormat::Grey),
        "rgb565" => Some(PixelFormat::Rgb565),
        "rgb888" => Some(PixelFormat::Rgb888),
        "yuv422" => Some(PixelFormat::Yuv422),
        "yuv420" => Some(PixelFormat::Yuv420),
        _ => None,
    }
}

#[test]
fn test_tensor_widening_preserves_shape_and_values() {
    let rgb = Tensor::new(vec![1, 2, 3], vec![0u8, 127, 255, 10, 20, 30]).unwrap();

    let widened = tensor_u8_to_f32(&rgb).unwrap();
    assert_eq!(widened.shape, vec![1, 2, 3]);
    assert_eq!(widened.data, vec![0.0, 127.0, 255.0, 10.0, 20.0, 30.0]);
}

#[test]
fn test_parse_format_names() {
    assert_eq!(parse_format("rgb565"), Some(PixelFormat::Rgb565));
    assert_eq!(parse_format("RGB888"), Some(PixelFormat::Rgb888));
    assert_eq!(parse_format("grey"), Some(PixelFormat::Grey));
    assert_eq!(parse_format("gray"), Some(PixelFormat::Grey));
    assert_eq!(parse_format("yuv420"), Some(PixelFormat::Yuv420));
    assert_eq!(parse_format("yuv422"), Some(PixelFormat::Yuv422));
    assert_eq!(parse_format("raw8"), Some(PixelFormat::Raw8));
    assert_eq!(parse_format("raw10"), Some(PixelFormat::Raw10));
    assert_eq!(parse_format("bogus"), None);
}
