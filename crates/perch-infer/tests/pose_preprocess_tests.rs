use perch_base::Tensor;
use perch_infer::{InferError, preprocess};

#[test]
fn test_preprocess_square_image_640x640() {
    let image = Tensor::zeros(vec![640, 640, 3]).unwrap();
    let (preprocessed, letterbox) = preprocess(&image).unwrap();

    assert_eq!(preprocessed.shape, vec![1, 3, 640, 640]);
    assert_eq!(letterbox.scale, 1.0);
    assert_eq!(letterbox.pad_x, 0.0);
    assert_eq!(letterbox.pad_y, 0.0);
}

#[test]
fn test_preprocess_wide_image_320x640() {
    // Width already at target: vertical padding only
    let image = Tensor::zeros(vec![320, 640, 3]).unwrap();
    let (preprocessed, letterbox) = preprocess(&image).unwrap();

    assert_eq!(preprocessed.shape, vec![1, 3, 640, 640]);
    assert_eq!(letterbox.scale, 1.0);
    assert_eq!(letterbox.pad_x, 0.0);
    assert_eq!(letterbox.pad_y, 160.0);
}

#[test]
fn test_preprocess_tall_image_640x320() {
    let image = Tensor::zeros(vec![640, 320, 3]).unwrap();
    let (_, letterbox) = preprocess(&image).unwrap();

    assert_eq!(letterbox.scale, 1.0);
    assert_eq!(letterbox.pad_x, 160.0);
    assert_eq!(letterbox.pad_y, 0.0);
}

#[test]
fn test_preprocess_camera_frame_480x640() {
    let image = Tensor::zeros(vec![480, 640, 3]).unwrap();
    let (_, letterbox) = preprocess(&image).unwrap();

    assert_eq!(letterbox.scale, 1.0);
    assert_eq!(letterbox.pad_x, 0.0);
    assert_eq!(letterbox.pad_y, 80.0);
}

#[test]
fn test_preprocess_downscales_large_image() {
    // 1280x960 halves to 640x480, padded horizontally
    let image = Tensor::zeros(vec![1280, 960, 3]).unwrap();
    let (_, letterbox) = preprocess(&image).unwrap();

    assert_eq!(letterbox.scale, 0.5);
    assert_eq!(letterbox.pad_x, 80.0);
    assert_eq!(letterbox.pad_y, 0.0);
}

#[test]
fn test_preprocess_value_rescaling() {
    let mut data = Vec::new();
    for _ in 0..320 * 480 {
        data.push(255.0);
        data.push(128.0);
        data.push(0.0);
    }
    let image = Tensor::new(vec![320, 480, 3], data).unwrap();
    let (preprocessed, _) = preprocess(&image).unwrap();

    let max_val = preprocessed.data.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let min_val = preprocessed.data.iter().copied().fold(f32::INFINITY, f32::min);
    assert!(max_val <= 1.0, "max value should be <= 1.0, got {max_val}");
    assert!(min_val >= 0.0, "min value should be >= 0.0, got {min_val}");

    assert!(preprocessed.data.iter().any(|&v| (v - 1.0).abs() < 0.01));
    assert!(preprocessed.data.iter().any(|&v| v.abs() < 0.01));
}

#[test]
fn test_preprocess_padding_value() {
    let image = Tensor::zeros(vec![320, 640, 3]).unwrap();
    let (preprocessed, letterbox) = preprocess(&image).unwrap();
    assert!(letterbox.pad_y > 0.0);

    // Letterbox bars carry the 114-grey padding color
    let expected_pad = 114.0 / 255.0;
    let pad_pixels = preprocessed
        .data
        .iter()
        .filter(|&&v| (v - expected_pad).abs() < 0.01)
        .count();
    assert!(pad_pixels > 0);
}

#[test]
fn test_coordinate_round_trip() {
    let image = Tensor::zeros(vec![480, 640, 3]).unwrap();
    let (_, letterbox) = preprocess(&image).unwrap();

    let orig_x = 320.0;
    let orig_y = 240.0;

    let model_x = (orig_x * letterbox.scale) + letterbox.pad_x;
    let model_y = (orig_y * letterbox.scale) + letterbox.pad_y;

    let recovered_x = (model_x - letterbox.pad_x) / letterbox.scale;
    let recovered_y = (model_y - letterbox.pad_y) / letterbox.scale;

    assert!((recovered_x - orig_x).abs() < 1.0);
    assert!((recovered_y - orig_y).abs() < 1.0);
}

#[test]
fn test_preprocess_invalid_shape() {
    let image = Tensor::zeros(vec![640, 640]).unwrap();
    assert!(matches!(
        preprocess(&image),
        Err(InferError::ShapeMismatch { .. })
    ));

    let image = Tensor::zeros(vec![1, 640, 640, 3]).unwrap();
    assert!(matches!(
        preprocess(&image),
        Err(InferError::ShapeMismatch { .. })
    ));

    let image = Tensor::zeros(vec![640, 640, 4]).unwrap();
    assert!(matches!(
        preprocess(&image),
        Err(InferError::ShapeMismatch { .. })
    ));
}

#[test]
fn test_preprocess_empty_image_rejected() {
    let image = Tensor::zeros(vec![0, 640, 3]).unwrap();
    assert!(matches!(
        preprocess(&image),
        Err(InferError::ShapeMismatch { .. })
    ));
}
