use perch_base::{Rect, Tensor, Vec2};
use perch_infer::{LetterboxInfo, iou, postprocess};

#[test]
fn test_iou_non_overlapping() {
    let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
    let b = Rect::new(Vec2::new(20.0, 20.0), Vec2::new(10.0, 10.0));
    assert_eq!(iou(&a, &b), 0.0);
}

#[test]
fn test_iou_identical() {
    let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
    let b = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
    assert_eq!(iou(&a, &b), 1.0);
}

#[test]
fn test_iou_partial_overlap() {
    let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
    let b = Rect::new(Vec2::new(5.0, 0.0), Vec2::new(10.0, 10.0));
    // Intersection 5x10 = 50, union 150, IoU = 1/3
    assert!((iou(&a, &b) - 0.333).abs() < 0.01);
}

#[test]
fn test_iou_zero_area_boxes() {
    let a = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(0.0, 0.0));
    let b = Rect::new(Vec2::new(0.0, 0.0), Vec2::new(10.0, 10.0));
    assert_eq!(iou(&a, &b), 0.0);
}

/// Set value at [0, feature_idx, detection_idx] in a [1, 56, N] tensor
fn set_detection(data: &mut [f32], n: usize, feature_idx: usize, detection_idx: usize, value: f32) {
    data[feature_idx * n + detection_idx] = value;
}

fn fill_detection(
    data: &mut [f32],
    n: usize,
    det_idx: usize,
    cx: f32,
    cy: f32,
    w: f32,
    h: f32,
    conf: f32,
) {
    set_detection(data, n, 0, det_idx, cx);
    set_detection(data, n, 1, det_idx, cy);
    set_detection(data, n, 2, det_idx, w);
    set_detection(data, n, 3, det_idx, h);
    set_detection(data, n, 4, det_idx, conf);
}

fn no_letterbox() -> LetterboxInfo {
    LetterboxInfo {
        scale: 1.0,
        pad_x: 0.0,
        pad_y: 0.0,
    }
}

#[test]
fn test_postprocess_invalid_shape_returns_error() {
    let output = Tensor::new(vec![1, 10, 5], vec![0.0; 50]).unwrap();
    assert!(postprocess(&output, &no_letterbox(), 0.25, 0.45).is_err());

    let output_2d = Tensor::new(vec![56, 5], vec![0.0; 280]).unwrap();
    assert!(postprocess(&output_2d, &no_letterbox(), 0.25, 0.45).is_err());
}

#[test]
fn test_postprocess_empty_input() {
    let output = Tensor::new(vec![1, 56, 0], vec![]).unwrap();
    let detections = postprocess(&output, &no_letterbox(), 0.25, 0.45).unwrap();
    assert_eq!(detections.len(), 0);
}

#[test]
fn test_postprocess_confidence_filtering() {
    let mut data = vec![0.0; 56 * 2];
    fill_detection(&mut data, 2, 0, 320.0, 320.0, 100.0, 100.0, 0.8);
    fill_detection(&mut data, 2, 1, 100.0, 100.0, 50.0, 50.0, 0.1);

    let output = Tensor::new(vec![1, 56, 2], data).unwrap();
    let detections = postprocess(&output, &no_letterbox(), 0.25, 0.45).unwrap();

    assert_eq!(detections.len(), 1);
    assert!((detections[0].confidence - 0.8).abs() < 0.01);
}

#[test]
fn test_postprocess_all_below_threshold() {
    let mut data = vec![0.0; 56 * 3];
    for i in 0..3 {
        fill_detection(&mut data, 3, i, 100.0, 100.0, 50.0, 50.0, 0.1);
    }

    let output = Tensor::new(vec![1, 56, 3], data).unwrap();
    let detections = postprocess(&output, &no_letterbox(), 0.25, 0.45).unwrap();
    assert_eq!(detections.len(), 0);
}

#[test]
fn test_postprocess_nms_suppression() {
    let mut data = vec![0.0; 56 * 2];
    // Two detections at nearly the same position; the weaker one goes
    fill_detection(&mut data, 2, 0, 320.0, 320.0, 100.0, 100.0, 0.9);
    fill_detection(&mut data, 2, 1, 325.0, 325.0, 100.0, 100.0, 0.7);

    let output = Tensor::new(vec![1, 56, 2], data).unwrap();
    let detections = postprocess(&output, &no_letterbox(), 0.25, 0.45).unwrap();

    assert_eq!(detections.len(), 1);
    assert!((detections[0].confidence - 0.9).abs() < 0.01);
}

#[test]
fn test_postprocess_nms_keeps_distant_detections() {
    let mut data = vec![0.0; 56 * 2];
    fill_detection(&mut data, 2, 0, 100.0, 100.0, 50.0, 50.0, 0.9);
    fill_detection(&mut data, 2, 1, 500.0, 500.0, 50.0, 50.0, 0.7);

    let output = Tensor::new(vec![1, 56, 2], data).unwrap();
    let detections = postprocess(&output, &no_letterbox(), 0.25, 0.45).unwrap();

    assert_eq!(detections.len(), 2);
    // Sorted by confidence descending
    assert!(detections[0].confidence > detections[1].confidence);
}

#[test]
fn test_postprocess_bbox_center_to_origin() {
    let mut data = vec![0.0; 56];
    fill_detection(&mut data, 1, 0, 100.0, 100.0, 40.0, 40.0, 0.8);

    let output = Tensor::new(vec![1, 56, 1], data).unwrap();
    let detections = postprocess(&output, &no_letterbox(), 0.25, 0.45).unwrap();

    assert_eq!(detections.len(), 1);
    assert!((detections[0].bbox.origin.x - 80.0).abs() < 0.1);
    assert!((detections[0].bbox.origin.y - 80.0).abs() < 0.1);
    assert!((detections[0].bbox.size.x - 40.0).abs() < 0.1);
    assert!((detections[0].bbox.size.y - 40.0).abs() < 0.1);
}

#[test]
fn test_postprocess_keypoint_rescaling() {
    let mut data = vec![0.0; 56];
    fill_detection(&mut data, 1, 0, 400.0, 400.0, 100.0, 100.0, 0.8);
    // Keypoint 0 at model-space (400, 400)
    data[5] = 400.0;
    data[6] = 400.0;
    data[7] = 0.9;

    let output = Tensor::new(vec![1, 56, 1], data).unwrap();
    let letterbox = LetterboxInfo {
        scale: 2.0,
        pad_x: 160.0,
        pad_y: 160.0,
    };
    let detections = postprocess(&output, &letterbox, 0.25, 0.45).unwrap();

    // (400 - 160) / 2 = 120 on both axes
    let kp0 = &detections[0].keypoints[0];
    assert!((kp0.position.x - 120.0).abs() < 1.0);
    assert!((kp0.position.y - 120.0).abs() < 1.0);
    assert!((kp0.confidence - 0.9).abs() < 0.01);
}
