use perch_base::{Rect, Tensor, Vec2};

use crate::InferError;

use super::types::{COCO_KEYPOINT_COUNT, Keypoint, LetterboxInfo, PoseDetection};

/// Compute Intersection over Union (IoU) between two bounding boxes.
///
/// Returns 0.0 for non-overlapping or zero-area boxes.
pub fn iou(a: &Rect<f32>, b: &Rect<f32>) -> f32 {
    if a.size.x <= 0.0 || a.size.y <= 0.0 || b.size.x <= 0.0 || b.size.y <= 0.0 {
        return 0.0;
    }

    let intersection_area = match a.intersection(*b) {
        Some(rect) => rect.size.x * rect.size.y,
        None => 0.0,
    };

    let area_a = a.size.x * a.size.y;
    let area_b = b.size.x * b.size.y;
    let union_area = area_a + area_b - intersection_area;

    if union_area <= 0.0 {
        return 0.0;
    }

    intersection_area / union_area
}

/// Post-process YOLO pose model output.
///
/// Takes the raw model output tensor [1, 56, N] (cx, cy, w, h, confidence,
/// then 17 keypoint triplets), applies confidence filtering, greedy NMS,
/// and letterbox-inverse coordinate rescaling.
///
/// Returns detections sorted by confidence descending, or
/// `InferError::ShapeMismatch` for an unexpected output shape.
pub fn postprocess(
    output: &Tensor<f32>,
    letterbox: &LetterboxInfo,
    conf_threshold: f32,
    iou_threshold: f32,
) -> Result<Vec<PoseDetection>, InferError> {
    if output.shape.len() != 3 || output.shape[0] != 1 || output.shape[1] != 56 {
        return Err(InferError::ShapeMismatch {
            expected: "[1, 56, N]".to_string(),
            got: format!("{:?}", output.shape),
        });
    }

    let n = output.shape[2];
    if n == 0 {
        return Ok(Vec::new());
    }

    // In the flat [1, 56, N] data, element [0, row, col] is at row * N + col
    let mut candidates = Vec::new();

    for i in 0..n {
        let cx = output.data[i];
        let cy = output.data[n + i];
        let w = output.data[2 * n + i];
        let h = output.data[3 * n + i];
        let confidence = output.data[4 * n + i];

        if confidence < conf_threshold {
            continue;
        }

        let mut keypoints = [Keypoint::default(); COCO_KEYPOINT_COUNT];
        for (kp_idx, keypoint) in keypoints.iter_mut().enumerate() {
            let base = 5 + kp_idx * 3;
            let x = output.data[base * n + i];
            let y = output.data[(base + 1) * n + i];
            let vis = output.data[(base + 2) * n + i];

            // Rescale from model space back to the source image
            let rescaled_x = (x - letterbox.pad_x) / letterbox.scale;
            let rescaled_y = (y - letterbox.pad_y) / letterbox.scale;

            *keypoint = Keypoint::new(Vec2::new(rescaled_x, rescaled_y), vis);
        }

        let rescaled_cx = (cx - letterbox.pad_x) / letterbox.scale;
        let rescaled_cy = (cy - letterbox.pad_y) / letterbox.scale;
        let rescaled_w = w / letterbox.scale;
        let rescaled_h = h / letterbox.scale;

        // Center-based box to top-left origin
        let bbox = Rect::new(
            Vec2::new(rescaled_cx - rescaled_w / 2.0, rescaled_cy - rescaled_h / 2.0),
            Vec2::new(rescaled_w, rescaled_h),
        );

        candidates.push(PoseDetection {
            bbox,
            confidence,
            keypoints,
        });
    }

    candidates.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    // Greedy NMS
    let mut keep = Vec::new();
    let mut suppressed = vec![false; candidates.len()];

    for i in 0..candidates.len() {
        if suppressed[i] {
            continue;
        }

        keep.push(candidates[i].clone());

        for j in (i + 1)..candidates.len() {
            if suppressed[j] {
                continue;
            }

            if iou(&candidates[i].bbox, &candidates[j].bbox) > iou_threshold {
                suppressed[j] = true;
            }
        }
    }

    Ok(keep)
}
