use perch_base::Tensor;

use crate::InferError;

use super::types::LetterboxInfo;

const TARGET_SIZE: usize = 640;
const PAD_COLOR: f32 = 114.0 / 255.0; // Grey padding in normalized range

/// Preprocess an image for YOLO pose inference.
///
/// Takes an image tensor in HWC format (height, width, 3 channels) with
/// pixel values in [0, 255] and returns an NCHW tensor (1, 3, 640, 640)
/// with values in [0.0, 1.0]:
/// - letterbox resize to 640x640 maintaining aspect ratio (nearest
///   neighbor)
/// - HWC -> NCHW transpose
/// - rescale from [0, 255] to [0.0, 1.0]
///
/// Returns the preprocessed tensor and the letterbox parameters needed to
/// map detections back to source coordinates.
pub fn preprocess(image: &Tensor<f32>) -> Result<(Tensor<f32>, LetterboxInfo), InferError> {
    if image.shape.len() != 3 {
        return Err(InferError::ShapeMismatch {
            expected: "[H, W, 3]".to_string(),
            got: format!("{:?}", image.shape),
        });
    }
    let [h, w, c] = [image.shape[0], image.shape[1], image.shape[2]];
    if c != 3 {
        return Err(InferError::ShapeMismatch {
            expected: "3 channels".to_string(),
            got: format!("{c} channels"),
        });
    }
    if h == 0 || w == 0 {
        return Err(InferError::ShapeMismatch {
            expected: "non-empty image".to_string(),
            got: format!("{:?}", image.shape),
        });
    }

    let scale = (TARGET_SIZE as f32 / w as f32).min(TARGET_SIZE as f32 / h as f32);

    let new_w = (w as f32 * scale) as usize;
    let new_h = (h as f32 * scale) as usize;

    let pad_x = ((TARGET_SIZE - new_w) / 2) as f32;
    let pad_y = ((TARGET_SIZE - new_h) / 2) as f32;

    // Nearest-neighbor resize
    let mut resized = vec![0.0; new_h * new_w * 3];
    for out_y in 0..new_h {
        for out_x in 0..new_w {
            let src_y = ((out_y as f32 / scale).floor() as usize).min(h - 1);
            let src_x = ((out_x as f32 / scale).floor() as usize).min(w - 1);

            for ch in 0..3 {
                let src_idx = (src_y * w + src_x) * 3 + ch;
                let dst_idx = (out_y * new_w + out_x) * 3 + ch;
                resized[dst_idx] = image.data[src_idx];
            }
        }
    }

    // Pad to 640x640 and transpose to NCHW, rescaling to [0, 1]
    let mut nchw = vec![PAD_COLOR; 3 * TARGET_SIZE * TARGET_SIZE];

    let pad_x_int = pad_x as usize;
    let pad_y_int = pad_y as usize;

    for ch in 0..3 {
        for y in 0..new_h {
            for x in 0..new_w {
                let src_idx = (y * new_w + x) * 3 + ch;
                let dst_y = y + pad_y_int;
                let dst_x = x + pad_x_int;
                let dst_idx = ch * (TARGET_SIZE * TARGET_SIZE) + dst_y * TARGET_SIZE + dst_x;

                nchw[dst_idx] = resized[src_idx] / 255.0;
            }
        }
    }

    let preprocessed = Tensor::new(vec![1, 3, TARGET_SIZE, TARGET_SIZE], nchw)
        .map_err(|e| InferError::BackendError(format!("failed to create tensor: {e}")))?;

    let letterbox = LetterboxInfo { scale, pad_x, pad_y };

    Ok((preprocessed, letterbox))
}
