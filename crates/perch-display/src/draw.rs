//! Overlay drawing on HWC RGB888 frames.
//!
//! Detections are burned into the frame before it is frozen or shown: a
//! bounding box outline plus skeleton segments and dots for the valid
//! keypoints. Everything clips to the frame bounds.

use perch_base::Rect;
use perch_infer::{KeypointIndex, PoseDetection};

const BBOX_COLOR: [u8; 3] = [255, 0, 0];
const BBOX_THICKNESS: i32 = 2;
const KEYPOINT_COLOR: [u8; 3] = [0, 255, 0];
const KEYPOINT_RADIUS: i32 = 3;

const FACE_COLOR: [u8; 3] = [0, 255, 255];
const TORSO_COLOR: [u8; 3] = [0, 255, 0];
const ARM_COLOR: [u8; 3] = [255, 255, 0];
const LEG_COLOR: [u8; 3] = [255, 0, 255];
const NECK_COLOR: [u8; 3] = [255, 255, 255];

/// COCO 17-keypoint skeleton segments with their overlay colors.
const SKELETON: [(KeypointIndex, KeypointIndex, [u8; 3]); 18] = [
    (KeypointIndex::Nose, KeypointIndex::LeftEye, FACE_COLOR),
    (KeypointIndex::Nose, KeypointIndex::RightEye, FACE_COLOR),
    (KeypointIndex::LeftEye, KeypointIndex::LeftEar, FACE_COLOR),
    (KeypointIndex::RightEye, KeypointIndex::RightEar, FACE_COLOR),
    (KeypointIndex::LeftShoulder, KeypointIndex::RightShoulder, TORSO_COLOR),
    (KeypointIndex::LeftShoulder, KeypointIndex::LeftHip, TORSO_COLOR),
    (KeypointIndex::RightShoulder, KeypointIndex::RightHip, TORSO_COLOR),
    (KeypointIndex::LeftHip, KeypointIndex::RightHip, TORSO_COLOR),
    (KeypointIndex::LeftShoulder, KeypointIndex::LeftElbow, ARM_COLOR),
    (KeypointIndex::RightShoulder, KeypointIndex::RightElbow, ARM_COLOR),
    (KeypointIndex::LeftElbow, KeypointIndex::LeftWrist, ARM_COLOR),
    (KeypointIndex::RightElbow, KeypointIndex::RightWrist, ARM_COLOR),
    (KeypointIndex::LeftHip, KeypointIndex::LeftKnee, LEG_COLOR),
    (KeypointIndex::RightHip, KeypointIndex::RightKnee, LEG_COLOR),
    (KeypointIndex::LeftKnee, KeypointIndex::LeftAnkle, LEG_COLOR),
    (KeypointIndex::RightKnee, KeypointIndex::RightAnkle, LEG_COLOR),
    (KeypointIndex::Nose, KeypointIndex::LeftShoulder, NECK_COLOR),
    (KeypointIndex::Nose, KeypointIndex::RightShoulder, NECK_COLOR),
];

/// Burn one detection into the frame: the bounding box, then skeleton
/// segments between mutually valid keypoints and a dot per valid keypoint.
pub fn draw_detection(buf: &mut [u8], width: usize, height: usize, detection: &PoseDetection) {
    draw_bbox(buf, width, height, detection.bbox, BBOX_COLOR, BBOX_THICKNESS);

    for (from, to, color) in &SKELETON {
        let a = detection.keypoint(*from);
        let b = detection.keypoint(*to);
        if a.is_valid() && b.is_valid() {
            draw_line(
                buf,
                width,
                height,
                a.position.x as i32,
                a.position.y as i32,
                b.position.x as i32,
                b.position.y as i32,
                *color,
            );
        }
    }

    for keypoint in &detection.keypoints {
        if keypoint.is_valid() {
            draw_filled_circle(
                buf,
                width,
                height,
                keypoint.position.x as i32,
                keypoint.position.y as i32,
                KEYPOINT_RADIUS,
                KEYPOINT_COLOR,
            );
        }
    }
}

/// Rectangle outline, `thickness` pixels toward the interior.
pub fn draw_bbox(
    buf: &mut [u8],
    width: usize,
    height: usize,
    bbox: Rect<f32>,
    color: [u8; 3],
    thickness: i32,
) {
    let x0 = bbox.min().x as i32;
    let y0 = bbox.min().y as i32;
    let x1 = bbox.max().x as i32;
    let y1 = bbox.max().y as i32;

    for t in 0..thickness {
        draw_line(buf, width, height, x0 + t, y0, x0 + t, y1, color);
        draw_line(buf, width, height, x1 - t, y0, x1 - t, y1, color);
        draw_line(buf, width, height, x0, y0 + t, x1, y0 + t, color);
        draw_line(buf, width, height, x0, y1 - t, x1, y1 - t, color);
    }
}

/// Line segment clipped to the frame, then drawn with Bresenham stepping.
pub fn draw_line(
    buf: &mut [u8],
    width: usize,
    height: usize,
    x0: i32,
    y0: i32,
    x1: i32,
    y1: i32,
    color: [u8; 3],
) {
    let Some((mut x0, mut y0, x1, y1)) =
        clip_segment(x0, y0, x1, y1, width as i32, height as i32)
    else {
        return;
    };

    let dx = (x1 - x0).abs();
    let dy = (y1 - y0).abs();
    let sx = if x0 < x1 { 1 } else { -1 };
    let sy = if y0 < y1 { 1 } else { -1 };
    let mut err = dx - dy;

    loop {
        set_pixel(buf, width, x0 as usize, y0 as usize, color);

        if x0 == x1 && y0 == y1 {
            break;
        }

        let e2 = 2 * err;
        if e2 > -dy {
            err -= dy;
            x0 += sx;
        }
        if e2 < dx {
            err += dx;
            y0 += sy;
        }
    }
}

/// Filled circle, clipped to the frame.
pub fn draw_filled_circle(
    buf: &mut [u8],
    width: usize,
    height: usize,
    cx: i32,
    cy: i32,
    radius: i32,
    color: [u8; 3],
) {
    let r2 = radius * radius;

    for dy in -radius..=radius {
        for dx in -radius..=radius {
            if dx * dx + dy * dy > r2 {
                continue;
            }
            let x = cx + dx;
            let y = cy + dy;
            if x >= 0 && x < width as i32 && y >= 0 && y < height as i32 {
                set_pixel(buf, width, x as usize, y as usize, color);
            }
        }
    }
}

/// Pack an HWC RGB888 buffer into 0x00RRGGBB words for a windowed display.
pub fn rgb_to_argb(buf: &[u8], width: usize, height: usize) -> Vec<u32> {
    let mut argb = Vec::with_capacity(width * height);

    for pixel in 0..width * height {
        let r = buf[pixel * 3] as u32;
        let g = buf[pixel * 3 + 1] as u32;
        let b = buf[pixel * 3 + 2] as u32;
        argb.push((r << 16) | (g << 8) | b);
    }

    argb
}

fn set_pixel(buf: &mut [u8], width: usize, x: usize, y: usize, color: [u8; 3]) {
    let idx = (y * width + x) * 3;
    buf[idx] = color[0];
    buf[idx + 1] = color[1];
    buf[idx + 2] = color[2];
}

// Cohen-Sutherland outcodes
const INSIDE: u8 = 0;
const LEFT: u8 = 1;
const RIGHT: u8 = 2;
const BOTTOM: u8 = 4;
const TOP: u8 = 8;

fn outcode(x: i32, y: i32, width: i32, height: i32) -> u8 {
    let mut code = INSIDE;
    if x < 0 {
        code |= LEFT;
    } else if x >= width {
        code |= RIGHT;
    }
    if y < 0 {
        code |= TOP;
    } else if y >= height {
        code |= BOTTOM;
    }
    code
}

/// Clip a segment to `[0, width) x [0, height)`. `None` when the segment
/// lies entirely outside.
fn clip_segment(
    mut x0: i32,
    mut y0: i32,
    mut x1: i32,
    mut y1: i32,
    width: i32,
    height: i32,
) -> Option<(i32, i32, i32, i32)> {
    loop {
        let code0 = outcode(x0, y0, width, height);
        let code1 = outcode(x1, y1, width, height);

        if code0 | code1 == 0 {
            return Some((x0, y0, x1, y1));
        }
        if code0 & code1 != 0 {
            return None;
        }

        // Pull the out-of-bounds endpoint onto the frame edge it crossed.
        let code = if code0 != 0 { code0 } else { code1 };
        let dx = x1 - x0;
        let dy = y1 - y0;

        let (x, y) = if code & TOP != 0 {
            (x0 + dx * (0 - y0) / dy, 0)
        } else if code & BOTTOM != 0 {
            (x0 + dx * (height - 1 - y0) / dy, height - 1)
        } else if code & LEFT != 0 {
            (0, y0 + dy * (0 - x0) / dx)
        } else {
            (width - 1, y0 + dy * (width - 1 - x0) / dx)
        };

        if code == code0 {
            x0 = x;
            y0 = y;
        } else {
            x1 = x;
            y1 = y;
        }
    }
}
