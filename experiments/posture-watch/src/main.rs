mod surface;

use std::env;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use minifb::{Key, KeyRepeat, Window, WindowOptions};
use perch_base::{SystemClock, Tensor, TensorError, log};
use perch_camera::{CameraConfig, FrameSource, PixelFormat, V4l2Device};
use perch_display::draw::draw_detection;
use perch_display::{DisplaySurface, ImageDescriptor, StatusLine};
use perch_infer::{Device, ModelSource, OnnxBackend, PoseDetector, YoloPoseEstimator};
use perch_pipeline::{
    Dispatcher, DispatcherConfig, DropQueue, FramePool, HoldController, LatestSlot, PipelineFrame,
};
use perch_posture::{PostureClassifier, PostureResult, PostureState};
use surface::{WindowSurface, status_for};

const TITLE: &str = "Posture Watch";
const WIDTH: u32 = 640;
const HEIGHT: u32 = 480;
/// How long the display loop waits for a fresh frame before pumping window
/// events anyway.
const FRAME_WAIT: Duration = Duration::from_millis(33);

/// Widen an RGB888 frame to the f32 tensor the detector expects.
fn tensor_u8_to_f32(frame: &Tensor<u8>) -> Result<Tensor<f32>, TensorError> {
    Tensor::new(
        frame.shape.clone(),
        frame.data.iter().map(|&v| v as f32).collect(),
    )
}

/// Pixel format names accepted in `PERCH_FORMAT`.
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

/// Consume sampled frames and classify posture, publishing the annotated
/// frame and result for the display loop.
async fn detect_task<P: PoseDetector>(
    frames: Arc<DropQueue<PipelineFrame>>,
    pool: Arc<FramePool>,
    classifier: PostureClassifier,
    mut detector: P,
    results: Arc<LatestSlot<PostureResult>>,
    annotated: Arc<LatestSlot<PipelineFrame>>,
) {
    loop {
        let frame = frames.recv().await;
        let sequence = frame.sequence;
        let mut image = frame.image;

        let input = match tensor_u8_to_f32(&image) {
            Ok(input) => input,
            Err(err) => {
                log::warn!("frame {sequence} skipped: {err}");
                pool.put(image);
                continue;
            }
        };

        let detections = match detector.detect(&input) {
            Ok(detections) => detections,
            Err(err) => {
                log::warn!("pose inference failed on frame {sequence}: {err}");
                pool.put(image);
                continue;
            }
        };

        let result = classifier.classify(&detections);
        if result.state == PostureState::Unknown {
            log::info!("frame {sequence}: no person detected");
            pool.put(image);
        } else {
            let height = image.shape[0];
            let width = image.shape[1];
            for detection in &detections {
                draw_detection(&mut image.data, width, height, detection);
            }
            log::info!(
                "frame {sequence}: {} ({:.1}%)",
                result.state,
                result.confidence * 100.0
            );
            if let Some(displaced) = annotated.publish(PipelineFrame { sequence, image }) {
                pool.put(displaced.image);
            }
        }
        results.publish(result);
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    perch_base::init_stdout_logger();

    let device_path = env::var("PERCH_DEVICE").unwrap_or_else(|_| "/dev/video0".to_string());
    let model_path: PathBuf = env::var("PERCH_MODEL_PATH")
        .unwrap_or_else(|_| "models/yolo11n-pose.onnx".to_string())
        .into();
    let format = match env::var("PERCH_FORMAT") {
        Ok(name) => parse_format(&name).ok_or(format!("unknown pixel format {name:?}"))?,
        Err(_) => PixelFormat::Rgb565,
    };

    log::info!("{TITLE}");
    log::info!("camera: {device_path}, format: {format:?}");
    log::info!("model: {}", model_path.display());
    log::info!("controls: ESC quit, D toggle detection, [ / ] detect stride");

    let config = CameraConfig::default()
        .with_device(device_path)
        .with_width(WIDTH)
        .with_height(HEIGHT)
        .with_format(format);
    let device = V4l2Device::open(config.device())?;
    let mut source = FrameSource::new(device).with_retry(config.retry());
    let resolution = source.init(&config.request())?;
    let width = resolution.width as usize;
    let height = resolution.height as usize;
    log::info!("streaming {}x{}", resolution.width, resolution.height);

    let mut dispatcher = Dispatcher::spawn(source, &DispatcherConfig::default())?;
    let settings = dispatcher.settings();
    let display = dispatcher.display();
    let display_pool = dispatcher.display_pool();
    let detect_pool = dispatcher.detect_pool();

    let results: Arc<LatestSlot<PostureResult>> = Arc::new(LatestSlot::new());
    let annotated: Arc<LatestSlot<PipelineFrame>> = Arc::new(LatestSlot::new());

    let backend = OnnxBackend::new(Device::Cpu);
    let detector_ok = match YoloPoseEstimator::new(ModelSource::File(model_path), &backend) {
        Ok(estimator) => {
            tokio::spawn(detect_task(
                dispatcher.detect(),
                detect_pool.clone(),
                PostureClassifier::default(),
                estimator,
                results.clone(),
                annotated.clone(),
            ));
            true
        }
        Err(err) => {
            log::error!("pose detector unavailable: {err}");
            settings.set_detection_enabled(false);
            false
        }
    };

    let mut window = Window::new(TITLE, width, height, WindowOptions::default())?;
    window.set_target_fps(30);
    let mut surface = WindowSurface::new(window, width, height, TITLE);

    let initial = if detector_ok {
        StatusLine::for_state(PostureState::Unknown)
    } else {
        StatusLine::detector_unavailable()
    };
    surface.update_status(&initial)?;

    let mut hold = HoldController::new(SystemClock::new(), vec![height, width, 3])?;

    while surface.window().is_open() && !surface.window().is_key_down(Key::Escape) {
        if detector_ok && surface.window().is_key_pressed(Key::D, KeyRepeat::No) {
            let enabled = !settings.detection_enabled();
            settings.set_detection_enabled(enabled);
            log::info!("detection {}", if enabled { "on" } else { "off" });
        }
        if surface.window().is_key_pressed(Key::LeftBracket, KeyRepeat::No) {
            settings.set_detect_stride(settings.detect_stride().saturating_sub(1));
            log::info!("detect stride: {}", settings.detect_stride());
        }
        if surface.window().is_key_pressed(Key::RightBracket, KeyRepeat::No) {
            settings.set_detect_stride(settings.detect_stride().saturating_add(1));
            log::info!("detect stride: {}", settings.detect_stride());
        }

        if let Some(result) = results.take() {
            surface.update_status(&status_for(&result))?;
        }
        if let Some(frame) = annotated.take() {
            hold.on_detection(&frame.image);
            detect_pool.put(frame.image);
        }

        let live = tokio::time::timeout(FRAME_WAIT, display.recv()).await.ok();

        if let Some(snapshot) = hold.frozen_frame() {
            surface.update_image(&ImageDescriptor::new(
                resolution.width,
                resolution.height,
                PixelFormat::Rgb888,
                &snapshot.data,
            ))?;
            if let Some(frame) = live {
                display_pool.put(frame.image);
            }
        } else if let Some(frame) = live {
            surface.update_image(&ImageDescriptor::new(
                resolution.width,
                resolution.height,
                PixelFormat::Rgb888,
                &frame.image.data,
            ))?;
            display_pool.put(frame.image);
        } else {
            surface.pump();
        }
    }

    log::info!("shutting down");
    if let Err(err) = dispatcher.stop() {
        log::error!("capture pipeline failed: {err}");
    }
    Ok(())
}
