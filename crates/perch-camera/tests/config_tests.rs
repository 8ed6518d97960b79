use std::time::Duration;

use perch_camera::{CameraConfig, PixelFormat, RetryPolicy};

#[test]
fn test_default_config() {
    let config = CameraConfig::default();
    assert_eq!(config.device(), "/dev/video0");
    assert_eq!(config.width(), 640);
    assert_eq!(config.height(), 480);
    assert_eq!(config.fps(), 30);
    assert_eq!(config.format(), PixelFormat::Rgb565);
    assert_eq!(config.buffer_count(), 2);
}

#[test]
fn test_builder_chain() {
    let config = CameraConfig::default()
        .with_device("/dev/video2".to_string())
        .with_width(1280)
        .with_height(720)
        .with_fps(15)
        .with_format(PixelFormat::Yuv420)
        .with_buffer_count(4);

    assert_eq!(config.device(), "/dev/video2");
    assert_eq!(config.width(), 1280);
    assert_eq!(config.height(), 720);
    assert_eq!(config.fps(), 15);
    assert_eq!(config.format(), PixelFormat::Yuv420);
    assert_eq!(config.buffer_count(), 4);
}

#[test]
fn test_buffer_count_clamped_to_ring_minimum() {
    let config = CameraConfig::default().with_buffer_count(0);
    assert_eq!(config.buffer_count(), 2);
}

#[test]
fn test_request_mirrors_config() {
    let config = CameraConfig::default()
        .with_width(320)
        .with_height(240)
        .with_format(PixelFormat::Grey);
    let request = config.request();

    assert_eq!(request.width, 320);
    assert_eq!(request.height, 240);
    assert_eq!(request.format, PixelFormat::Grey);
    assert_eq!(request.fps, config.fps());
    assert_eq!(request.buffer_count, config.buffer_count());
}

#[test]
fn test_retry_policy_defaults() {
    let retry = RetryPolicy::default();
    assert_eq!(retry.attempts(), 3);
    assert_eq!(retry.backoff(), Duration::from_millis(10));
}

#[test]
fn test_retry_policy_attempts_clamped() {
    let retry = RetryPolicy::default().with_attempts(0);
    assert_eq!(retry.attempts(), 1);
}
