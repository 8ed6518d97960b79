use std::io;

use perch_camera::CameraError;

#[test]
fn test_from_io_error() {
    let io_err = io::Error::new(io::ErrorKind::NotFound, "device not found");
    let cam_err: CameraError = io_err.into();

    match cam_err {
        CameraError::Device(msg) => assert!(msg.contains("device not found")),
        _ => panic!("Expected CameraError::Device variant"),
    }
}

#[test]
fn test_error_display() {
    let device_err = CameraError::Device("V4L2 error".to_string());
    assert!(device_err.to_string().contains("V4L2 error"));

    let format_err = CameraError::FormatUnsupported("RGBP".to_string());
    assert!(format_err.to_string().contains("RGBP"));

    assert!(CameraError::NotStreaming.to_string().contains("not started"));
    assert!(CameraError::AlreadyStreaming.to_string().contains("already"));
    assert!(CameraError::AcquireTimeout.to_string().contains("timed out"));

    let acquire_err = CameraError::AcquireFailed("ring empty".to_string());
    assert!(acquire_err.to_string().contains("ring empty"));
}
