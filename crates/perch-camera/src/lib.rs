//! Camera capture for the perch pipeline.
//!
//! A [`FrameSource`] exchanges a fixed ring of buffers with a capture
//! device behind the [`CaptureDevice`] trait and hands frames out as
//! move-only ownership tokens, so every buffer is held by exactly one
//! party at a time.

pub mod config;
pub mod convert;
pub mod error;
pub mod format;
pub mod source;

#[cfg(feature = "v4l2")]
pub mod v4l2;

pub use config::{CameraConfig, RetryPolicy};
pub use error::CameraError;
pub use format::{FormatRequest, PixelFormat, Resolution, StreamConfig};
pub use source::{CaptureDevice, DequeuedSlot, Frame, FrameSource};

#[cfg(feature = "v4l2")]
pub use v4l2::V4l2Device;
