use std::thread;

use log::{debug, warn};

use crate::config::RetryPolicy;
use crate::error::CameraError;
use crate::format::{FormatRequest, PixelFormat, Resolution, StreamConfig};

/// One filled buffer handed back by a capture device.
#[derive(Clone, Copy, Debug)]
pub struct DequeuedSlot {
    pub index: usize,
    pub bytes_used: usize,
}

/// Low-level capture backend exchanging a fixed ring of buffers with the
/// driver.
///
/// All calls happen on the capture thread; implementations do not need to
/// be thread-safe.
pub trait CaptureDevice {
    /// Negotiate the format and map `request.buffer_count` buffers, then
    /// start streaming.
    fn start(&mut self, request: &FormatRequest) -> Result<StreamConfig, CameraError>;

    /// Block until the driver hands back a filled buffer. Bounded by the
    /// backend's own timeout.
    fn dequeue(&mut self) -> Result<DequeuedSlot, CameraError>;

    /// Bytes of one buffer slot.
    fn slot_data(&self, index: usize) -> &[u8];

    /// Return a slot to the driver for refilling.
    fn requeue(&mut self, index: usize) -> Result<(), CameraError>;

    /// Stop streaming and release the buffer mappings.
    fn stop(&mut self) -> Result<(), CameraError>;
}

/// Exclusive-ownership token for one filled capture buffer.
///
/// The token is move-only: reading the bytes requires presenting it to the
/// `FrameSource` it came from, and releasing consumes it, so a released
/// frame can be neither read nor released again.
#[derive(Debug)]
pub struct Frame {
    slot: usize,
    width: u32,
    height: u32,
    format: PixelFormat,
    byte_len: usize,
    sequence: u64,
}

impl Frame {
    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Bytes the driver filled for this frame.
    pub fn byte_len(&self) -> usize {
        self.byte_len
    }

    /// Capture sequence number, monotonically increasing from 1.
    pub fn sequence(&self) -> u64 {
        self.sequence
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum SlotState {
    Driver,
    Held,
}

/// Owns the exchange of a fixed ring of frame buffers with a capture
/// device.
///
/// At any time each buffer slot is held by exactly one party: the driver
/// (queued for filling) or the application (an outstanding [`Frame`]).
/// With the default ring of 2 buffers, a consumer holding one frame leaves
/// exactly one buffer for the driver, so anything needed past the
/// acquire/release window must be copied out first.
pub struct FrameSource<D: CaptureDevice> {
    device: D,
    retry: RetryPolicy,
    stream: Option<StreamConfig>,
    slots: Vec<SlotState>,
    next_sequence: u64,
}

impl<D: CaptureDevice> std::fmt::Debug for FrameSource<D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FrameSource")
            .field("retry", &self.retry)
            .field("stream", &self.stream)
            .field("slots", &self.slots)
            .field("next_sequence", &self.next_sequence)
            .finish()
    }
}

impl<D: CaptureDevice> FrameSource<D> {
    pub fn new(device: D) -> Self {
        Self {
            device,
            retry: RetryPolicy::default(),
            stream: None,
            slots: Vec::new(),
            next_sequence: 1,
        }
    }

    /// Set the acquire retry policy.
    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Negotiate the format and start streaming.
    ///
    /// # Errors
    ///
    /// `AlreadyStreaming` if called twice without `deinit`;
    /// `FormatUnsupported` if the device cannot natively produce the
    /// requested pixel format; `Device` for driver failures.
    pub fn init(&mut self, request: &FormatRequest) -> Result<Resolution, CameraError> {
        if self.stream.is_some() {
            return Err(CameraError::AlreadyStreaming);
        }

        let stream = self.device.start(request)?;
        self.slots = vec![SlotState::Driver; stream.buffer_count];
        self.stream = Some(stream);
        self.next_sequence = 1;

        Ok(stream.resolution)
    }

    /// Block until the next filled frame is available.
    ///
    /// Transient dequeue failures are retried per the [`RetryPolicy`];
    /// exhausting the attempts surfaces `AcquireTimeout` or
    /// `AcquireFailed`, at which point capture should be considered dead.
    pub fn acquire_frame(&mut self) -> Result<Frame, CameraError> {
        let stream = self.stream.ok_or(CameraError::NotStreaming)?;

        let mut attempt = 0;
        loop {
            match self.device.dequeue() {
                Ok(slot) => return self.claim_slot(&stream, slot),
                Err(err) => {
                    attempt += 1;
                    if attempt >= self.retry.attempts() {
                        return Err(match err {
                            CameraError::AcquireTimeout => CameraError::AcquireTimeout,
                            other => CameraError::AcquireFailed(other.to_string()),
                        });
                    }
                    debug!("frame dequeue attempt {attempt} failed, retrying: {err}");
                    thread::sleep(self.retry.backoff());
                }
            }
        }
    }

    fn claim_slot(&mut self, stream: &StreamConfig, slot: DequeuedSlot) -> Result<Frame, CameraError> {
        let state = self.slots.get_mut(slot.index).ok_or_else(|| {
            CameraError::AcquireFailed(format!("driver returned unknown buffer index {}", slot.index))
        })?;
        if *state == SlotState::Held {
            return Err(CameraError::AcquireFailed(format!(
                "driver returned buffer index {} still held by the application",
                slot.index
            )));
        }
        *state = SlotState::Held;

        let sequence = self.next_sequence;
        self.next_sequence += 1;

        Ok(Frame {
            slot: slot.index,
            width: stream.resolution.width,
            height: stream.resolution.height,
            format: stream.format,
            byte_len: slot.bytes_used,
            sequence,
        })
    }

    /// The filled bytes of an acquired frame.
    pub fn data(&self, frame: &Frame) -> &[u8] {
        let data = self.device.slot_data(frame.slot);
        let len = frame.byte_len.min(data.len());
        &data[..len]
    }

    /// Consume the token and hand the buffer slot back to the driver.
    ///
    /// The driver may begin overwriting the buffer immediately afterward.
    pub fn release_frame(&mut self, frame: Frame) -> Result<(), CameraError> {
        if self.stream.is_none() {
            return Err(CameraError::NotStreaming);
        }

        self.device.requeue(frame.slot)?;
        if let Some(state) = self.slots.get_mut(frame.slot) {
            *state = SlotState::Driver;
        }
        Ok(())
    }

    /// Negotiated resolution, if streaming.
    pub fn resolution(&self) -> Option<Resolution> {
        self.stream.map(|s| s.resolution)
    }

    /// Negotiated pixel format, if streaming.
    pub fn format(&self) -> Option<PixelFormat> {
        self.stream.map(|s| s.format)
    }

    /// Stop streaming and release the ring. Idempotent; also runs on drop.
    pub fn deinit(&mut self) {
        if self.stream.take().is_some() {
            if let Err(err) = self.device.stop() {
                warn!("capture stop failed: {err}");
            }
            self.slots.clear();
        }
    }
}

impl<D: CaptureDevice> Drop for FrameSource<D> {
    fn drop(&mut self) {
        self.deinit();
    }
}
