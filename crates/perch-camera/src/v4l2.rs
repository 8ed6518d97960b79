use std::mem;
use std::sync::Arc;
use std::time::Duration;

use log::warn;
use v4l::buffer::Type;
use v4l::device::Handle;
use v4l::memory::Memory;
use v4l::v4l_sys::{v4l2_buffer, v4l2_buffer__bindgen_ty_1, v4l2_requestbuffers};
use v4l::video::Capture;
use v4l::{Device, Format, FourCC, v4l2};

use crate::error::CameraError;
use crate::format::{FormatRequest, Resolution, StreamConfig};
use crate::source::{CaptureDevice, DequeuedSlot};

/// V4L2 capture backend.
///
/// The exchange ring uses user-pointer buffers owned by this struct, so
/// `slot_data` hands out plain borrows of application memory; the driver
/// fills them in place via VIDIOC_QBUF/VIDIOC_DQBUF.
pub struct V4l2Device {
    device: Device,
    handle: Arc<Handle>,
    buffers: Vec<Vec<u8>>,
    timeout_ms: i32,
    streaming: bool,
}

impl std::fmt::Debug for V4l2Device {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("V4l2Device")
            .field("device", &"<v4l::Device>")
            .field("buffers", &self.buffers.len())
            .field("timeout_ms", &self.timeout_ms)
            .field("streaming", &self.streaming)
            .finish()
    }
}

impl V4l2Device {
    /// Open the device at `path` (e.g., "/dev/video0").
    ///
    /// # Errors
    ///
    /// Returns `CameraError::Device` if the node cannot be opened.
    pub fn open(path: &str) -> Result<Self, CameraError> {
        let device = Device::with_path(path)?;
        let handle = device.handle();

        Ok(Self {
            device,
            handle,
            buffers: Vec::new(),
            timeout_ms: 1000,
            streaming: false,
        })
    }

    /// Set the dequeue poll timeout (default 1 second).
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = timeout.as_millis().min(i32::MAX as u128) as i32;
        self
    }

    fn buffer_desc(&self) -> v4l2_buffer {
        v4l2_buffer {
            type_: Type::VideoCapture as u32,
            memory: Memory::UserPtr as u32,
            ..unsafe { mem::zeroed() }
        }
    }

    fn requestbuffers_desc(&self) -> v4l2_requestbuffers {
        v4l2_requestbuffers {
            type_: Type::VideoCapture as u32,
            memory: Memory::UserPtr as u32,
            ..unsafe { mem::zeroed() }
        }
    }

    fn queue_slot(&mut self, index: usize) -> Result<(), CameraError> {
        let desc = self.buffer_desc();
        let buffer = self
            .buffers
            .get(index)
            .ok_or_else(|| CameraError::Device(format!("queue of unknown buffer index {index}")))?;

        let mut v4l2_buf = v4l2_buffer {
            index: index as u32,
            m: v4l2_buffer__bindgen_ty_1 {
                userptr: buffer.as_ptr() as std::os::raw::c_ulong,
            },
            length: buffer.len() as u32,
            ..desc
        };
        unsafe {
            v4l2::ioctl(
                self.handle.fd(),
                v4l2::vidioc::VIDIOC_QBUF,
                &mut v4l2_buf as *mut _ as *mut std::os::raw::c_void,
            )?;
        }
        Ok(())
    }
}

impl CaptureDevice for V4l2Device {
    fn start(&mut self, request: &FormatRequest) -> Result<StreamConfig, CameraError> {
        if self.streaming {
            return Err(CameraError::AlreadyStreaming);
        }

        // Negotiate the format and verify the device accepted our fourcc
        // (it silently substitutes one it supports otherwise)
        let fourcc = FourCC::new(&request.format.fourcc());
        let mut format = Format::new(request.width, request.height, fourcc);
        format = Capture::set_format(&self.device, &format)?;
        if format.fourcc != fourcc {
            return Err(CameraError::FormatUnsupported(format!(
                "device produces {} instead of {}",
                format.fourcc, fourcc
            )));
        }

        let params = v4l::video::capture::Parameters::with_fps(request.fps);
        v4l::video::Capture::set_params(&self.device, &params)?;

        let mut reqbufs = v4l2_requestbuffers {
            count: request.buffer_count,
            ..self.requestbuffers_desc()
        };
        unsafe {
            v4l2::ioctl(
                self.handle.fd(),
                v4l2::vidioc::VIDIOC_REQBUFS,
                &mut reqbufs as *mut _ as *mut std::os::raw::c_void,
            )?;
        }
        if reqbufs.count == 0 {
            return Err(CameraError::Device("driver granted no buffers".to_string()));
        }

        let frame_len = format.size as usize;
        self.buffers = (0..reqbufs.count).map(|_| vec![0u8; frame_len]).collect();
        for index in 0..self.buffers.len() {
            self.queue_slot(index)?;
        }

        unsafe {
            let mut type_ = Type::VideoCapture as u32;
            v4l2::ioctl(
                self.handle.fd(),
                v4l2::vidioc::VIDIOC_STREAMON,
                &mut type_ as *mut _ as *mut std::os::raw::c_void,
            )?;
        }
        self.streaming = true;

        Ok(StreamConfig {
            resolution: Resolution {
                width: format.width,
                height: format.height,
            },
            format: request.format,
            frame_len,
            buffer_count: self.buffers.len(),
        })
    }

    fn dequeue(&mut self) -> Result<DequeuedSlot, CameraError> {
        if !self.streaming {
            return Err(CameraError::NotStreaming);
        }

        if self.handle.poll(libc::POLLIN, self.timeout_ms)? == 0 {
            return Err(CameraError::AcquireTimeout);
        }

        let mut v4l2_buf = self.buffer_desc();
        unsafe {
            v4l2::ioctl(
                self.handle.fd(),
                v4l2::vidioc::VIDIOC_DQBUF,
                &mut v4l2_buf as *mut _ as *mut std::os::raw::c_void,
            )?;
        }

        Ok(DequeuedSlot {
            index: v4l2_buf.index as usize,
            bytes_used: v4l2_buf.bytesused as usize,
        })
    }

    fn slot_data(&self, index: usize) -> &[u8] {
        self.buffers.get(index).map(Vec::as_slice).unwrap_or(&[])
    }

    fn requeue(&mut self, index: usize) -> Result<(), CameraError> {
        self.queue_slot(index)
    }

    fn stop(&mut self) -> Result<(), CameraError> {
        if !self.streaming {
            return Ok(());
        }
        self.streaming = false;

        let mut type_ = Type::VideoCapture as u32;
        let off = unsafe {
            v4l2::ioctl(
                self.handle.fd(),
                v4l2::vidioc::VIDIOC_STREAMOFF,
                &mut type_ as *mut _ as *mut std::os::raw::c_void,
            )
        };
        match off {
            Ok(()) => {}
            // ENODEV: the device was unplugged, nothing left to stop
            Err(err) if err.raw_os_error() == Some(19) => {
                self.buffers.clear();
                return Ok(());
            }
            Err(err) => return Err(err.into()),
        }

        // Release the driver's references to our buffers
        let mut reqbufs = v4l2_requestbuffers {
            count: 0,
            ..self.requestbuffers_desc()
        };
        unsafe {
            v4l2::ioctl(
                self.handle.fd(),
                v4l2::vidioc::VIDIOC_REQBUFS,
                &mut reqbufs as *mut _ as *mut std::os::raw::c_void,
            )?;
        }
        self.buffers.clear();

        Ok(())
    }
}

impl Drop for V4l2Device {
    fn drop(&mut self) {
        if let Err(err) = self.stop() {
            warn!("v4l2 stream stop failed: {err}");
        }
    }
}
