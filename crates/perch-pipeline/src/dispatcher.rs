use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread::{self, JoinHandle};

use log::{debug, error, warn};
use perch_base::Tensor;
use perch_camera::convert::to_rgb888;
use perch_camera::{CameraError, CaptureDevice, Frame, FrameSource};

use crate::error::PipelineError;
use crate::pool::FramePool;
use crate::queue::DropQueue;
use crate::settings::PipelineSettings;
use crate::slot::LatestSlot;
use crate::stats::DispatchStats;

const STATS_LOG_INTERVAL: u64 = 300;

/// One RGB888 frame flowing between pipeline stages. The tensor comes from a
/// [`FramePool`] and must go back to it when the consumer is done.
#[derive(Debug)]
pub struct PipelineFrame {
    pub sequence: u64,
    /// HWC tensor, shape `[height, width, 3]`.
    pub image: Tensor<u8>,
}

/// Sizing and sampling configuration for the dispatcher.
#[derive(Clone, Copy, Debug)]
pub struct DispatcherConfig {
    display_pool_size: usize,
    detect_pool_size: usize,
    detect_queue_capacity: usize,
    detect_stride: u32,
    detection_enabled: bool,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            display_pool_size: 3,
            detect_pool_size: 4,
            detect_queue_capacity: 1,
            detect_stride: 5,
            detection_enabled: true,
        }
    }
}

impl DispatcherConfig {
    /// Set the display scratch-tensor count (clamped to at least 2: one in
    /// the slot, one being converted).
    pub fn with_display_pool_size(mut self, size: usize) -> Self {
        self.display_pool_size = size.max(2);
        self
    }

    /// Set the detection scratch-tensor count (clamped to at least 2).
    pub fn with_detect_pool_size(mut self, size: usize) -> Self {
        self.detect_pool_size = size.max(2);
        self
    }

    /// Set the detect queue capacity (clamped to at least 1).
    pub fn with_detect_queue_capacity(mut self, capacity: usize) -> Self {
        self.detect_queue_capacity = capacity.max(1);
        self
    }

    /// Set the sampling stride: every Nth frame goes to detection (clamped
    /// to at least 1).
    pub fn with_detect_stride(mut self, stride: u32) -> Self {
        self.detect_stride = stride.max(1);
        self
    }

    pub fn with_detection_enabled(mut self, enabled: bool) -> Self {
        self.detection_enabled = enabled;
        self
    }

    pub fn display_pool_size(&self) -> usize {
        self.display_pool_size
    }

    pub fn detect_pool_size(&self) -> usize {
        self.detect_pool_size
    }

    pub fn detect_queue_capacity(&self) -> usize {
        self.detect_queue_capacity
    }

    pub fn detect_stride(&self) -> u32 {
        self.detect_stride
    }

    pub fn detection_enabled(&self) -> bool {
        self.detection_enabled
    }
}

/// Handle to the capture/dispatch thread.
///
/// The thread owns the [`FrameSource`] and fans each acquired frame out to
/// the display slot (always) and the detect queue (sampled). Dropping the
/// handle stops the thread and joins it.
#[derive(Debug)]
pub struct Dispatcher {
    display: Arc<LatestSlot<PipelineFrame>>,
    detect: Arc<DropQueue<PipelineFrame>>,
    display_pool: Arc<FramePool>,
    detect_pool: Arc<FramePool>,
    settings: Arc<PipelineSettings>,
    stats: Arc<DispatchStats>,
    stop: Arc<AtomicBool>,
    handle: Option<JoinHandle<Result<(), PipelineError>>>,
}

impl Dispatcher {
    /// Spawn the dispatch thread over an already-streaming source.
    ///
    /// Scratch pools are sized here for the negotiated resolution; nothing
    /// is allocated per frame afterward.
    ///
    /// # Errors
    ///
    /// `Camera(NotStreaming)` when the source was not initialized;
    /// `Resource` when a pool tensor cannot be sized.
    pub fn spawn<D>(source: FrameSource<D>, config: &DispatcherConfig) -> Result<Self, PipelineError>
    where
        D: CaptureDevice + Send + 'static,
    {
        let resolution = source.resolution().ok_or(CameraError::NotStreaming)?;
        let shape = vec![resolution.height as usize, resolution.width as usize, 3];

        let worker = Worker {
            display: Arc::new(LatestSlot::new()),
            detect: Arc::new(DropQueue::with_capacity(config.detect_queue_capacity)),
            display_pool: Arc::new(FramePool::new(config.display_pool_size, shape.clone())?),
            detect_pool: Arc::new(FramePool::new(config.detect_pool_size, shape)?),
            settings: Arc::new(PipelineSettings::new(
                config.detection_enabled,
                config.detect_stride,
            )),
            stats: Arc::new(DispatchStats::new()),
            stop: Arc::new(AtomicBool::new(false)),
        };

        let display = worker.display.clone();
        let detect = worker.detect.clone();
        let display_pool = worker.display_pool.clone();
        let detect_pool = worker.detect_pool.clone();
        let settings = worker.settings.clone();
        let stats = worker.stats.clone();
        let stop = worker.stop.clone();

        let handle = thread::spawn(move || {
            let mut source = source;
            let result = worker.run(&mut source);
            if let Err(err) = &result {
                error!("dispatch loop stopped: {err}");
            }
            result
        });

        Ok(Self {
            display,
            detect,
            display_pool,
            detect_pool,
            settings,
            stats,
            stop,
            handle: Some(handle),
        })
    }

    /// Slot holding the newest displayable frame.
    pub fn display(&self) -> Arc<LatestSlot<PipelineFrame>> {
        self.display.clone()
    }

    /// Queue feeding the detection task.
    pub fn detect(&self) -> Arc<DropQueue<PipelineFrame>> {
        self.detect.clone()
    }

    pub fn display_pool(&self) -> Arc<FramePool> {
        self.display_pool.clone()
    }

    pub fn detect_pool(&self) -> Arc<FramePool> {
        self.detect_pool.clone()
    }

    pub fn settings(&self) -> Arc<PipelineSettings> {
        self.settings.clone()
    }

    pub fn stats(&self) -> Arc<DispatchStats> {
        self.stats.clone()
    }

    /// Whether the dispatch thread has exited, requested or on error.
    pub fn is_finished(&self) -> bool {
        self.handle
            .as_ref()
            .map(JoinHandle::is_finished)
            .unwrap_or(true)
    }

    /// Stop the dispatch thread and return its exit result.
    ///
    /// `Ok` after a requested stop; the capture error when the loop died on
    /// its own. Subsequent calls return `Ok`.
    pub fn stop(&mut self) -> Result<(), PipelineError> {
        self.stop.store(true, Ordering::Relaxed);
        let Some(handle) = self.handle.take() else {
            return Ok(());
        };
        match handle.join() {
            Ok(result) => result,
            Err(_) => Err(PipelineError::CaptureThread(
                "dispatch thread panicked".to_string(),
            )),
        }
    }
}

impl Drop for Dispatcher {
    fn drop(&mut self) {
        if let Err(err) = self.stop() {
            warn!("dispatcher stopped with error: {err}");
        }
    }
}

struct Worker {
    display: Arc<LatestSlot<PipelineFrame>>,
    detect: Arc<DropQueue<PipelineFrame>>,
    display_pool: Arc<FramePool>,
    detect_pool: Arc<FramePool>,
    settings: Arc<PipelineSettings>,
    stats: Arc<DispatchStats>,
    stop: Arc<AtomicBool>,
}

impl Worker {
    fn run<D: CaptureDevice>(&self, source: &mut FrameSource<D>) -> Result<(), PipelineError> {
        while !self.stop.load(Ordering::Relaxed) {
            let frame = match source.acquire_frame() {
                Ok(frame) => frame,
                Err(err) => {
                    if self.stop.load(Ordering::Relaxed) {
                        break;
                    }
                    return Err(err.into());
                }
            };
            self.stats.record_captured();

            self.dispatch_display(source, &frame);
            if self.settings.should_detect(frame.sequence()) {
                self.dispatch_detect(source, &frame);
            }

            source.release_frame(frame)?;

            let captured = self.stats.frames_captured();
            if captured % STATS_LOG_INTERVAL == 0 {
                debug!(
                    "dispatched {captured} frames: display {}/{} skipped, detect {}/{} dropped, {} conversion failures",
                    self.stats.display_published(),
                    self.stats.display_skipped(),
                    self.stats.detect_enqueued(),
                    self.stats.detect_dropped(),
                    self.stats.conversion_failures(),
                );
            }
        }
        Ok(())
    }

    fn dispatch_display<D: CaptureDevice>(&self, source: &FrameSource<D>, frame: &Frame) {
        let Some(mut tensor) = self.display_pool.get() else {
            self.stats.record_display_skipped();
            return;
        };
        if !convert_frame(source, frame, &mut tensor) {
            warn!("frame {} not convertible for display", frame.sequence());
            self.stats.record_conversion_failure();
            self.stats.record_display_skipped();
            self.display_pool.put(tensor);
            return;
        }
        if let Some(displaced) = self.display.publish(PipelineFrame {
            sequence: frame.sequence(),
            image: tensor,
        }) {
            self.display_pool.put(displaced.image);
        }
        self.stats.record_display_published();
    }

    fn dispatch_detect<D: CaptureDevice>(&self, source: &FrameSource<D>, frame: &Frame) {
        let Some(mut tensor) = self.detect_pool.get() else {
            self.stats.record_detect_dropped();
            return;
        };
        if !convert_frame(source, frame, &mut tensor) {
            warn!("frame {} not convertible for detection", frame.sequence());
            self.stats.record_conversion_failure();
            self.stats.record_detect_dropped();
            self.detect_pool.put(tensor);
            return;
        }
        match self.detect.try_push(PipelineFrame {
            sequence: frame.sequence(),
            image: tensor,
        }) {
            Ok(()) => self.stats.record_detect_enqueued(),
            Err(rejected) => {
                self.detect_pool.put(rejected.image);
                self.stats.record_detect_dropped();
            }
        }
    }
}

fn convert_frame<D: CaptureDevice>(
    source: &FrameSource<D>,
    frame: &Frame,
    tensor: &mut Tensor<u8>,
) -> bool {
    to_rgb888(
        frame.format(),
        source.data(frame),
        frame.width(),
        frame.height(),
        &mut tensor.data,
    )
}
