//! Frame dispatch for the perch pipeline.
//!
//! A capture thread fans frames out to per-consumer containers with
//! distinct overflow policies: the display path keeps only the newest frame
//! ([`LatestSlot`]), the detection path samples every Nth frame into a
//! bounded drop-new queue ([`DropQueue`]). Scratch buffers come from fixed
//! [`FramePool`]s, so steady-state dispatch allocates nothing.

pub mod dispatcher;
pub mod error;
pub mod hold;
pub mod pool;
pub mod queue;
pub mod settings;
pub mod slot;
pub mod stats;

pub use dispatcher::{Dispatcher, DispatcherConfig, PipelineFrame};
pub use error::PipelineError;
pub use hold::HoldController;
pub use pool::FramePool;
pub use queue::DropQueue;
pub use settings::PipelineSettings;
pub use slot::LatestSlot;
pub use stats::DispatchStats;
