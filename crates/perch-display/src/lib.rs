//! Display-side types for the perch pipeline.
//!
//! Overlay drawing on RGB frames and posture status rendering, plus the
//! [`DisplaySurface`] trait the application implements for its window or
//! panel backend.

pub mod draw;
pub mod error;
pub mod style;
pub mod surface;

pub use error::DisplayError;
pub use style::{StatusLine, state_color};
pub use surface::{DisplaySurface, ImageDescriptor};
