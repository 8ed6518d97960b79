use crate::{InferError, ModelSource, Session};

/// An inference runtime that can turn model bytes into a runnable session.
///
/// The target device is chosen at backend construction; loading fails with
/// `UnsupportedDevice` when the backend was not built with support for it.
pub trait Backend {
    fn name(&self) -> &str;
    fn load_model(&self, model: ModelSource) -> Result<Box<dyn Session>, InferError>;
}
