use std::collections::HashMap;

use perch_base::Tensor;

use crate::InferError;

/// A loaded model ready to run. Sessions move with the task that runs
/// inference.
pub trait Session: Send {
    fn run(
        &mut self,
        inputs: &[(&str, &Tensor<f32>)],
    ) -> Result<HashMap<String, Tensor<f32>>, InferError>;
    fn input_names(&self) -> &[String];
    fn output_names(&self) -> &[String];
}
