use std::sync::Mutex;

use perch_base::{Tensor, TensorError};

/// Fixed set of preallocated scratch tensors recycled between the dispatcher
/// and its consumers.
///
/// `get` fails rather than allocating when every tensor is checked out, so
/// steady-state operation allocates nothing.
#[derive(Debug)]
pub struct FramePool {
    tensors: Mutex<Vec<Tensor<u8>>>,
}

impl FramePool {
    /// Allocate `count` zeroed tensors of the given shape.
    pub fn new(count: usize, shape: Vec<usize>) -> Result<Self, TensorError> {
        let mut tensors = Vec::with_capacity(count);
        for _ in 0..count {
            tensors.push(Tensor::zeros(shape.clone())?);
        }
        Ok(Self {
            tensors: Mutex::new(tensors),
        })
    }

    /// Check out a tensor, or `None` when the pool is empty.
    pub fn get(&self) -> Option<Tensor<u8>> {
        self.lock().pop()
    }

    /// Return a tensor checked out with [`get`](Self::get).
    pub fn put(&self, tensor: Tensor<u8>) {
        self.lock().push(tensor);
    }

    /// Tensors currently checked in.
    pub fn available(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Tensor<u8>>> {
        self.tensors
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
