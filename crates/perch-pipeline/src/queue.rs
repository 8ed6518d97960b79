use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::Notify;

/// Bounded drop-new queue.
///
/// When full, `try_push` hands the value straight back to the producer and
/// counts the rejection; queued values are never evicted and the producer
/// never blocks. Capacity is fixed at construction.
#[derive(Debug)]
pub struct DropQueue<T> {
    items: Mutex<VecDeque<T>>,
    capacity: usize,
    dropped: AtomicU64,
    notify: Notify,
}

impl<T> DropQueue<T> {
    /// Create a queue holding at most `capacity` values (at least 1).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: Mutex::new(VecDeque::with_capacity(capacity)),
            capacity,
            dropped: AtomicU64::new(0),
            notify: Notify::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Enqueue a value, or return it when the queue is full.
    pub fn try_push(&self, value: T) -> Result<(), T> {
        {
            let mut items = self.lock();
            if items.len() >= self.capacity {
                drop(items);
                self.dropped.fetch_add(1, Ordering::Relaxed);
                return Err(value);
            }
            items.push_back(value);
        }
        self.notify.notify_one();
        Ok(())
    }

    pub fn try_pop(&self) -> Option<T> {
        self.lock().pop_front()
    }

    /// Wait for the next queued value.
    pub async fn recv(&self) -> T {
        loop {
            if let Some(value) = self.try_pop() {
                return value;
            }
            self.notify.notified().await;
        }
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    /// Number of values rejected because the queue was full.
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<T>> {
        self.items
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
