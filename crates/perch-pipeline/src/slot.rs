use std::sync::Mutex;

use tokio::sync::Notify;

/// Single-slot overwrite register.
///
/// The producer always succeeds: publishing displaces whatever unread value
/// is in the slot and hands it back for recycling. A slow consumer therefore
/// skips intermediates and only ever observes the newest value.
#[derive(Debug)]
pub struct LatestSlot<T> {
    value: Mutex<Option<T>>,
    notify: Notify,
}

impl<T> LatestSlot<T> {
    pub fn new() -> Self {
        Self {
            value: Mutex::new(None),
            notify: Notify::new(),
        }
    }

    /// Store the newest value, returning the displaced unread one.
    pub fn publish(&self, value: T) -> Option<T> {
        let displaced = self.lock().replace(value);
        self.notify.notify_one();
        displaced
    }

    /// Remove the newest unread value.
    pub fn take(&self) -> Option<T> {
        self.lock().take()
    }

    /// Wait for a value. Intermediate publishes before this call resolve to
    /// the newest one only.
    pub async fn recv(&self) -> T {
        loop {
            if let Some(value) = self.take() {
                return value;
            }
            self.notify.notified().await;
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<T>> {
        self.value
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<T> Default for LatestSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}
