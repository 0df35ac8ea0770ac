//! Cooperative cancellation shared between a race and its controller.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A cloneable cancellation flag.
///
/// The race loop checks the flag once per tick; a set flag moves the race
/// to `Aborted`. Clones share one flag, so a token handed to another thread
/// can stop a race running elsewhere.
#[derive(Clone, Debug, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Acquire)
    }

    /// Request cancellation.
    pub fn request_cancel(&self) {
        self.flag.store(true, Ordering::Release);
    }

    /// Clear the flag so the token can be reused.
    pub fn clear_cancel(&self) {
        self.flag.store(false, Ordering::Release);
    }
}
