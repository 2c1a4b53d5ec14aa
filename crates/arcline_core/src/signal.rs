//! Repaint notification
//!
//! A repaint is only ever triggered by a notification: the map component
//! reports a viewport move, or the animation clock ticks. The host checks
//! `take_needs_repaint()` on its own frame loop; nothing here polls.

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Callback used to wake the host's event loop when a repaint is requested
pub type WakeCallback = Arc<dyn Fn() + Send + Sync>;

/// Shared dirty flag plus an optional wake callback
#[derive(Clone, Default)]
pub struct RepaintSignal {
    dirty: Arc<AtomicBool>,
    wake: Option<WakeCallback>,
}

impl RepaintSignal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a callback fired on every repaint request
    pub fn with_wake_callback<F>(mut self, callback: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        self.wake = Some(Arc::new(callback));
        self
    }

    /// Mark the layer dirty and wake the host
    pub fn request_repaint(&self) {
        self.dirty.store(true, Ordering::Release);
        if let Some(wake) = &self.wake {
            wake();
        }
    }

    /// Check and clear the dirty flag in one operation
    pub fn take_needs_repaint(&self) -> bool {
        self.dirty.swap(false, Ordering::Acquire)
    }

    pub fn needs_repaint(&self) -> bool {
        self.dirty.load(Ordering::Relaxed)
    }
}

impl fmt::Debug for RepaintSignal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RepaintSignal")
            .field("dirty", &self.needs_repaint())
            .field("has_wake_callback", &self.wake.is_some())
            .finish()
    }
}
