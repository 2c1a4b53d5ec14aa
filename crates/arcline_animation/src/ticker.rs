//! Progress ticker
//!
//! Owns a `RepeatingClock`, calls registered tick callbacks with the new
//! progress each frame and raises the repaint signal. The host calls
//! `tick(dt)` from its frame loop; there is no background thread.

use std::time::Duration;

use arcline_core::RepaintSignal;
use slotmap::{new_key_type, SlotMap};

use crate::clock::RepeatingClock;

new_key_type! {
    /// Handle to a registered tick callback
    pub struct TickCallbackId;
}

/// Called with the clock's progress after every tick
pub type TickCallback = Box<dyn FnMut(f32) + Send>;

pub struct Ticker {
    clock: RepeatingClock,
    callbacks: SlotMap<TickCallbackId, TickCallback>,
    signal: RepaintSignal,
    playing: bool,
}

impl Ticker {
    /// A playing ticker driven by `clock`
    pub fn new(clock: RepeatingClock) -> Self {
        Self {
            clock,
            callbacks: SlotMap::with_key(),
            signal: RepaintSignal::new(),
            playing: true,
        }
    }

    /// Share an existing repaint signal instead of the ticker's own
    pub fn with_repaint_signal(mut self, signal: RepaintSignal) -> Self {
        self.signal = signal;
        self
    }

    pub fn repaint_signal(&self) -> &RepaintSignal {
        &self.signal
    }

    /// Register a callback fired on every tick
    pub fn on_tick<F>(&mut self, callback: F) -> TickCallbackId
    where
        F: FnMut(f32) + Send + 'static,
    {
        self.callbacks.insert(Box::new(callback))
    }

    /// Remove a tick callback, returning whether it was registered
    pub fn remove_tick_callback(&mut self, id: TickCallbackId) -> bool {
        self.callbacks.remove(id).is_some()
    }

    pub fn callback_count(&self) -> usize {
        self.callbacks.len()
    }

    /// Advance the clock by `dt`
    ///
    /// Returns the new progress, or `None` while stopped (nothing fires and
    /// no repaint is requested).
    pub fn tick(&mut self, dt: Duration) -> Option<f32> {
        if !self.playing {
            return None;
        }

        let progress = self.clock.advance(dt);
        for (_, callback) in self.callbacks.iter_mut() {
            callback(progress);
        }
        self.signal.request_repaint();
        Some(progress)
    }

    pub fn start(&mut self) {
        tracing::debug!("Ticker: start");
        self.playing = true;
    }

    /// Stop ticking; progress is kept where it is
    pub fn stop(&mut self) {
        tracing::debug!("Ticker: stop");
        self.playing = false;
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    pub fn progress(&self) -> f32 {
        self.clock.progress()
    }

    pub fn clock(&self) -> &RepeatingClock {
        &self.clock
    }

    pub fn clock_mut(&mut self) -> &mut RepeatingClock {
        &mut self.clock
    }
}

impl Default for Ticker {
    fn default() -> Self {
        Self::new(RepeatingClock::default())
    }
}

impl std::fmt::Debug for Ticker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ticker")
            .field("clock", &self.clock)
            .field("callbacks", &self.callbacks.len())
            .field("playing", &self.playing)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[test]
    fn test_tick_fires_callbacks_and_signal() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();

        let mut ticker = Ticker::new(RepeatingClock::from_millis(100));
        ticker.on_tick(move |p| sink.lock().unwrap().push(p));

        let progress = ticker.tick(Duration::from_millis(50)).unwrap();
        assert!((progress - 0.5).abs() < 1e-6);
        assert!(ticker.repaint_signal().take_needs_repaint());

        ticker.tick(Duration::from_millis(60));
        let seen = seen.lock().unwrap();
        assert_eq!(seen.len(), 2);
        assert!((seen[1] - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_stopped_ticker_is_quiet() {
        let wakes = Arc::new(AtomicUsize::new(0));
        let counter = wakes.clone();
        let signal = RepaintSignal::new().with_wake_callback(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let mut ticker = Ticker::default().with_repaint_signal(signal.clone());
        ticker.stop();
        assert_eq!(ticker.tick(Duration::from_millis(10)), None);
        assert!(!signal.needs_repaint());

        ticker.start();
        assert!(ticker.tick(Duration::from_millis(10)).is_some());
        assert!(signal.take_needs_repaint());
        assert_eq!(wakes.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_remove_callback() {
        let mut ticker = Ticker::default();
        let id = ticker.on_tick(|_| {});
        assert_eq!(ticker.callback_count(), 1);

        assert!(ticker.remove_tick_callback(id));
        assert!(!ticker.remove_tick_callback(id));
        assert_eq!(ticker.callback_count(), 0);
    }
}
