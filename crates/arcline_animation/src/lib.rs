//! Arcline Animation
//!
//! Drives the progressive reveal of a curve.
//!
//! - **RepeatingClock**: linear 0..1 progress over a configurable period,
//!   wrapping back to 0
//! - **Ticker**: advances the clock from the host's frame loop, fires tick
//!   callbacks and raises the repaint signal

pub mod clock;
pub mod ticker;

pub use clock::{RepeatingClock, DEFAULT_PERIOD, MIN_PERIOD};
pub use ticker::{TickCallback, TickCallbackId, Ticker};
