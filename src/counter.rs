//! Rotation counters shared between an interrupt handler and the control loop.

use core::sync::atomic::{AtomicU32, Ordering};

/// Counts pulses from an interrupt and hands them to the control loop.
///
/// Meant to live in a `static`. The count saturates instead of wrapping.
#[derive(Debug, Default)]
pub struct RotationCounter {
    pulses: AtomicU32,
}

impl RotationCounter {
    pub const fn new() -> Self {
        Self {
            pulses: AtomicU32::new(0),
        }
    }

    /// Called from the interrupt handler on every pulse.
    #[inline]
    pub fn record(&self) {
        let _ = self
            .pulses
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_add(1));
    }

    /// Returns the pulses since the previous call and restarts counting.
    pub fn take(&self) -> u32 {
        self.pulses.swap(0, Ordering::Relaxed)
    }

    pub fn peek(&self) -> u32 {
        self.pulses.load(Ordering::Relaxed)
    }
}
