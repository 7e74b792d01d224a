// src/events.rs

//! The device event procedure table.
//!
//! The device delivers invalidate, vsync and hotplug notifications by
//! invoking these callbacks from a context it owns (interrupt-like or a
//! vendor worker thread), never from the compositor thread. The bridge's
//! only job is atomic registration of the whole table; marshaling each
//! callback onto the compositor thread is the registrant's responsibility
//! (typically by sending over a channel, as a vsync source would).

use crate::device::DisplaySlot;

/// Callback invoked when the device wants the scene re-submitted.
pub type InvalidateFn = Box<dyn Fn() + Send + Sync>;

/// Callback invoked on every hardware vsync. Arguments: originating display
/// slot and the vsync timestamp in nanoseconds.
pub type VsyncFn = Box<dyn Fn(DisplaySlot, i64) + Send + Sync>;

/// Callback invoked when a display is connected (`true`) or disconnected
/// (`false`).
pub type HotplugFn = Box<dyn Fn(DisplaySlot, bool) + Send + Sync>;

/// The three-function procedure table, installed as a unit.
///
/// Partial registration is not supported: the device's own contract is a
/// single table pointer, so all three callbacks are installed atomically or
/// not at all.
pub struct EventCallbacks {
    pub invalidate: InvalidateFn,
    pub vsync: VsyncFn,
    pub hotplug: HotplugFn,
}

impl EventCallbacks {
    pub fn new(invalidate: InvalidateFn, vsync: VsyncFn, hotplug: HotplugFn) -> Self {
        Self {
            invalidate,
            vsync,
            hotplug,
        }
    }
}

impl std::fmt::Debug for EventCallbacks {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventCallbacks").finish_non_exhaustive()
    }
}
