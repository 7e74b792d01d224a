// src/device/mod.rs

//! Defines `ComposerDevice`, the trait boundary over the vendor compositor.
//!
//! The real vendor device is a versioned C ABI reached through a function
//! table. Modeling it as a trait keeps the bridge testable: unit tests
//! substitute `MockDevice` (see `mock`), production code wraps the vendor
//! handle. The trait surface is exactly the operations the bridge needs:
//! query, prepare, set, eventControl and registerProcs.

use crate::error::HwcError;
use crate::events::EventCallbacks;
use crate::layer::LayerList;
use crate::version::ApiVersion;

use serde::{Deserialize, Serialize};

#[cfg(test)]
pub mod mock;

/// Fixed display slots, indexed by the per-platform display-type ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(usize)]
pub enum DisplaySlot {
    Primary = 0,
    External = 1,
    Virtual = 2,
}

/// Number of display slots in every batched device call.
pub const SLOT_COUNT: usize = 3;

impl DisplaySlot {
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// The batched per-call display array. `None` is the device's null slot:
/// "nothing submitted for this display this frame".
pub type DisplayContents<'a> = [Option<&'a mut LayerList>; SLOT_COUNT];

/// Capability codes for the single-integer query boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum Capability {
    /// Device can fill a solid background layer itself.
    BackgroundLayer = 0,
    /// Device reports its vsync period.
    VsyncPeriod = 1,
    /// Device reports which display types it supports.
    DisplayTypes = 2,
}

/// Asynchronous event kinds controllable through `event_control`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceEvent {
    Vsync,
}

/// The opened vendor compositor connection.
///
/// Not safe for concurrent prepare/set from multiple threads; callers
/// serialize all operations through one compositor loop. Implementations
/// must not block unboundedly, and a returned failure must leave the device
/// in a state where the next call can proceed normally.
pub trait ComposerDevice: Send {
    /// The API version fixed when the device was opened.
    fn api_version(&self) -> ApiVersion;

    /// Single capability-code query. A failing query means "unsupported",
    /// not an error.
    fn query(&mut self, capability: Capability) -> bool;

    /// First half of the frame: the device inspects every submitted list
    /// and rewrites each layer's `composition_type` with its decision.
    fn prepare(&mut self, displays: &mut DisplayContents<'_>) -> Result<(), HwcError>;

    /// Second half of the frame: atomic hand-off of the finalized lists.
    /// The device fills in release fences and the per-list retire fence.
    fn set(&mut self, displays: &mut DisplayContents<'_>) -> Result<(), HwcError>;

    /// Enable or disable delivery of `event` for `slot`.
    fn event_control(
        &mut self,
        slot: DisplaySlot,
        event: DeviceEvent,
        enable: bool,
    ) -> Result<(), HwcError>;

    /// Installs the callback procedure table. The device treats the table
    /// as a single unit; it is never partially installed.
    fn register_procs(&mut self, procs: EventCallbacks);
}
