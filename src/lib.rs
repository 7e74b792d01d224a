// src/lib.rs

//! hwc-bridge: a composition bridge for versioned hwcomposer-style devices.
//!
//! The bridge assembles per-frame layer lists for up to three display slots,
//! submits them to a vendor compositor device as batched prepare/set calls,
//! passes GPU sync fences through in both directions, and registers the
//! device's vsync/hotplug/invalidate callbacks.
//!
//! The vendor device sits behind the [`device::ComposerDevice`] trait so the
//! whole bridge is unit-testable against a mock; version-dependent ABI
//! quirks live in one data table in [`version`].

pub mod bridge;
pub mod config;
pub mod device;
pub mod error;
pub mod events;
pub mod fence;
pub mod geometry;
pub mod layer;
pub mod version;

pub use bridge::CompositionBridge;
pub use config::BridgeConfig;
pub use device::{Capability, ComposerDevice, DeviceEvent, DisplayContents, DisplaySlot, SLOT_COUNT};
pub use error::HwcError;
pub use events::EventCallbacks;
pub use fence::Fence;
pub use geometry::{RectF, RectI};
pub use layer::{Blending, BufferHandle, CompositionType, Layer, LayerList, SourceCrop};
pub use version::{ApiVersion, VersionProfile};
