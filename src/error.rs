// src/error.rs

//! The bridge error taxonomy.
//!
//! Nothing here is fatal: every variant is a same-cycle fallback decision
//! for the caller. `DeviceUnavailable` means "software-composite for the
//! lifetime of this bridge", `UnsupportedCapability` means "adapt",
//! `DeviceCallFailed` means "drop this frame and retry next vsync".

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum HwcError {
    /// No compositor device was opened; permanent for this bridge instance.
    /// The caller must fall back to software compositing.
    #[error("no compositor device available")]
    DeviceUnavailable,

    /// The feature is absent on this device/version. Non-fatal; the caller
    /// adapts (e.g. runs a software-timed vsync source).
    #[error("capability not supported on this device revision")]
    UnsupportedCapability,

    /// The vendor call returned a non-success status. The frame is dropped;
    /// any acquire fences the caller still owns for it are unconsumed and
    /// must be closed by the caller.
    #[error("device call failed with status {0}")]
    DeviceCallFailed(i32),

    /// A supplied rectangle was degenerate or negative; rejected before any
    /// device call.
    #[error("invalid rectangle")]
    InvalidRect,

    /// Event callbacks may be installed exactly once per bridge.
    #[error("event callbacks already registered")]
    CallbacksAlreadyRegistered,
}
