// src/fence.rs

//! Defines `Fence`, an opaque handle to a GPU synchronization point.
//!
//! Fences are caller-owned file descriptors that the bridge only passes
//! through to the device (acquire direction) or reads back from it
//! (release/retire direction). The bridge never waits on a fence and never
//! closes one; lifetime management stays with whoever created the fd.

use std::fmt;
use std::os::unix::io::RawFd;

/// An opaque synchronization handle, represented as a raw fd.
///
/// `Fence::NONE` (`-1`) is the device convention for "no fence attached".
/// The type is `Copy` on purpose: the bridge forwards descriptors, it does
/// not own them.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fence(RawFd);

impl Fence {
    /// The "no fence" sentinel used throughout the device contract.
    pub const NONE: Fence = Fence(-1);

    /// Wraps a raw descriptor. Negative values collapse to `NONE`.
    pub fn from_raw(fd: RawFd) -> Self {
        if fd < 0 {
            Fence::NONE
        } else {
            Fence(fd)
        }
    }

    /// Returns the underlying descriptor (`-1` for `NONE`).
    pub fn raw(&self) -> RawFd {
        self.0
    }

    /// Whether a real fence is attached.
    pub fn is_some(&self) -> bool {
        self.0 >= 0
    }

    /// Moves the fence out, leaving `NONE` behind.
    ///
    /// Used where the contract allows a fence to be consumed at most once
    /// per frame: after `take` the slot can no longer hand out the
    /// descriptor a second time.
    pub fn take(&mut self) -> Fence {
        std::mem::replace(self, Fence::NONE)
    }
}

impl Default for Fence {
    fn default() -> Self {
        Fence::NONE
    }
}

impl fmt::Debug for Fence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_some() {
            write!(f, "Fence({})", self.0)
        } else {
            write!(f, "Fence(none)")
        }
    }
}
