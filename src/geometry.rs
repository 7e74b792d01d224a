// src/geometry.rs

//! Device-format rectangles.
//!
//! The device contract expresses geometry as `left/top/right/bottom` edges
//! rather than origin + size. `RectI` is the integer form used for display
//! frames and pre-1.3 source crops; `RectF` is the floating-point form newer
//! devices expect for source crops. The two carry identical semantics, the
//! split is purely a wire-representation concern (see `crate::version`).

use serde::{Deserialize, Serialize};

/// An integer rectangle in device edge format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct RectI {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl RectI {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Non-negative origin and strictly positive extent.
    ///
    /// Degenerate (zero or negative area) rectangles are rejected before
    /// any device call; the device contract does not define behavior for
    /// them.
    pub fn is_valid(&self) -> bool {
        self.left >= 0 && self.top >= 0 && self.right > self.left && self.bottom > self.top
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }
}

/// The floating-point mirror of `RectI`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RectF {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl From<RectI> for RectF {
    fn from(r: RectI) -> Self {
        Self {
            left: r.left as f32,
            top: r.top as f32,
            right: r.right as f32,
            bottom: r.bottom as f32,
        }
    }
}
