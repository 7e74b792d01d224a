// src/layer.rs

//! Defines `Layer` and `LayerList`, the per-frame composition input.
//!
//! A `Layer` is one rectangular, blended visual element; a `LayerList` is
//! the ordered stack of layers submitted for one display slot in one frame.
//! The last entry of a list is reserved for the frame target: the buffer the
//! caller has already composited everything the device declined into.
//!
//! Lists are built fresh every frame and never persisted; buffers and fences
//! referenced here remain caller-owned throughout.

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

use crate::fence::Fence;
use crate::geometry::{RectF, RectI};

/// Opaque token for a caller-owned graphics buffer.
///
/// The bridge forwards it to the device and never frees, maps, or
/// dereferences it. The referenced buffer must outlive the device call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BufferHandle(pub u64);

/// How a layer's pixels combine with what is beneath it.
///
/// Discriminants follow the device ABI constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u32)]
pub enum Blending {
    /// Source pixels replace destination pixels.
    None = 0x0100,
    /// Alpha-premultiplied source over destination.
    Premultiplied = 0x0105,
    /// Straight-alpha coverage blending.
    Coverage = 0x0405,
}

/// Per-layer composition decision, requested by the caller and rewritten by
/// the device during prepare.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u32)]
pub enum CompositionType {
    /// Caller must render this layer into the frame target itself.
    Framebuffer = 0,
    /// Device composites this layer in hardware.
    Overlay = 1,
    /// Solid background color filled by the device.
    Background = 2,
    /// The reserved trailing layer holding the pre-composited output.
    FramebufferTarget = 3,
}

/// Source crop as it will be serialized to the device.
///
/// Which arm gets populated is decided by the version table
/// (`crate::version::CropField`); the rectangle means the same thing either
/// way.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SourceCrop {
    /// Not yet populated for this frame.
    Unset,
    /// Integer crop, pre-1.3 devices.
    Int(RectI),
    /// Floating-point crop, 1.3 and up.
    Float(RectF),
}

bitflags! {
    /// Per-layer flag word forwarded verbatim to the device.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct LayerFlags: u32 {
        /// The device must not touch this layer this frame.
        const SKIP = 1 << 0;
    }
}

bitflags! {
    /// List-level flag word.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
    pub struct ListFlags: u32 {
        /// Layer arrangement differs from the previous frame; the device
        /// must re-evaluate its composition strategy.
        const GEOMETRY_CHANGED = 1 << 0;
    }
}

/// One composition unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    /// Caller-owned source buffer; `None` for background-type layers.
    pub buffer: Option<BufferHandle>,
    pub source_crop: SourceCrop,
    /// Destination rectangle on the display.
    pub display_frame: RectI,
    pub blending: Blending,
    pub composition_type: CompositionType,
    pub flags: LayerFlags,
    /// Device hint word, written back by the device during prepare.
    pub hints: u32,
    /// Rotation/flip transform; 0 = identity.
    pub transform: u32,
    /// Screen-space rectangles actually visible after occlusion.
    pub visible_region: Vec<RectI>,
    /// Fence guarding the source buffer; consumed at most once per frame.
    pub acquire_fence: Fence,
    /// Device-produced fence signaling when the buffer may be reused.
    pub release_fence: Fence,
    /// 0x00 transparent .. 0xFF opaque. Ignored by pre-plane-alpha devices.
    pub plane_alpha: u8,
}

impl Layer {
    /// A layer requesting device (overlay) composition of `buffer`.
    pub fn new(buffer: BufferHandle, display_frame: RectI) -> Self {
        Self {
            buffer: Some(buffer),
            source_crop: SourceCrop::Unset,
            display_frame,
            blending: Blending::Premultiplied,
            composition_type: CompositionType::Framebuffer,
            flags: LayerFlags::empty(),
            hints: 0,
            transform: 0,
            visible_region: vec![display_frame],
            acquire_fence: Fence::NONE,
            release_fence: Fence::NONE,
            plane_alpha: 0xFF,
        }
    }
}

/// The ordered per-slot layer stack for one frame.
///
/// Constructed with the trailing frame-target slot already reserved; callers
/// push their content layers and the bridge overwrites the target slot
/// during prepare.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerList {
    layers: Vec<Layer>,
    /// Caller hint: did the layer arrangement change since last frame?
    /// Consulted against the version table when the flag word is built.
    pub geometry_changed: bool,
    pub flags: ListFlags,
    /// Device-produced fence for the whole frame leaving the pipe.
    pub retire_fence: Fence,
    /// Output buffer for writeback/virtual displays; reset every prepare.
    pub outbuf: Option<BufferHandle>,
    pub outbuf_acquire_fence: Fence,
}

impl LayerList {
    /// An empty list with the frame-target slot already reserved.
    pub fn new() -> Self {
        Self {
            layers: vec![Self::empty_target_slot()],
            geometry_changed: true,
            flags: ListFlags::empty(),
            retire_fence: Fence::NONE,
            outbuf: None,
            outbuf_acquire_fence: Fence::NONE,
        }
    }

    fn empty_target_slot() -> Layer {
        Layer {
            buffer: None,
            source_crop: SourceCrop::Unset,
            display_frame: RectI::default(),
            blending: Blending::Premultiplied,
            composition_type: CompositionType::FramebufferTarget,
            flags: LayerFlags::empty(),
            hints: 0,
            transform: 0,
            visible_region: Vec::new(),
            acquire_fence: Fence::NONE,
            release_fence: Fence::NONE,
            plane_alpha: 0xFF,
        }
    }

    /// Appends a content layer, keeping the frame-target slot last.
    pub fn push(&mut self, layer: Layer) {
        let target = self.layers.len() - 1;
        self.layers.insert(target, layer);
    }

    /// All layers including the trailing frame target.
    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn layers_mut(&mut self) -> &mut [Layer] {
        &mut self.layers
    }

    /// Content layers only (everything but the frame target).
    pub fn content_layers(&self) -> &[Layer] {
        &self.layers[..self.layers.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Whether the caller has pushed any content layers yet. The reserved
    /// frame-target slot does not count.
    pub fn is_empty(&self) -> bool {
        self.content_layers().is_empty()
    }

    /// The reserved trailing frame-target slot.
    pub fn frame_target(&self) -> &Layer {
        // The slot is created in `new` and nothing removes it.
        &self.layers[self.layers.len() - 1]
    }

    pub fn frame_target_mut(&mut self) -> &mut Layer {
        let idx = self.layers.len() - 1;
        &mut self.layers[idx]
    }
}

impl Default for LayerList {
    fn default() -> Self {
        Self::new()
    }
}
